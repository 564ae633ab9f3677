use serde::{Deserialize, Serialize};

use crate::domain::common::DomainError;

/// Workflow state of a permit: submitted, examined, finished.
///
/// The workflow only moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PengajuanStatus {
    #[default]
    Diajukan,
    Diperiksa,
    Selesai,
}

impl PengajuanStatus {
    pub const ALL: [PengajuanStatus; 3] = [
        PengajuanStatus::Diajukan,
        PengajuanStatus::Diperiksa,
        PengajuanStatus::Selesai,
    ];

    /// Zero-based position in the workflow
    pub fn step(&self) -> usize {
        match self {
            PengajuanStatus::Diajukan => 0,
            PengajuanStatus::Diperiksa => 1,
            PengajuanStatus::Selesai => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PengajuanStatus::Diajukan => "Diajukan",
            PengajuanStatus::Diperiksa => "Diperiksa",
            PengajuanStatus::Selesai => "Selesai",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::invalid(format!("Status pengajuan '{}' tidak dikenal", s)))
    }

    pub fn ensure_transition(&self, next: PengajuanStatus) -> Result<(), DomainError> {
        if next.step() < self.step() {
            return Err(DomainError::invalid(format!(
                "Status tidak dapat kembali dari {} ke {}",
                self.as_str(),
                next.as_str()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for PengajuanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_moves_forward_only() {
        use PengajuanStatus::*;
        assert!(Diajukan.ensure_transition(Diperiksa).is_ok());
        assert!(Diajukan.ensure_transition(Selesai).is_ok());
        assert!(Diperiksa.ensure_transition(Diperiksa).is_ok());
        assert!(Selesai.ensure_transition(Diajukan).is_err());
        assert!(Diperiksa.ensure_transition(Diajukan).is_err());
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(PengajuanStatus::parse("selesai"), Ok(PengajuanStatus::Selesai));
        assert!(PengajuanStatus::parse("Ditolak").is_err());
    }
}
