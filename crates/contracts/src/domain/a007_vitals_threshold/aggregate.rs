use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, DomainError};

crate::aggregate_id!(
    /// Threshold row id
    ThresholdId
);

/// Acceptable range of one vital sign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsThreshold {
    pub id: ThresholdId,
    pub key: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

impl VitalsThreshold {
    fn preset(key: &str, label: &str, min: f64, max: f64, unit: &str) -> Self {
        Self {
            id: ThresholdId::unsaved(),
            key: key.to_string(),
            label: label.to_string(),
            min,
            max,
            unit: unit.to_string(),
        }
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn set_range(&mut self, min: f64, max: f64) -> Result<(), DomainError> {
        validate_range(min, max)?;
        self.min = min;
        self.max = max;
        Ok(())
    }
}

pub fn validate_range(min: f64, max: f64) -> Result<(), DomainError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(DomainError::invalid("Nilai min dan max harus berupa angka"));
    }
    if min > max {
        return Err(DomainError::invalid(format!(
            "Nilai min ({}) tidak boleh lebih besar dari max ({})",
            min, max
        )));
    }
    Ok(())
}

/// Table seeded when no threshold is configured yet
pub fn default_thresholds() -> Vec<VitalsThreshold> {
    vec![
        VitalsThreshold::preset("sistole", "Tekanan Darah (Sistole)", 90.0, 120.0, "mmHg"),
        VitalsThreshold::preset("diastole", "Tekanan Darah (Diastole)", 60.0, 80.0, "mmHg"),
        VitalsThreshold::preset("nadi", "Denyut Nadi", 60.0, 100.0, "bpm"),
        VitalsThreshold::preset("suhu", "Suhu Tubuh", 36.1, 37.2, "°C"),
        VitalsThreshold::preset("rr", "Laju Pernapasan", 12.0, 20.0, "x/menit"),
        VitalsThreshold::preset("spo2", "Saturasi Oksigen", 95.0, 100.0, "%"),
    ]
}

/// Body of the threshold update; only the range is editable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThresholdUpdateDto {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub max: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_vital() {
        let keys: Vec<_> = default_thresholds().into_iter().map(|t| t.key).collect();
        assert_eq!(keys, vec!["sistole", "diastole", "nadi", "suhu", "rr", "spo2"]);
    }

    #[test]
    fn range_is_inclusive() {
        let suhu = &default_thresholds()[3];
        assert!(suhu.contains(36.1));
        assert!(suhu.contains(37.2));
        assert!(!suhu.contains(37.3));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut nadi = default_thresholds()[2].clone();
        assert!(nadi.set_range(100.0, 60.0).is_err());
        assert!(nadi.set_range(f64::NAN, 60.0).is_err());
        assert!(nadi.set_range(55.0, 110.0).is_ok());
        assert_eq!((nadi.min, nadi.max), (55.0, 110.0));
    }

    #[test]
    fn update_accepts_numeric_strings() {
        let dto: ThresholdUpdateDto =
            serde_json::from_str(r#"{"min": "36.0", "max": 37.5}"#).unwrap();
        assert_eq!(dto.min, Some(36.0));
        assert_eq!(dto.max, Some(37.5));
    }
}
