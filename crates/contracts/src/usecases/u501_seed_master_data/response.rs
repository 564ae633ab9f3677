use serde::{Deserialize, Serialize};

/// Rows written by one seeding run, per table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub perusahaan: usize,
    pub departemen: usize,
    pub jabatan: usize,
    pub karyawan: usize,
    pub jenis_pekerjaan: usize,
}
