pub mod a001_perusahaan;
pub mod a002_departemen;
pub mod a003_jabatan;
pub mod a004_karyawan;
pub mod a005_jenis_pekerjaan;
pub mod a006_pengajuan;
pub mod a007_vitals_threshold;
pub mod logs;
pub mod seed;

/// Body of a successful master-data delete
pub const DELETED_MESSAGE: &str = "Data deleted successfully";
