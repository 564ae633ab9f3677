pub mod repository;

use repository::log_event_internal;

/// Records a server-side event in `system_log` without waiting for the write.
///
/// ```ignore
/// logger::log("pengajuan", "Pengajuan 12 dibuat");
/// ```
pub fn log(category: &str, message: &str) {
    log_event_internal("server", category, message);
}
