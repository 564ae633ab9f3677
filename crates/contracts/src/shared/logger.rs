use serde::{Deserialize, Serialize};

/// Row of the system log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    pub source: String, // "client" or "server"
    pub category: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLogRequest {
    pub source: String,
    pub category: String,
    pub message: String,
}
