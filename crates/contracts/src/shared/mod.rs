pub mod list;
pub mod logger;
