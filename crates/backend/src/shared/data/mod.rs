pub mod db;
pub mod metadata;
pub mod migration_runner;
