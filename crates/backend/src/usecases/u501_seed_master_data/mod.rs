pub mod catalog;
pub mod executor;
