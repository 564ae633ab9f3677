pub mod aggregate;
pub mod fitness;
