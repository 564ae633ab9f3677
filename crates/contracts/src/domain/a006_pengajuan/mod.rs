pub mod aggregate;
pub mod roster;
pub mod status;
