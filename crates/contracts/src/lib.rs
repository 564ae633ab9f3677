//! Shared types between the backend and any client of the Izin Kerja API.
//!
//! Everything here is free of IO: aggregates, DTOs, validation and the
//! vitals fitness rule.

pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
