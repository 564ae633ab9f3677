pub mod common;
pub mod u501_seed_master_data;
