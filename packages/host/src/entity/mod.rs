pub mod save_data;
pub mod stats;
pub mod user;
