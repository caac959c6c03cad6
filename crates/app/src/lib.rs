pub mod config;
pub mod error;
pub mod export;
pub mod reports;
pub mod state;
pub mod store;
