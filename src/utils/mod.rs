pub mod config;
pub mod credential_store;
pub mod help;

pub use config::*;
