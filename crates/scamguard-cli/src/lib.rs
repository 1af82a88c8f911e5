pub mod cli;
pub mod commands;
pub mod config;
pub mod report;

pub use cli::*;
pub use commands::Session;
pub use config::HarnessConfig;
