//! ScamGuard Core
//!
//! Core types shared across the ScamGuard evaluation harness.
//!
//! This crate provides:
//! - Labels and classification results as produced by a classifier
//! - Log records and the append-only result log the runners fill
//! - Error types and result handling

pub mod error;
pub mod log;
pub mod types;

pub use error::{Error, Result};
pub use log::ResultLog;
pub use types::{ClassificationResult, Label, LogRecord};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::log::ResultLog;
    pub use crate::types::{ClassificationResult, Label, LogRecord};
}
