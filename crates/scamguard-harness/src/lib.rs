//! ScamGuard Harness
//!
//! Evaluation runners that drive a [`ClassifierPort`] and record what it
//! says about each message.
//!
//! - [`StreamSimulator`]: timed, randomized traffic with ground truth
//! - [`EdgeCaseRunner`]: fixed categories of boundary messages
//! - [`StressRunner`]: sequential throughput batches
//! - [`ComparativeRunner`]: the same messages through several models
//! - [`MetricsAnalyzer`]: accuracy, confusion and confidence statistics
//!
//! Runners only ever append to their own [`ResultLog`]. A failing
//! classifier aborts the run with a [`RunAborted`] carrying everything
//! collected so far; a [`StopSignal`] ends it cleanly.
//!
//! [`ClassifierPort`]: scamguard_classifiers::ClassifierPort
//! [`ResultLog`]: scamguard_core::ResultLog

pub mod analyzer;
pub mod comparative;
pub mod control;
pub mod edge_cases;
pub mod error;
pub mod export;
pub mod samples;
pub mod stream;
pub mod stress;
pub mod telemetry;

mod runner;

pub use analyzer::{ConfidenceStats, ConfusionMatrix, MetricsAnalyzer, MetricsSnapshot};
pub use comparative::{ComparativeRun, ComparativeRunner};
pub use control::{StopSignal, Termination};
pub use edge_cases::{CategorySummary, EdgeCaseCategory, EdgeCaseRun, EdgeCaseRunner};
pub use error::{RunAborted, RunResult};
pub use stream::{PacingRange, StreamConfig, StreamRun, StreamSimulator};
pub use stress::{StressRun, StressRunner};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analyzer::{MetricsAnalyzer, MetricsSnapshot};
    pub use crate::comparative::{ComparativeRun, ComparativeRunner};
    pub use crate::control::{StopSignal, Termination};
    pub use crate::edge_cases::{EdgeCaseCategory, EdgeCaseRun, EdgeCaseRunner};
    pub use crate::error::{RunAborted, RunResult};
    pub use crate::stream::{StreamConfig, StreamRun, StreamSimulator};
    pub use crate::stress::{StressRun, StressRunner};
}
