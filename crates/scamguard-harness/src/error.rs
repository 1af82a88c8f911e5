//! Run failure carrying the partial output of the aborted run

use scamguard_core::Error;
use std::fmt;

/// Result of a runner: the finished run, or the failure plus what was
/// collected before it
pub type RunResult<T> = std::result::Result<T, RunAborted<T>>;

/// A run that stopped on an error.
///
/// `partial` holds every record completed before the failure, so callers can
/// still inspect or export them.
#[derive(Debug, thiserror::Error)]
#[error("run aborted: {error}")]
pub struct RunAborted<T: fmt::Debug> {
    #[source]
    pub error: Error,
    pub partial: T,
}

impl<T: fmt::Debug> RunAborted<T> {
    pub fn new(error: Error, partial: T) -> Self {
        Self { error, partial }
    }

    pub fn error(&self) -> &Error {
        &self.error
    }

    pub fn into_error(self) -> Error {
        self.error
    }

    pub fn into_partial(self) -> T {
        self.partial
    }

    /// Split into the error and the partial output
    pub fn into_parts(self) -> (Error, T) {
        (self.error, self.partial)
    }
}

impl<T: fmt::Debug> From<RunAborted<T>> for Error {
    fn from(aborted: RunAborted<T>) -> Self {
        aborted.error
    }
}
