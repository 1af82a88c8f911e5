//! Error types for ScamGuard

/// Result type alias using ScamGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for harness and classifier operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The classifier raised an error or returned malformed data
    #[error("classification failed: {0}")]
    ClassificationFailure(String),

    /// Analysis was requested on a record without a known label
    #[error("record {index} has no ground-truth label")]
    MissingGroundTruth { index: usize },

    /// Rejected input, raised before any classifier call is made
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The classifier was invoked before any model was loaded
    #[error("no model loaded")]
    ModelNotLoaded,

    /// A model id was requested that the registry does not know
    #[error("unknown model id: {0}")]
    UnknownModelId(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new classification failure
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::ClassificationFailure(msg.into())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new unknown model error
    pub fn unknown_model(id: impl Into<String>) -> Self {
        Self::UnknownModelId(id.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Errors the classifier port raises that callers must see unchanged
    pub fn is_port_error(&self) -> bool {
        matches!(self, Self::ModelNotLoaded | Self::UnknownModelId(_))
    }
}
