use thiserror::Error;

/// Result type for overlay operations
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Errors raised while setting up the overlay engine.
///
/// Malformed issue data is never an error: the normalizer drops it.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl OverlayError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
