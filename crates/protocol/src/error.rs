use thiserror::Error;

/// Result type for payload parsing
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors for payloads that cannot be read at all.
///
/// Individual malformed records are skipped, not reported here.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Payload is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Payload is valid JSON but not an object
    #[error("Analysis result must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl ProtocolError {
    pub const fn not_an_object(kind: &'static str) -> Self {
        Self::NotAnObject(kind)
    }
}
