use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to read palette {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid palette: {0}")]
    InvalidPalette(String),

    #[error("Invalid color for '{key}': {value}")]
    InvalidColor { key: String, value: String },
}

impl RenderError {
    pub fn invalid_palette(msg: impl Into<String>) -> Self {
        Self::InvalidPalette(msg.into())
    }

    pub fn invalid_color(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidColor {
            key: key.into(),
            value: value.into(),
        }
    }
}
