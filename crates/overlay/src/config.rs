use crate::types::Severity;
use serde::{Deserialize, Serialize};

/// Configuration for the overlay pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Unit that issue offsets are counted in
    #[serde(default)]
    pub unit: OffsetUnit,

    /// Severity ranks used to pick the primary issue of a segment
    #[serde(default)]
    pub ranking: SeverityRanking,

    /// Preprocessing applied to the document text
    #[serde(default)]
    pub text: TextOptions,
}

impl OverlayConfig {
    /// Config for offsets produced by JavaScript string indices
    #[must_use]
    pub fn for_utf16() -> Self {
        Self {
            unit: OffsetUnit::Utf16,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.ranking.validate()
    }
}

/// Counting unit for document offsets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetUnit {
    /// Unicode scalar values (Python `str` indices)
    #[default]
    Char,

    /// UTF-16 code units (JavaScript string indices)
    Utf16,
}

impl OffsetUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Utf16 => "utf16",
        }
    }

    /// Width of a character in this unit
    #[must_use]
    pub const fn width(self, ch: char) -> usize {
        match self {
            Self::Char => 1,
            Self::Utf16 => ch.len_utf16(),
        }
    }
}

/// Rank table for severities; higher ranks win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityRanking {
    pub high: u8,
    pub medium: u8,
    pub low: u8,
    pub absent: u8,
}

impl Default for SeverityRanking {
    fn default() -> Self {
        Self {
            high: 3,
            medium: 2,
            low: 1,
            absent: 0,
        }
    }
}

impl SeverityRanking {
    #[must_use]
    pub const fn rank(&self, severity: Option<Severity>) -> u8 {
        match severity {
            Some(Severity::High) => self.high,
            Some(Severity::Medium) => self.medium,
            Some(Severity::Low) => self.low,
            None => self.absent,
        }
    }

    /// Ranks must keep the order high > medium > low > absent
    pub fn validate(&self) -> Result<(), String> {
        if self.high <= self.medium {
            return Err(format!(
                "high rank ({}) must exceed medium rank ({})",
                self.high, self.medium
            ));
        }
        if self.medium <= self.low {
            return Err(format!(
                "medium rank ({}) must exceed low rank ({})",
                self.medium, self.low
            ));
        }
        if self.low <= self.absent {
            return Err(format!(
                "low rank ({}) must exceed absent rank ({})",
                self.low, self.absent
            ));
        }
        Ok(())
    }
}

/// Text preprocessing options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Rewrite CRLF line endings to LF before indexing
    pub normalize_newlines: bool,

    /// Compose the text to Unicode NFC before indexing
    pub normalize_unicode: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            normalize_newlines: true,
            normalize_unicode: true,
        }
    }
}
