use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity reported by an analysis agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Parse a backend severity string.
    ///
    /// Matching ignores case and surrounding whitespace. Unknown values
    /// yield `None`, which ranks the same as a missing severity.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("high") {
            Some(Self::High)
        } else if raw.eq_ignore_ascii_case("medium") {
            Some(Self::Medium)
        } else if raw.eq_ignore_ascii_case("low") {
            Some(Self::Low)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue as delivered by the analysis backend.
///
/// `start` and `end` are raw numbers in the configured offset unit. A span
/// field that was missing or not numeric is stored as NaN so that the
/// normalizer drops the issue instead of guessing a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Producing agent (tone, logic, spelling, ...)
    pub agent: String,

    /// Severity, absent when the backend did not send a known level
    pub severity: Option<Severity>,

    /// Short issue label (`label` or `issue_type` on the wire)
    pub label: Option<String>,

    /// Human-readable explanation
    pub reason: Option<String>,

    /// Suggested rewrite, if the agent offered one
    #[serde(default)]
    pub suggestion: Option<String>,

    /// Raw span start
    pub start: f64,

    /// Raw span end (exclusive)
    pub end: f64,
}

impl Issue {
    /// Create an issue with only an agent and a raw span
    pub fn new(agent: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            agent: agent.into(),
            severity: None,
            label: None,
            reason: None,
            suggestion: None,
            start,
            end,
        }
    }

    /// Builder: set severity
    #[must_use]
    pub const fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Builder: set label
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder: set reason
    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Builder: set suggestion
    #[must_use]
    pub fn suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Half-open interval `[start, end)` in offset units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Strict overlap: spans that only touch at one point do not overlap
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        other.start < self.end && other.end > self.start
    }

    /// Stable identity for list rendering
    #[must_use]
    pub fn key(self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// An issue whose span has been validated against the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedIssue {
    /// Original issue, fields carried through unchanged
    pub issue: Issue,

    /// Clamped span, always non-empty
    pub span: Span,
}

impl NormalizedIssue {
    #[must_use]
    pub fn agent(&self) -> &str {
        &self.issue.agent
    }

    #[must_use]
    pub const fn severity(&self) -> Option<Severity> {
        self.issue.severity
    }

    #[must_use]
    pub const fn start(&self) -> usize {
        self.span.start
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.span.end
    }
}
