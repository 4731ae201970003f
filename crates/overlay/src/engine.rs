use crate::classifier::{classify, Classification};
use crate::config::{OffsetUnit, OverlayConfig};
use crate::error::{OverlayError, Result};
use crate::normalizer::{normalize_in, DropCounts};
use crate::partitioner::partition;
use crate::text::{prepare, TextIndex};
use crate::types::{Issue, NormalizedIssue, Span};
use serde::Serialize;
use std::borrow::Cow;

/// Runs the normalize → partition → classify pipeline
#[derive(Debug, Clone, Default)]
pub struct OverlayEngine {
    config: OverlayConfig,
}

impl OverlayEngine {
    /// Create an engine, rejecting invalid configuration
    pub fn new(config: OverlayConfig) -> Result<Self> {
        config.validate().map_err(OverlayError::invalid_config)?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Compute the overlay of `issues` on `text`.
    ///
    /// The result depends only on the inputs and the configuration; calling
    /// this twice with the same arguments yields equal overlays.
    #[must_use]
    pub fn overlay<'t>(&self, text: &'t str, issues: &[Issue]) -> Overlay<'t> {
        let text = prepare(text, &self.config.text);

        let index = TextIndex::new(&text, self.config.unit);
        let (normalized, dropped) = normalize_in(issues, &index);
        let segments: Vec<Segment> = partition(index.len(), &normalized)
            .into_iter()
            .map(|span| Segment {
                span,
                classification: classify(span, &normalized, &self.config.ranking),
            })
            .collect();

        let stats = OverlayStats {
            unit: self.config.unit,
            text_len: index.len(),
            input_issues: issues.len(),
            kept_issues: normalized.len(),
            dropped,
            segments: segments.len(),
            highlighted_segments: segments
                .iter()
                .filter(|s| !s.classification.is_plain())
                .count(),
        };
        log::debug!(
            "overlay: {} units, {}/{} issues kept, {} segments ({} highlighted)",
            stats.text_len,
            stats.kept_issues,
            stats.input_issues,
            stats.segments,
            stats.highlighted_segments
        );

        Overlay {
            text,
            index,
            issues: normalized,
            segments,
            stats,
        }
    }
}

/// A partition span with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub span: Span,
    pub classification: Classification,
}

/// Summary of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayStats {
    pub unit: OffsetUnit,
    pub text_len: usize,
    pub input_issues: usize,
    pub kept_issues: usize,
    pub dropped: DropCounts,
    pub segments: usize,
    pub highlighted_segments: usize,
}

/// Result of a pipeline run; borrows the document when no rewrite was needed
#[derive(Debug, Clone)]
pub struct Overlay<'t> {
    text: Cow<'t, str>,
    index: TextIndex,
    issues: Vec<NormalizedIssue>,
    segments: Vec<Segment>,
    stats: OverlayStats,
}

impl Overlay<'_> {
    /// Document text after preprocessing
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized issues, in input order
    #[must_use]
    pub fn issues(&self) -> &[NormalizedIssue] {
        &self.issues
    }

    #[must_use]
    pub fn raw_segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub const fn stats(&self) -> &OverlayStats {
        &self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Text covered by `span`, in the configured unit
    #[must_use]
    pub fn slice(&self, span: Span) -> &str {
        self.index.slice(&self.text, span)
    }

    /// Segments left to right, resolved against the text and issues
    pub fn segments(&self) -> impl Iterator<Item = SegmentView<'_>> + '_ {
        self.segments.iter().map(|segment| self.view(segment))
    }

    fn view<'a>(&'a self, segment: &Segment) -> SegmentView<'a> {
        SegmentView {
            span: segment.span,
            text: self.slice(segment.span),
            issues: segment
                .classification
                .issues
                .iter()
                .map(|&idx| &self.issues[idx])
                .collect(),
            primary: segment.classification.primary.map(|idx| &self.issues[idx]),
        }
    }
}

/// Borrowed view of a segment, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentView<'a> {
    pub span: Span,
    pub text: &'a str,

    /// Covering issues in priority order
    pub issues: Vec<&'a NormalizedIssue>,

    pub primary: Option<&'a NormalizedIssue>,
}

impl SegmentView<'_> {
    /// Stable key derived from the segment bounds
    #[must_use]
    pub fn key(&self) -> String {
        self.span.key()
    }

    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.primary.is_none()
    }
}
