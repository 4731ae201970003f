//! Span normalization: clamp raw issue spans to the document and drop the
//! ones that cannot be displayed.

use crate::text::TextIndex;
use crate::types::{Issue, NormalizedIssue, Span};
use serde::Serialize;

/// Why an issue was dropped by the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// A span field was missing, NaN or infinite
    NonFinite,
    /// The clamped span has no extent
    Empty,
}

impl DropReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NonFinite => "non-finite span",
            Self::Empty => "empty span",
        }
    }
}

/// Number of issues dropped per reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DropCounts {
    pub non_finite: usize,
    pub empty: usize,
}

impl DropCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.non_finite + self.empty
    }

    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::NonFinite => self.non_finite += 1,
            DropReason::Empty => self.empty += 1,
        }
    }
}

/// Floor and clamp one raw offset into `[0, text_len]`
fn clamp_offset(raw: f64, text_len: usize) -> Option<usize> {
    if !raw.is_finite() {
        return None;
    }
    let floored = raw.floor();
    if floored <= 0.0 {
        Some(0)
    } else if floored >= text_len as f64 {
        Some(text_len)
    } else {
        // In range and integral, so the cast is exact
        Some(floored as usize)
    }
}

/// Clamp an issue span into `[0, text_len]`, rejecting degenerate results
pub fn clamp_span(issue: &Issue, text_len: usize) -> Result<Span, DropReason> {
    let (Some(start), Some(end)) = (
        clamp_offset(issue.start, text_len),
        clamp_offset(issue.end, text_len),
    ) else {
        return Err(DropReason::NonFinite);
    };
    if end <= start {
        return Err(DropReason::Empty);
    }
    Ok(Span::new(start, end))
}

/// Normalize issues against a document of `text_len` units.
///
/// Order is preserved and dropped issues leave no trace.
#[must_use]
pub fn normalize(issues: &[Issue], text_len: usize) -> Vec<NormalizedIssue> {
    issues
        .iter()
        .filter_map(|issue| {
            clamp_span(issue, text_len).ok().map(|span| NormalizedIssue {
                issue: issue.clone(),
                span,
            })
        })
        .collect()
}

/// Normalize issues against an indexed document.
///
/// Besides clamping, both ends are floored to character boundaries so every
/// span can be sliced out of the text. Returns the surviving issues and the
/// drop counts.
#[must_use]
pub fn normalize_in(issues: &[Issue], index: &TextIndex) -> (Vec<NormalizedIssue>, DropCounts) {
    let text_len = index.len();
    let mut normalized = Vec::with_capacity(issues.len());
    let mut dropped = DropCounts::default();

    for (position, issue) in issues.iter().enumerate() {
        let snapped = clamp_span(issue, text_len).and_then(|span| {
            let span = Span::new(
                index.floor_boundary(span.start),
                index.floor_boundary(span.end),
            );
            if span.is_empty() {
                Err(DropReason::Empty)
            } else {
                Ok(span)
            }
        });

        match snapped {
            Ok(span) => normalized.push(NormalizedIssue {
                issue: issue.clone(),
                span,
            }),
            Err(reason) => {
                log::debug!(
                    "dropping issue #{position} from agent '{}' ({}..{}): {}",
                    issue.agent,
                    issue.start,
                    issue.end,
                    reason.as_str()
                );
                dropped.record(reason);
            }
        }
    }

    (normalized, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OffsetUnit;
    use crate::types::Severity;

    #[test]
    fn clamps_negative_start() {
        let issues = vec![Issue::new("tone", -5.0, 10.0)];
        let normalized = normalize(&issues, 20);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].span, Span::new(0, 10));
    }

    #[test]
    fn drops_zero_length_span() {
        let issues = vec![Issue::new("tone", 10.0, 10.0)];
        assert!(normalize(&issues, 20).is_empty());
    }

    #[test]
    fn drops_inverted_span() {
        let issues = vec![Issue::new("logic", 8.0, 3.0)];
        assert!(normalize(&issues, 20).is_empty());
    }

    #[test]
    fn drops_non_finite_span() {
        let issues = vec![
            Issue::new("tone", f64::NAN, 4.0),
            Issue::new("tone", 0.0, f64::INFINITY),
        ];
        assert!(normalize(&issues, 20).is_empty());
    }

    #[test]
    fn floors_fractional_offsets() {
        let issues = vec![Issue::new("spelling", 2.7, 5.2)];
        assert_eq!(normalize(&issues, 20)[0].span, Span::new(2, 5));
    }

    #[test]
    fn out_of_bounds_issue_collapses_and_is_dropped() {
        let issues = vec![Issue::new("tension", 25.0, 40.0)];
        assert!(normalize(&issues, 20).is_empty());
    }

    #[test]
    fn whole_document_issue_survives() {
        let issues = vec![Issue::new("genre_cliche", 0.0, 1e9)];
        assert_eq!(normalize(&issues, 20)[0].span, Span::new(0, 20));
    }

    #[test]
    fn preserves_order_and_fields() {
        let issues = vec![
            Issue::new("b", 4.0, 6.0).severity(Severity::Low).reason("second"),
            Issue::new("skip", 3.0, 3.0),
            Issue::new("a", 0.0, 2.0).label("first"),
        ];
        let normalized = normalize(&issues, 10);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].issue, issues[0]);
        assert_eq!(normalized[1].issue, issues[2]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(normalize(&[], 10).is_empty());
    }

    #[test]
    fn normalize_in_counts_drops() {
        let index = TextIndex::new("0123456789", OffsetUnit::Char);
        let issues = vec![
            Issue::new("a", 1.0, 3.0),
            Issue::new("b", f64::NAN, 3.0),
            Issue::new("c", 5.0, 5.0),
            Issue::new("d", 12.0, 20.0),
        ];
        let (normalized, dropped) = normalize_in(&issues, &index);
        assert_eq!(normalized.len(), 1);
        assert_eq!(dropped.non_finite, 1);
        assert_eq!(dropped.empty, 2);
        assert_eq!(dropped.total(), 3);
    }

    #[test]
    fn normalize_in_snaps_to_surrogate_boundaries() {
        // "a😀b": the emoji spans UTF-16 units 1..3
        let index = TextIndex::new("a😀b", OffsetUnit::Utf16);
        let issues = vec![
            Issue::new("a", 2.0, 4.0),
            Issue::new("b", 2.0, 2.0),
            Issue::new("c", 1.0, 2.0),
        ];
        let (normalized, dropped) = normalize_in(&issues, &index);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].span, Span::new(1, 4));
        assert_eq!(dropped.empty, 2);
    }
}
