use crate::config::SeverityRanking;
use crate::types::{NormalizedIssue, Span};
use serde::Serialize;

/// Covering issues of one segment, as indices into the normalized slice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Covering issues in display priority order
    pub issues: Vec<usize>,

    /// Highest-priority covering issue, `None` for plain text
    pub primary: Option<usize>,
}

impl Classification {
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.primary.is_none()
    }
}

/// Find the issues covering `span` and order them by priority.
///
/// Priority is severity rank descending, then agent name ascending; equal
/// keys keep their input order.
///
/// # Panics
///
/// Panics if `span` is empty or inverted.
#[must_use]
pub fn classify(
    span: Span,
    issues: &[NormalizedIssue],
    ranking: &SeverityRanking,
) -> Classification {
    assert!(
        span.start < span.end,
        "cannot classify empty segment {}..{}",
        span.start,
        span.end
    );

    let mut covering: Vec<usize> = issues
        .iter()
        .enumerate()
        .filter(|(_, issue)| span.overlaps(issue.span))
        .map(|(idx, _)| idx)
        .collect();

    // Stable sort keeps ties deterministic
    covering.sort_by(|&a, &b| {
        let (a, b) = (&issues[a], &issues[b]);
        ranking
            .rank(b.severity())
            .cmp(&ranking.rank(a.severity()))
            .then_with(|| a.agent().cmp(b.agent()))
    });

    Classification {
        primary: covering.first().copied(),
        issues: covering,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Issue, Severity};

    fn issue(agent: &str, severity: Option<Severity>, start: usize, end: usize) -> NormalizedIssue {
        let mut raw = Issue::new(agent, start as f64, end as f64);
        raw.severity = severity;
        NormalizedIssue {
            issue: raw,
            span: Span::new(start, end),
        }
    }

    #[test]
    fn uncovered_segment_is_plain() {
        let issues = [issue("x", Some(Severity::High), 2, 6)];
        let class = classify(Span::new(0, 2), &issues, &SeverityRanking::default());
        assert!(class.is_plain());
        assert!(class.issues.is_empty());
    }

    #[test]
    fn alphabetical_tie_break_at_equal_severity() {
        let issues = [
            issue("b", Some(Severity::Medium), 0, 5),
            issue("a", Some(Severity::Medium), 0, 5),
        ];
        let class = classify(Span::new(0, 5), &issues, &SeverityRanking::default());
        assert_eq!(class.primary, Some(1));
        assert_eq!(class.issues, vec![1, 0]);
    }

    #[test]
    fn severity_beats_agent_name() {
        let issues = [
            issue("aaa", Some(Severity::Low), 0, 5),
            issue("zzz", Some(Severity::High), 0, 5),
        ];
        let class = classify(Span::new(1, 3), &issues, &SeverityRanking::default());
        assert_eq!(class.primary, Some(1));
    }

    #[test]
    fn absent_severity_ranks_last() {
        let issues = [
            issue("a", None, 0, 5),
            issue("b", Some(Severity::Low), 0, 5),
        ];
        let class = classify(Span::new(0, 5), &issues, &SeverityRanking::default());
        assert_eq!(class.issues, vec![1, 0]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let issues = [
            issue("tone", Some(Severity::High), 0, 5),
            issue("tone", Some(Severity::High), 1, 4),
        ];
        let class = classify(Span::new(1, 4), &issues, &SeverityRanking::default());
        assert_eq!(class.issues, vec![0, 1]);
    }

    #[test]
    fn touching_issue_does_not_cover() {
        let issues = [issue("x", Some(Severity::High), 4, 8)];
        let class = classify(Span::new(2, 4), &issues, &SeverityRanking::default());
        assert!(class.is_plain());
    }

    #[test]
    fn custom_ranking_is_respected() {
        // Non-default rank values
        let ranking = SeverityRanking {
            high: 9,
            medium: 5,
            low: 4,
            absent: 0,
        };
        let issues = [
            issue("a", Some(Severity::Medium), 0, 2),
            issue("b", Some(Severity::High), 0, 2),
        ];
        assert_eq!(classify(Span::new(0, 2), &issues, &ranking).primary, Some(1));
    }

    #[test]
    #[should_panic(expected = "cannot classify empty segment")]
    fn empty_span_is_a_contract_violation() {
        let _ = classify(Span::new(3, 3), &[], &SeverityRanking::default());
    }
}
