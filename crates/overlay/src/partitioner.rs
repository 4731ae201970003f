use crate::types::{NormalizedIssue, Span};

/// Split `[0, text_len)` at every issue boundary.
///
/// The result is ordered left to right, contiguous and non-overlapping, and
/// covers the whole document. No issues yields a single span for non-empty
/// text and nothing for empty text.
#[must_use]
pub fn partition(text_len: usize, issues: &[NormalizedIssue]) -> Vec<Span> {
    let mut points = Vec::with_capacity(issues.len() * 2 + 2);
    points.push(0);
    points.push(text_len);
    for issue in issues {
        points.push(issue.start());
        points.push(issue.end());
    }
    points.sort_unstable();
    points.dedup();

    points
        .windows(2)
        .filter(|pair| pair[1] > pair[0])
        .map(|pair| Span::new(pair[0], pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Issue;
    use pretty_assertions::assert_eq;

    fn issue(start: usize, end: usize) -> NormalizedIssue {
        NormalizedIssue {
            issue: Issue::new("test", start as f64, end as f64),
            span: Span::new(start, end),
        }
    }

    #[test]
    fn no_issues_gives_whole_document() {
        assert_eq!(partition(10, &[]), vec![Span::new(0, 10)]);
    }

    #[test]
    fn empty_text_gives_no_segments() {
        assert!(partition(0, &[]).is_empty());
    }

    #[test]
    fn overlapping_issues_split_at_every_boundary() {
        let spans = partition(10, &[issue(2, 6), issue(4, 8)]);
        assert_eq!(
            spans,
            vec![
                Span::new(0, 2),
                Span::new(2, 4),
                Span::new(4, 6),
                Span::new(6, 8),
                Span::new(8, 10),
            ]
        );
    }

    #[test]
    fn identical_and_nested_issues_share_boundaries() {
        let spans = partition(6, &[issue(0, 6), issue(0, 6), issue(2, 3)]);
        assert_eq!(
            spans,
            vec![Span::new(0, 2), Span::new(2, 3), Span::new(3, 6)]
        );
    }

    #[test]
    fn spans_are_contiguous() {
        let issues = [issue(7, 9), issue(1, 4), issue(3, 12), issue(0, 1)];
        let spans = partition(12, &issues);
        assert_eq!(spans.first().map(|s| s.start), Some(0));
        assert_eq!(spans.last().map(|s| s.end), Some(12));
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert!(pair[0].start < pair[0].end);
        }
    }
}
