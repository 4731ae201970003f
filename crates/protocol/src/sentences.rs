use crate::records::{SentenceIssueRecord, SplitMapEntry};
use manuscript_overlay::{Issue, Severity};

/// Map a sentence-relative issue into document coordinates.
///
/// The character range defaults to the whole sentence: a missing start reads
/// as 0, a missing or zero end as the sentence length, and a range that is
/// empty after clamping to the sentence falls back to the full sentence.
/// Returns `None` when the sentence is not in `sentences` or cannot be
/// located in `split_map`.
pub(crate) fn to_document_issue(
    agent: &str,
    record: &SentenceIssueRecord,
    sentences: &[String],
    split_map: &[SplitMapEntry],
) -> Option<Issue> {
    let Some(sentence_index) = record.sentence_index() else {
        log::debug!("{agent}: issue without sentence index skipped");
        return None;
    };
    if sentence_index >= sentences.len() {
        log::debug!(
            "{agent}: sentence {sentence_index} out of range ({} sentences)",
            sentences.len()
        );
        return None;
    }
    let Some((doc_start, doc_end)) = split_map.get(sentence_index).and_then(SplitMapEntry::bounds)
    else {
        log::debug!("{agent}: sentence {sentence_index} not in split map");
        return None;
    };

    let sentence_len = doc_end - doc_start;
    let (char_start, char_end) = record.char_range();
    let mut start = char_start.unwrap_or(0).min(sentence_len);
    let mut end = char_end
        .filter(|&end| end > 0)
        .unwrap_or(sentence_len)
        .min(sentence_len);
    if end <= start {
        start = 0;
        end = sentence_len;
    }

    Some(Issue {
        agent: agent.to_string(),
        severity: record.severity.as_deref().and_then(Severity::parse),
        label: record.issue_type.clone().or_else(|| record.kind.clone()),
        reason: record.reason.clone(),
        suggestion: record.suggestion.clone(),
        start: (doc_start + start) as f64,
        end: (doc_start + end) as f64,
    })
}
