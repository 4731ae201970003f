use crate::lenient;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Document-level highlight (`highlights[]`)
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct HighlightRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub agent: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub severity: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub issue_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub reason: Option<String>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<f64>")]
    pub doc_start: Option<f64>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<f64>")]
    pub doc_end: Option<f64>,
}

/// Issue location; document offsets plus the sentence-relative origin
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct LocationRecord {
    #[serde(default, deserialize_with = "lenient::index")]
    #[schemars(with = "Option<usize>")]
    pub sentence_index: Option<usize>,

    #[serde(default, deserialize_with = "lenient::index")]
    #[schemars(with = "Option<usize>")]
    pub char_start: Option<usize>,

    #[serde(default, deserialize_with = "lenient::index")]
    #[schemars(with = "Option<usize>")]
    pub char_end: Option<usize>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<f64>")]
    pub doc_start: Option<f64>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<f64>")]
    pub doc_end: Option<f64>,
}

/// Backend-normalized issue (`normalized_issues[]`)
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct NormalizedIssueRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub agent: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub severity: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub issue_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub reason: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub suggestion: Option<String>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<LocationRecord>")]
    pub location: Option<LocationRecord>,
}

/// Sentence-relative issue inside an agent section
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct SentenceIssueRecord {
    #[serde(default, deserialize_with = "lenient::index")]
    #[schemars(with = "Option<usize>")]
    pub sentence_index: Option<usize>,

    #[serde(default, deserialize_with = "lenient::index")]
    #[schemars(with = "Option<usize>")]
    pub char_start: Option<usize>,

    #[serde(default, deserialize_with = "lenient::index")]
    #[schemars(with = "Option<usize>")]
    pub char_end: Option<usize>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<LocationRecord>")]
    pub location: Option<LocationRecord>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub severity: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub issue_type: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub reason: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    #[schemars(with = "Option<String>")]
    pub suggestion: Option<String>,
}

impl SentenceIssueRecord {
    /// Sentence index, preferring the nested location
    #[must_use]
    pub fn sentence_index(&self) -> Option<usize> {
        self.location
            .as_ref()
            .and_then(|l| l.sentence_index)
            .or(self.sentence_index)
    }

    #[must_use]
    pub fn char_range(&self) -> (Option<usize>, Option<usize>) {
        let location = self.location.as_ref();
        (
            location.and_then(|l| l.char_start).or(self.char_start),
            location.and_then(|l| l.char_end).or(self.char_end),
        )
    }
}

/// One agent's output section
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct AgentSection {
    #[serde(default, deserialize_with = "lenient::objects")]
    #[schemars(with = "Vec<SentenceIssueRecord>")]
    pub issues: Vec<SentenceIssueRecord>,

    /// Tension-curve anomalies share the issue shape
    #[serde(default, deserialize_with = "lenient::objects")]
    #[schemars(with = "Vec<SentenceIssueRecord>")]
    pub anomalies: Vec<SentenceIssueRecord>,
}

/// Sentence position within the document (`split_map[]`)
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct SplitMapEntry {
    #[serde(default, deserialize_with = "lenient::index")]
    #[schemars(with = "Option<usize>")]
    pub sentence_index: Option<usize>,

    #[serde(default, deserialize_with = "lenient::index")]
    #[schemars(with = "Option<usize>")]
    pub doc_start: Option<usize>,

    #[serde(default, deserialize_with = "lenient::index")]
    #[schemars(with = "Option<usize>")]
    pub doc_end: Option<usize>,
}

impl SplitMapEntry {
    /// Document span of the sentence, when both ends are known and ordered
    #[must_use]
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match (self.doc_start, self.doc_end) {
            (Some(start), Some(end)) if end >= start => Some((start, end)),
            _ => None,
        }
    }
}
