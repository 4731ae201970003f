use crate::error::{ProtocolError, Result};
use crate::lenient;
use crate::records::{AgentSection, HighlightRecord, NormalizedIssueRecord, SplitMapEntry};
use crate::sentences::to_document_issue;
use manuscript_overlay::{Issue, Severity};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which part of the payload issues were read from
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueSource {
    Highlights,
    NormalizedIssues,
    Sentences,
    None,
}

/// Analysis result as returned by the backend.
///
/// Only the fields that carry issue locations are read; everything else in
/// the payload (scores, summaries, chat logs) is ignored.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient::objects")]
    #[schemars(with = "Vec<HighlightRecord>")]
    pub highlights: Vec<HighlightRecord>,

    #[serde(default, deserialize_with = "lenient::objects")]
    #[schemars(with = "Vec<NormalizedIssueRecord>")]
    pub normalized_issues: Vec<NormalizedIssueRecord>,

    #[serde(default, deserialize_with = "lenient::strings")]
    #[schemars(with = "Vec<String>")]
    pub split_sentences: Vec<String>,

    #[serde(default, deserialize_with = "lenient::objects")]
    #[schemars(with = "Vec<SplitMapEntry>")]
    pub split_map: Vec<SplitMapEntry>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<AgentSection>")]
    pub tone: Option<AgentSection>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<AgentSection>")]
    pub logic: Option<AgentSection>,

    /// Older backends report the logic agent under this name
    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<AgentSection>")]
    pub causality: Option<AgentSection>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<AgentSection>")]
    pub trauma: Option<AgentSection>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<AgentSection>")]
    pub hate_bias: Option<AgentSection>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<AgentSection>")]
    pub genre_cliche: Option<AgentSection>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<AgentSection>")]
    pub spelling: Option<AgentSection>,

    #[serde(default, deserialize_with = "lenient::value")]
    #[schemars(with = "Option<AgentSection>")]
    pub tension_curve: Option<AgentSection>,
}

impl AnalysisResult {
    /// Parse a JSON payload; the top level must be an object
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Parse a JSON value.
    ///
    /// An analysis detail envelope (`{"id": .., "status": .., "result": {..}}`)
    /// is unwrapped to its `result` object.
    pub fn from_value(value: Value) -> Result<Self> {
        let value = unwrap_envelope(value);
        if !value.is_object() {
            return Err(ProtocolError::not_an_object(json_kind(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Agent sections in display order, with their agent names
    fn agent_sections(&self) -> Vec<(&'static str, &AgentSection)> {
        [
            ("tone", self.tone.as_ref()),
            ("logic", self.logic.as_ref().or(self.causality.as_ref())),
            ("trauma", self.trauma.as_ref()),
            ("hate_bias", self.hate_bias.as_ref()),
            ("genre_cliche", self.genre_cliche.as_ref()),
            ("spelling", self.spelling.as_ref()),
            ("tension", self.tension_curve.as_ref()),
        ]
        .into_iter()
        .filter_map(|(agent, section)| section.map(|s| (agent, s)))
        .collect()
    }

    fn has_sentence_issues(&self) -> bool {
        !self.split_sentences.is_empty()
            && !self.split_map.is_empty()
            && self
                .agent_sections()
                .iter()
                .any(|(_, s)| !s.issues.is_empty() || !s.anomalies.is_empty())
    }

    /// The shape issues will be read from.
    ///
    /// Document-level highlights win, then normalized issues, then the
    /// sentence-relative agent sections.
    #[must_use]
    pub fn source(&self) -> IssueSource {
        if !self.highlights.is_empty() {
            IssueSource::Highlights
        } else if !self.normalized_issues.is_empty() {
            IssueSource::NormalizedIssues
        } else if self.has_sentence_issues() {
            IssueSource::Sentences
        } else {
            IssueSource::None
        }
    }

    /// Map the payload into overlay issues in document coordinates
    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        let source = self.source();
        let issues: Vec<Issue> = match source {
            IssueSource::Highlights => self.highlights.iter().map(highlight_issue).collect(),
            IssueSource::NormalizedIssues => self
                .normalized_issues
                .iter()
                .map(normalized_issue)
                .collect(),
            IssueSource::Sentences => self
                .agent_sections()
                .into_iter()
                .flat_map(|(agent, section)| {
                    section
                        .issues
                        .iter()
                        .chain(&section.anomalies)
                        .filter_map(move |record| {
                            to_document_issue(agent, record, &self.split_sentences, &self.split_map)
                        })
                })
                .collect(),
            IssueSource::None => Vec::new(),
        };
        log::debug!("read {} issues from {source:?}", issues.len());
        issues
    }
}

fn span_field(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

fn highlight_issue(record: &HighlightRecord) -> Issue {
    Issue {
        agent: record.agent.clone().unwrap_or_default(),
        severity: record.severity.as_deref().and_then(Severity::parse),
        label: record.label.clone().or_else(|| record.issue_type.clone()),
        reason: record.reason.clone(),
        suggestion: None,
        start: span_field(record.doc_start),
        end: span_field(record.doc_end),
    }
}

fn normalized_issue(record: &NormalizedIssueRecord) -> Issue {
    let location = record.location.as_ref();
    Issue {
        agent: record.agent.clone().unwrap_or_default(),
        severity: record.severity.as_deref().and_then(Severity::parse),
        label: record.issue_type.clone(),
        reason: record.reason.clone(),
        suggestion: record.suggestion.clone(),
        start: span_field(location.and_then(|l| l.doc_start)),
        end: span_field(location.and_then(|l| l.doc_end)),
    }
}

const PAYLOAD_KEYS: [&str; 3] = ["highlights", "normalized_issues", "split_map"];

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if map.get("result").is_some_and(Value::is_object)
                && !PAYLOAD_KEYS.iter().any(|key| map.contains_key(*key)) =>
        {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
