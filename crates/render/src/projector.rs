use crate::color::Color;
use crate::palette::Palette;
use manuscript_overlay::{NormalizedIssue, Overlay, SegmentView, Severity};
use serde::Serialize;

/// Tooltip label for issues without an agent
const UNKNOWN_AGENT: &str = "unknown";

/// Tooltip text when an issue carries no explanation at all
const FALLBACK_REASON: &str = "Issue found";

/// One segment, ready for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSegment {
    /// Stable list key, `"{start}-{end}"`
    pub key: String,
    pub start: usize,
    pub end: usize,
    pub text: String,

    /// `None` for plain text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<Decoration>,
}

impl RenderedSegment {
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.decoration.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoration {
    /// Agent of the primary issue
    pub agent: String,

    /// Highlight background
    pub color: Color,

    /// Tooltip border: the highlight color without transparency
    pub border_color: Color,

    /// One entry per covering issue, primary first
    pub tooltip: Vec<TooltipEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipEntry {
    pub agent: String,

    /// Badge color; `None` for agents the palette does not know
    pub agent_color: Option<Color>,

    pub severity: Option<Severity>,
    pub label: Option<String>,
    pub reason: String,
}

/// Maps overlay segments to display decorations
#[derive(Debug, Clone, Default)]
pub struct Projector {
    palette: Palette,
}

impl Projector {
    #[must_use]
    pub const fn new(palette: Palette) -> Self {
        Self { palette }
    }

    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Project every segment of `overlay`, left to right
    #[must_use]
    pub fn project(&self, overlay: &Overlay<'_>) -> Vec<RenderedSegment> {
        overlay
            .segments()
            .map(|segment| self.project_segment(&segment))
            .collect()
    }

    #[must_use]
    pub fn project_segment(&self, segment: &SegmentView<'_>) -> RenderedSegment {
        let decoration = segment.primary.map(|primary| {
            let color = self.palette.color_for(primary.agent());
            Decoration {
                agent: primary.agent().to_string(),
                color,
                border_color: color.opaque(),
                tooltip: segment
                    .issues
                    .iter()
                    .map(|issue| self.tooltip_entry(issue))
                    .collect(),
            }
        });

        RenderedSegment {
            key: segment.key(),
            start: segment.span.start,
            end: segment.span.end,
            text: segment.text.to_string(),
            decoration,
        }
    }

    fn tooltip_entry(&self, issue: &NormalizedIssue) -> TooltipEntry {
        let raw = &issue.issue;
        let agent = if raw.agent.is_empty() {
            UNKNOWN_AGENT
        } else {
            raw.agent.as_str()
        };
        let reason = raw
            .reason
            .as_deref()
            .or(raw.suggestion.as_deref())
            .or(raw.label.as_deref())
            .unwrap_or(FALLBACK_REASON);

        TooltipEntry {
            agent: agent.to_string(),
            agent_color: self.palette.get(&raw.agent),
            severity: raw.severity,
            label: raw.label.clone(),
            reason: reason.to_string(),
        }
    }
}
