use crate::projector::RenderedSegment;
use std::fmt::Write;

/// Render projected segments as an HTML fragment.
///
/// Plain segments become `<span>`, highlighted ones `<mark>` with the primary
/// agent color and a `title` tooltip listing every covering issue.
#[must_use]
pub fn render_html(segments: &[RenderedSegment]) -> String {
    let mut out = String::from(r#"<div class="manuscript-overlay" style="white-space: pre-wrap">"#);
    for segment in segments {
        let text = escape(&segment.text);
        match &segment.decoration {
            None => {
                let _ = write!(out, r#"<span data-key="{}">{text}</span>"#, segment.key);
            }
            Some(decoration) => {
                let title = decoration
                    .tooltip
                    .iter()
                    .map(|entry| format!("{}: {}", entry.agent, entry.reason))
                    .collect::<Vec<_>>()
                    .join("\n");
                let _ = write!(
                    out,
                    r#"<mark data-key="{}" data-agent="{}" style="background-color: {}; border-color: {}" title="{}">{text}</mark>"#,
                    segment.key,
                    escape(&decoration.agent),
                    decoration.color,
                    decoration.border_color,
                    escape(&title),
                );
            }
        }
    }
    out.push_str("</div>");
    out
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
