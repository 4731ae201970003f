use crate::color::Color;
use crate::error::{RenderError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Display colors per agent.
///
/// Agents missing from the palette are drawn in the fallback color.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    agents: BTreeMap<String, Color>,
    fallback: Color,
}

const BUILTIN: [(&str, Color); 7] = [
    ("tone", Color::rgba(92, 107, 192, 0.5)),
    ("logic", Color::rgba(255, 167, 38, 0.5)),
    ("trauma", Color::rgba(211, 47, 47, 0.6)),
    ("hate_bias", Color::rgba(255, 64, 129, 0.6)),
    ("genre_cliche", Color::rgba(66, 165, 245, 0.5)),
    ("spelling", Color::rgba(0, 188, 212, 0.6)),
    ("tension", Color::rgba(139, 195, 74, 0.5)),
];

const BUILTIN_FALLBACK: Color = Color::rgba(189, 189, 189, 0.4);

impl Default for Palette {
    fn default() -> Self {
        Self {
            agents: BUILTIN
                .iter()
                .map(|(agent, color)| ((*agent).to_string(), *color))
                .collect(),
            fallback: BUILTIN_FALLBACK,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPalette {
    /// Color for agents without an entry
    default: Option<String>,

    /// Start from an empty palette instead of the built-in colors
    #[serde(default)]
    replace_builtin: bool,

    #[serde(default)]
    agents: BTreeMap<String, String>,
}

impl Palette {
    /// Palette with no agent colors
    #[must_use]
    pub fn empty(fallback: Color) -> Self {
        Self {
            agents: BTreeMap::new(),
            fallback,
        }
    }

    /// Builder: set an agent color
    #[must_use]
    pub fn with_agent(mut self, agent: impl Into<String>, color: Color) -> Self {
        self.agents.insert(agent.into(), color);
        self
    }

    /// Color registered for `agent`, if any
    #[must_use]
    pub fn get(&self, agent: &str) -> Option<Color> {
        self.agents.get(agent).copied()
    }

    /// Color for `agent`, falling back to the default color
    #[must_use]
    pub fn color_for(&self, agent: &str) -> Color {
        self.get(agent).unwrap_or(self.fallback)
    }

    #[must_use]
    pub const fn fallback(&self) -> Color {
        self.fallback
    }

    pub fn agents(&self) -> impl Iterator<Item = (&str, Color)> {
        self.agents.iter().map(|(agent, color)| (agent.as_str(), *color))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let palette = Self::from_bytes(&bytes)?;
        log::debug!(
            "loaded palette from {} ({} agents)",
            path.display(),
            palette.agents.len()
        );
        Ok(palette)
    }

    /// Parse a palette from JSON, or TOML when the bytes are not JSON.
    ///
    /// Entries override the built-in colors unless `replace_builtin` is set.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes)?;

        let mut palette = if raw.replace_builtin {
            Self::empty(BUILTIN_FALLBACK)
        } else {
            Self::default()
        };
        if let Some(value) = raw.default {
            palette.fallback =
                Color::parse(&value).ok_or_else(|| RenderError::invalid_color("default", value))?;
        }
        for (agent, value) in raw.agents {
            let color = Color::parse(&value)
                .ok_or_else(|| RenderError::invalid_color(agent.clone(), value))?;
            palette.agents.insert(agent, color);
        }
        Ok(palette)
    }
}

fn parse_raw(bytes: &[u8]) -> Result<RawPalette> {
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes)
                .map_err(|err| RenderError::invalid_palette(format!("{json_err}; {err}")))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                RenderError::invalid_palette(format!(
                    "not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}"
                ))
            })?;
            serde_json::to_value(toml_value).map_err(|err| {
                RenderError::invalid_palette(format!("failed to convert TOML palette: {err}"))
            })?
        }
    };

    if !value.is_object() {
        return Err(RenderError::invalid_palette("palette must be an object"));
    }
    serde_json::from_value(value).map_err(|err| RenderError::invalid_palette(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_palette_covers_known_agents() {
        let palette = Palette::default();
        for agent in ["tone", "logic", "trauma", "hate_bias", "genre_cliche", "spelling", "tension"] {
            assert!(palette.get(agent).is_some(), "missing {agent}");
        }
        assert_eq!(palette.color_for("mystery"), BUILTIN_FALLBACK);
    }

    #[test]
    fn json_overrides_builtin() {
        let palette = Palette::from_bytes(
            br##"{"default": "#000000", "agents": {"tone": "rgb(1, 2, 3)", "pacing": "#abc"}}"##,
        )
        .unwrap();
        assert_eq!(palette.get("tone"), Some(Color::rgb(1, 2, 3)));
        assert_eq!(palette.get("pacing"), Some(Color::rgb(170, 187, 204)));
        assert!(palette.get("logic").is_some());
        assert_eq!(palette.fallback(), Color::rgb(0, 0, 0));
    }

    #[test]
    fn toml_palette_can_replace_builtin() {
        let palette = Palette::from_bytes(
            br#"
replace_builtin = true

[agents]
tone = "rgba(10, 20, 30, 0.25)"
"#,
        )
        .unwrap();
        assert_eq!(palette.agents().count(), 1);
        assert_eq!(palette.get("logic"), None);
        assert_eq!(palette.fallback(), BUILTIN_FALLBACK);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Palette::from_bytes(br#"{"colours": {}}"#).unwrap_err();
        assert!(matches!(err, RenderError::InvalidPalette(_)));
    }

    #[test]
    fn bad_color_names_the_agent() {
        let err = Palette::from_bytes(br#"{"agents": {"tone": "blueish"}}"#).unwrap_err();
        match err {
            RenderError::InvalidColor { key, value } => {
                assert_eq!(key, "tone");
                assert_eq!(value, "blueish");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(Palette::from_bytes(b"[agents").is_err());
        assert!(Palette::from_bytes(b"[1, 2]").is_err());
    }
}
