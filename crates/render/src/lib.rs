//! Display projection for manuscript overlays
//!
//! Turns the segments of a [`manuscript_overlay::Overlay`] into
//! renderer-ready records: primary agent color, an opaque border color and
//! tooltip entries for every covering issue. Colors come from a [`Palette`],
//! either the built-in one or a JSON/TOML file.
//!
//! ```
//! use manuscript_overlay::{Issue, OverlayEngine};
//! use manuscript_render::{render_html, Projector};
//!
//! let overlay = OverlayEngine::default().overlay("a <b>", &[Issue::new("tone", 2.0, 5.0)]);
//! let segments = Projector::default().project(&overlay);
//! assert_eq!(segments.len(), 2);
//! assert!(render_html(&segments).contains("&lt;b&gt;"));
//! ```

mod color;
mod error;
mod html;
mod palette;
mod projector;

pub use color::Color;
pub use error::{RenderError, Result};
pub use html::render_html;
pub use palette::Palette;
pub use projector::{Decoration, Projector, RenderedSegment, TooltipEntry};
