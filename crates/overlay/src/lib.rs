//! # Manuscript Overlay
//!
//! Turns a manuscript and the issue spans reported by independent analysis
//! agents into a flat, non-overlapping list of display segments.
//!
//! ## Architecture
//!
//! ```text
//! Document text + Issue[]
//!     │
//!     ├──> Text preparation
//!     │    └─> CRLF → LF, Unicode NFC
//!     │
//!     ├──> Span Normalizer
//!     │    ├─> Floor and clamp spans into [0, len]
//!     │    └─> Drop non-finite and empty spans
//!     │
//!     ├──> Boundary Partitioner
//!     │    └─> Split [0, len) at every issue start/end
//!     │
//!     └──> Segment Classifier
//!          ├─> Collect issues strictly overlapping each segment
//!          └─> Pick the primary issue (severity desc, agent asc)
//! ```
//!
//! Offsets are counted in an [`OffsetUnit`]: Unicode scalar values by
//! default, or UTF-16 code units for offsets computed by JavaScript.
//!
//! ## Example
//!
//! ```rust
//! use manuscript_overlay::{Issue, OverlayEngine, Severity};
//!
//! let engine = OverlayEngine::default();
//! let issues = vec![
//!     Issue::new("x", 2.0, 6.0).severity(Severity::High),
//!     Issue::new("y", 4.0, 8.0).severity(Severity::Low),
//! ];
//!
//! let overlay = engine.overlay("ABCDEFGHIJ", &issues);
//! for segment in overlay.segments() {
//!     let primary = segment.primary.map(|issue| issue.agent()).unwrap_or("-");
//!     println!("{} {:?} {}", segment.key(), segment.text, primary);
//! }
//! ```

mod classifier;
mod config;
mod engine;
mod error;
mod normalizer;
mod partitioner;
mod text;
mod types;

pub use classifier::{classify, Classification};
pub use config::{OffsetUnit, OverlayConfig, SeverityRanking, TextOptions};
pub use engine::{Overlay, OverlayEngine, OverlayStats, Segment, SegmentView};
pub use error::{OverlayError, Result};
pub use normalizer::{clamp_span, normalize, normalize_in, DropCounts, DropReason};
pub use partitioner::partition;
pub use text::{normalize_newlines, normalize_unicode, prepare, TextIndex};
pub use types::{Issue, NormalizedIssue, Severity, Span};
