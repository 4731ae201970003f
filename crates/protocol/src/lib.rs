//! Reading analysis results into overlay issues.
//!
//! The backend reports issue locations in three shapes, tried in order:
//!
//! 1. `highlights`: document offsets at the top level of each record
//! 2. `normalized_issues`: document offsets under `location`
//! 3. per-agent sections (`tone`, `logic`, ...) with sentence-relative
//!    offsets, resolved through `split_sentences` and `split_map`
//!
//! All of them end up as [`manuscript_overlay::Issue`] values in document
//! coordinates, so the overlay pipeline only ever sees one shape.

use schemars::Schema;

mod analysis;
mod error;
mod lenient;
mod records;
mod sentences;

pub use analysis::{AnalysisResult, IssueSource};
pub use error::{ProtocolError, Result};
pub use records::{
    AgentSection, HighlightRecord, LocationRecord, NormalizedIssueRecord, SentenceIssueRecord,
    SplitMapEntry,
};

/// JSON Schema of the accepted analysis payload
#[must_use]
pub fn analysis_schema() -> Schema {
    schemars::schema_for!(AnalysisResult)
}
