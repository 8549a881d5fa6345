//! Data model for subtitle candidates, records, and derived views.

pub mod candidate;
pub mod info;
pub mod record;

pub use candidate::{Candidate, SourceKind};
pub use info::{Segment, SubtitleInfo, VideoSubtitleList};
pub use record::{LoadState, RecordPatch, SubtitleRecord};
