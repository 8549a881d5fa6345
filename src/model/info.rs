//! Consumer-facing derived subtitle descriptors.

use serde::{Deserialize, Serialize};

use super::candidate::SourceKind;

/// A decoded coverage interval `[start, end]`, in seconds. Both bounds are
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Interval start.
    pub start: f64,
    /// Interval end.
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// The canonical, derived subtitle descriptor.
///
/// Never stored: always produced on demand from a record plus its raw
/// candidate instance, so it cannot go stale independently of its source.
/// `data` is present iff the source kind is online. `name`, `rank`, and
/// `video_segments` are filled in by the list assembler only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleInfo {
    /// Candidate identifier.
    pub id: String,

    /// Source kind.
    pub kind: SourceKind,

    /// Source location.
    pub src: String,

    /// Subtitle format.
    pub format: String,

    /// Detected language, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Pre-fetched payload; online candidates only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Human-readable name; list entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Ranking weight; list entries only. Higher rank wins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,

    /// Decoded coverage; only on the currently selected list entry, and
    /// only when the renderer has reported decode progress for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_segments: Option<Vec<Segment>>,
}

/// The full candidate list for one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSubtitleList {
    /// The owning video.
    pub video_src: String,

    /// Subtitle descriptors in store order. At most one entry carries
    /// `video_segments`.
    pub subtitles: Vec<SubtitleInfo>,
}
