//! Raw subtitle candidates as returned by source adapters.

use serde::{Deserialize, Serialize};

/// Where a subtitle candidate came from.
///
/// A closed set: adapters can only produce these three kinds, and every
/// branch on kind matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A sidecar file found next to the video.
    Local,
    /// A subtitle stream inside the video container.
    Embedded,
    /// A result from a remote subtitle search service.
    Online,
}

impl SourceKind {
    /// Returns the kind's name as used in logs and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Local => "local",
            SourceKind::Embedded => "embedded",
            SourceKind::Online => "online",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw subtitle reference produced by a source adapter.
///
/// Owned by the fetch orchestrator until merged into the shared store.
/// `data` carries a pre-fetched payload and is only present for online
/// candidates; local and embedded candidates reference their content via
/// `src` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier for this candidate.
    pub id: String,

    /// Source kind.
    pub kind: SourceKind,

    /// Source location: a file path, a container stream address, or a
    /// remote identifier, depending on `kind`.
    pub src: String,

    /// Pre-fetched payload. Present only for online candidates.
    pub data: Option<String>,

    /// Ranking weight. Higher rank means higher selection priority.
    pub rank: u32,

    /// Detected language, if the source knows it up front.
    pub language: Option<String>,

    /// Subtitle format (e.g. "srt", "ass", "webvtt").
    pub format: String,

    /// Human-readable name, if the source provides one.
    pub name: Option<String>,
}
