//! The live, mutable representation of a candidate's load state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::{Candidate, SourceKind};

/// Load state of a subtitle record.
///
/// States only move forward: `Loading` may become `Ready`, `Failed`, or
/// `Loaded`; `Ready` may become `Loaded`; `Loaded` and `Failed` are
/// terminal. No record ever regresses to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// The candidate's asynchronous load is still in flight.
    Loading,
    /// Metadata is available; payload decoding may still be in progress.
    Ready,
    /// The load failed. Terminal.
    Failed,
    /// Fully loaded, payload and metadata complete. Terminal.
    Loaded,
}

impl LoadState {
    /// Returns true if the transition `self -> next` is allowed.
    pub fn can_advance_to(&self, next: LoadState) -> bool {
        use LoadState::*;
        matches!(
            (*self, next),
            (Loading, Ready) | (Loading, Failed) | (Loading, Loaded) | (Ready, Loaded)
        )
    }

    /// Returns true if the record should be visible to consumers.
    pub fn is_reportable(&self) -> bool {
        matches!(self, LoadState::Ready | LoadState::Loaded)
    }
}

/// A subtitle candidate as held in the shared store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleRecord {
    /// Unique identifier, shared with the raw candidate instance.
    pub id: String,

    /// Source kind.
    pub kind: SourceKind,

    /// Current load state.
    pub load_state: LoadState,

    /// Detected language, merged in when the load completes.
    pub language: Option<String>,

    /// Ranking weight. Higher rank means higher selection priority.
    pub rank: u32,

    /// Human-readable name, if known.
    pub name: Option<String>,

    /// Subtitle format.
    pub format: String,

    /// Decoded payload, merged in for online candidates only.
    pub data: Option<String>,

    /// Timestamp when the record was created.
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl SubtitleRecord {
    /// Creates a new record for a freshly fetched candidate.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        let now = Utc::now();
        Self {
            id: candidate.id.clone(),
            kind: candidate.kind,
            load_state: LoadState::Loading,
            language: candidate.language.clone(),
            rank: candidate.rank,
            name: candidate.name.clone(),
            format: candidate.format.clone(),
            data: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advances the load state, rejecting any backwards transition.
    ///
    /// Returns true if the state changed. A same-state "advance" is a no-op
    /// and returns false, which keeps state updates idempotent.
    pub fn advance(&mut self, next: LoadState) -> bool {
        if !self.load_state.can_advance_to(next) {
            return false;
        }
        self.load_state = next;
        self.updated_at = Utc::now();
        true
    }

    /// Merges a partial update into this record.
    ///
    /// Only fields present in the patch are touched; load-state changes go
    /// through `advance` so the forward-only invariant holds for patched
    /// updates too.
    pub fn apply(&mut self, patch: &RecordPatch) {
        if let Some(language) = &patch.language {
            self.language = Some(language.clone());
        }
        if let Some(data) = &patch.data {
            self.data = Some(data.clone());
        }
        if let Some(state) = patch.load_state {
            self.advance(state);
        }
        self.updated_at = Utc::now();
    }
}

/// A partial update to a subtitle record.
///
/// Writers merge patches by key rather than replacing records wholesale, so
/// concurrent in-flight loads for distinct ids never clobber each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    /// New language value, if any.
    pub language: Option<String>,

    /// New payload, if any.
    pub data: Option<String>,

    /// Requested load-state transition, if any.
    pub load_state: Option<LoadState>,
}

impl RecordPatch {
    /// A patch that only sets the language.
    pub fn language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Self::default()
        }
    }

    /// A patch that only advances the load state.
    pub fn state(state: LoadState) -> Self {
        Self {
            load_state: Some(state),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SubtitleRecord {
        SubtitleRecord::from_candidate(&Candidate {
            id: "sub-1".to_string(),
            kind: SourceKind::Local,
            src: "/tmp/movie.srt".to_string(),
            data: None,
            rank: 1,
            language: None,
            format: "srt".to_string(),
            name: None,
        })
    }

    #[test]
    fn loading_advances_to_ready_failed_or_loaded() {
        for next in [LoadState::Ready, LoadState::Failed, LoadState::Loaded] {
            let mut r = record();
            assert!(r.advance(next));
            assert_eq!(r.load_state, next);
        }
    }

    #[test]
    fn ready_advances_only_to_loaded() {
        let mut r = record();
        r.advance(LoadState::Ready);
        assert!(!r.advance(LoadState::Loading));
        assert!(!r.advance(LoadState::Failed));
        assert!(r.advance(LoadState::Loaded));
    }

    #[test]
    fn terminal_states_never_regress() {
        for terminal in [LoadState::Loaded, LoadState::Failed] {
            let mut r = record();
            r.load_state = terminal;
            for next in [
                LoadState::Loading,
                LoadState::Ready,
                LoadState::Failed,
                LoadState::Loaded,
            ] {
                assert!(!r.advance(next), "{:?} -> {:?} must be rejected", terminal, next);
            }
        }
    }

    #[test]
    fn apply_merges_without_replacing() {
        let mut r = record();
        r.apply(&RecordPatch::language("zh-CN"));
        assert_eq!(r.language.as_deref(), Some("zh-CN"));
        assert_eq!(r.format, "srt");

        r.apply(&RecordPatch {
            data: Some("payload".to_string()),
            ..RecordPatch::default()
        });
        assert_eq!(r.language.as_deref(), Some("zh-CN"));
        assert_eq!(r.data.as_deref(), Some("payload"));
    }

    #[test]
    fn apply_rejects_backwards_state() {
        let mut r = record();
        r.advance(LoadState::Loaded);
        r.apply(&RecordPatch::state(LoadState::Loading));
        assert_eq!(r.load_state, LoadState::Loaded);
    }
}
