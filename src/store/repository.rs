//! The shared, keyed subtitle collection.
//!
//! All pipeline components read and write through this one handle. Writers
//! merge by key rather than replacing state wholesale, so concurrent
//! in-flight loads for distinct ids never clobber each other. Every
//! mutation bumps a revision channel that the reconciliation watcher
//! observes.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::debug;

use crate::model::{Candidate, RecordPatch, Segment, SourceKind, SubtitleRecord};

/// Cloneable handle to the shared subtitle collection.
#[derive(Clone)]
pub struct SubtitleStore {
    inner: Arc<RwLock<StoreInner>>,
    revision: Arc<watch::Sender<u64>>,
}

#[derive(Default)]
struct StoreInner {
    /// Live records by candidate id.
    records: HashMap<String, SubtitleRecord>,
    /// Raw candidate instances by id.
    instances: HashMap<String, Candidate>,
    /// Candidate id -> owning video id.
    video_index: HashMap<String, String>,
    /// Per-video candidate ids in insertion order.
    video_lists: HashMap<String, Vec<String>>,
    /// Global insertion order, for stable snapshots.
    order: Vec<String>,
    /// Per-video current-subtitle pointer.
    selections: HashMap<String, String>,
    /// Decoded coverage reported by the renderer, by candidate id.
    segments: HashMap<String, Vec<Segment>>,
    /// Ids registered as available for selection.
    selectable: HashSet<String>,
    /// False while a refresh has ranking in flux.
    selection_complete: bool,
}

impl SubtitleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
            revision: Arc::new(revision),
        }
    }

    /// Subscribes to store revisions. The receiver is notified after every
    /// mutation; the carried value is an opaque monotonic counter.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Merges freshly fetched candidates for a video into the store.
    ///
    /// New ids get a `Loading` record; existing ids keep their record and
    /// load state, with the raw instance and fetch metadata updated in
    /// place.
    pub async fn insert_candidates(&self, video_id: &str, candidates: Vec<Candidate>) {
        let mut inner = self.inner.write().await;
        for candidate in candidates {
            let id = candidate.id.clone();
            match inner.records.get_mut(&id) {
                Some(record) => {
                    record.rank = candidate.rank;
                    record.format = candidate.format.clone();
                    if candidate.name.is_some() {
                        record.name = candidate.name.clone();
                    }
                    if candidate.language.is_some() {
                        record.language = candidate.language.clone();
                    }
                }
                None => {
                    inner
                        .records
                        .insert(id.clone(), SubtitleRecord::from_candidate(&candidate));
                    inner.order.push(id.clone());
                    inner
                        .video_lists
                        .entry(video_id.to_string())
                        .or_default()
                        .push(id.clone());
                    inner.video_index.insert(id.clone(), video_id.to_string());
                }
            }
            inner.instances.insert(id, candidate);
        }
        drop(inner);
        self.bump();
    }

    /// Removes all online candidates of one video.
    ///
    /// Used by the orchestrator before a new online fetch so stale remote
    /// results never mix with fresh ones. Local and embedded entries, and
    /// every other video, are untouched.
    pub async fn clear_online(&self, video_id: &str) {
        let mut inner = self.inner.write().await;
        let removed: Vec<String> = inner
            .video_lists
            .get(video_id)
            .map(|ids| {
                ids.iter()
                    .filter(|id| {
                        inner
                            .records
                            .get(*id)
                            .map(|r| r.kind == SourceKind::Online)
                            .unwrap_or(false)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        for id in &removed {
            inner.records.remove(id);
            inner.instances.remove(id);
            inner.video_index.remove(id);
            inner.segments.remove(id);
            inner.selectable.remove(id);
        }
        inner.order.retain(|id| !removed.contains(id));
        if let Some(ids) = inner.video_lists.get_mut(video_id) {
            ids.retain(|id| !removed.contains(id));
        }
        let selection_stale = inner
            .selections
            .get(video_id)
            .map(|id| removed.contains(id))
            .unwrap_or(false);
        if selection_stale {
            inner.selections.remove(video_id);
        }
        drop(inner);

        if !removed.is_empty() {
            debug!(video_id, count = removed.len(), "Cleared stale online subtitles");
            self.bump();
        }
    }

    /// Returns the record for an id, if present.
    pub async fn record(&self, id: &str) -> Option<SubtitleRecord> {
        self.inner.read().await.records.get(id).cloned()
    }

    /// Returns the raw candidate instance for an id, if present.
    pub async fn instance(&self, id: &str) -> Option<Candidate> {
        self.inner.read().await.instances.get(id).cloned()
    }

    /// Merges a partial update into one record. Returns false if the id is
    /// unknown.
    pub async fn update_record(&self, id: &str, patch: &RecordPatch) -> bool {
        let mut inner = self.inner.write().await;
        let Some(record) = inner.records.get_mut(id) else {
            return false;
        };
        record.apply(patch);
        drop(inner);
        self.bump();
        true
    }

    /// Returns all records of a video, in insertion order.
    pub async fn records_for(&self, video_id: &str) -> Vec<SubtitleRecord> {
        let inner = self.inner.read().await;
        inner
            .video_lists
            .get(video_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.records.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the owning video of a candidate id.
    pub async fn video_of(&self, id: &str) -> Option<String> {
        self.inner.read().await.video_index.get(id).cloned()
    }

    /// Returns every record in global insertion order.
    pub async fn snapshot(&self) -> Vec<SubtitleRecord> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect()
    }

    /// Returns the current-subtitle pointer for a video.
    pub async fn selection(&self, video_id: &str) -> Option<String> {
        self.inner.read().await.selections.get(video_id).cloned()
    }

    /// Points a video's current subtitle at the given id.
    pub async fn set_selection(&self, video_id: &str, id: &str) {
        self.inner
            .write()
            .await
            .selections
            .insert(video_id.to_string(), id.to_string());
        self.bump();
    }

    /// Registers an id as available for selection.
    pub async fn register_selectable(&self, id: &str) {
        self.inner.write().await.selectable.insert(id.to_string());
        self.bump();
    }

    /// Returns true if the id has been registered as selectable.
    pub async fn is_selectable(&self, id: &str) -> bool {
        self.inner.read().await.selectable.contains(id)
    }

    /// Returns whether the last selection pass completed.
    pub async fn selection_complete(&self) -> bool {
        self.inner.read().await.selection_complete
    }

    /// Sets the selection-complete flag.
    pub async fn set_selection_complete(&self, complete: bool) {
        self.inner.write().await.selection_complete = complete;
        self.bump();
    }

    /// Records decoded coverage for a candidate, replacing prior coverage.
    pub async fn set_segments(&self, id: &str, segments: Vec<Segment>) {
        self.inner
            .write()
            .await
            .segments
            .insert(id.to_string(), segments);
        self.bump();
    }

    /// Returns decoded coverage for a candidate, if any was reported.
    pub async fn segments(&self, id: &str) -> Option<Vec<Segment>> {
        self.inner.read().await.segments.get(id).cloned()
    }

    /// Drops only the record for an id, leaving its raw instance behind.
    /// Normal mutations keep the two maps in step; this exists so tests can
    /// exercise lookups against a half-missing entry.
    #[cfg(test)]
    pub(crate) async fn remove_record(&self, id: &str) {
        self.inner.write().await.records.remove(id);
        self.bump();
    }
}

impl Default for SubtitleStore {
    fn default() -> Self {
        Self::new()
    }
}
