//! Reconciliation: incremental propagation of collection changes.
//!
//! The diff itself is a pure function over two snapshots; this module also
//! provides the driver loop that feeds it from the store's revision
//! channel.

pub mod diff;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::manager::{SubtitleEvent, SubtitleManager};
use crate::model::SubtitleRecord;

impl SubtitleManager {
    /// Reacts to a change of the shared collection's snapshot.
    ///
    /// Entries newly ready or loaded since `old_list` are grouped by their
    /// owning video, and one `SubtitleListUpdated` event is emitted per
    /// video, carrying only that video's new entries. Entries still
    /// loading, entries that ended failed, and entries unchanged between
    /// the snapshots are never reported.
    pub async fn on_collection_change(
        &self,
        new_list: &[SubtitleRecord],
        old_list: &[SubtitleRecord],
    ) {
        let delta = diff::new_reportable(new_list, old_list);
        if delta.is_empty() {
            return;
        }

        let mut pairs = Vec::with_capacity(delta.len());
        for record in delta {
            match self.store().video_of(&record.id).await {
                Some(video_id) => pairs.push((video_id, record)),
                None => warn!(id = %record.id, "Subtitle has no owning video, skipping"),
            }
        }

        for (video_id, entries) in diff::group_by_video(pairs) {
            debug!(video_id, count = entries.len(), "Publishing subtitle list delta");
            self.notify(SubtitleEvent::SubtitleListUpdated { video_id, entries })
                .await;
        }
    }
}

/// Drives reconciliation from store revisions.
///
/// Holds the previous snapshot and hands (new, old) pairs to the manager
/// whenever the store signals a change. Mutations landing between two
/// wakeups coalesce into one diff.
pub struct CollectionWatcher {
    manager: Arc<SubtitleManager>,
}

impl CollectionWatcher {
    /// Creates a watcher over the manager's store.
    pub fn new(manager: Arc<SubtitleManager>) -> Self {
        Self { manager }
    }

    /// Runs until the store is dropped.
    pub async fn run(self) {
        let mut revisions = self.manager.store().subscribe();
        let mut previous = self.manager.store().snapshot().await;

        while revisions.changed().await.is_ok() {
            let current = self.manager.store().snapshot().await;
            self.manager.on_collection_change(&current, &previous).await;
            previous = current;
        }

        debug!("Subtitle store closed, collection watcher stopping");
    }
}
