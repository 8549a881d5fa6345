//! Current-subtitle selection.

use tracing::info;

use crate::model::SubtitleRecord;

use super::SubtitleManager;

impl SubtitleManager {
    /// Re-checks that the video's current selection is still valid after a
    /// refresh, picking a replacement when it is not.
    ///
    /// A valid existing pointer is kept. Otherwise the highest-ranked
    /// reportable candidate that has registered as selectable wins. When no
    /// candidate qualifies yet, the selection stays open and the
    /// selection-complete flag stays down until a later load completes.
    pub(crate) async fn check_current_selection(&self, video_id: &str) {
        let records = self.store.records_for(video_id).await;

        if let Some(current) = self.store.selection(video_id).await {
            if records.iter().any(|r| r.id == current) {
                self.store.set_selection_complete(true).await;
                return;
            }
        }

        let mut best: Option<&SubtitleRecord> = None;
        for record in &records {
            if !record.load_state.is_reportable() {
                continue;
            }
            if !self.store.is_selectable(&record.id).await {
                continue;
            }
            let better = match best {
                Some(current_best) => record.rank > current_best.rank,
                None => true,
            };
            if better {
                best = Some(record);
            }
        }

        if let Some(best) = best {
            info!(video_id, id = %best.id, rank = best.rank, "Selected subtitle");
            self.store.set_selection(video_id, &best.id).await;
            self.store.set_selection_complete(true).await;
        }
    }
}
