//! The fetch orchestrator: fans out to the requested sources and merges
//! their candidates into the shared store.

use std::collections::HashSet;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ManagerError;
use crate::model::SourceKind;
use crate::source::attempt;

use super::SubtitleManager;

impl SubtitleManager {
    /// Refreshes the candidate set for a video from the requested sources.
    ///
    /// Every requested source is attempted; a failing source degrades to an
    /// empty contribution and never aborts the others. Online results are
    /// fetched once per preferred language, sequentially in the supplied
    /// order, after the video's stale online candidates are cleared.
    /// Resolves only after the current selection has been re-checked, the
    /// language preference persisted, and the finished signal emitted.
    pub async fn refresh(
        &self,
        kinds: &[SourceKind],
        video_id: &str,
        preferred_languages: &[String],
    ) -> Result<(), ManagerError> {
        let kinds: HashSet<SourceKind> = kinds.iter().copied().collect();
        if kinds.is_empty() {
            return Err(ManagerError::NoValidType);
        }

        let generation = Uuid::new_v4();
        info!(
            %generation,
            video_id,
            kinds = ?kinds.iter().map(|k| k.as_str()).collect::<Vec<_>>(),
            languages = ?preferred_languages,
            "Refreshing subtitles"
        );

        // Ranking is in flux until the selection check below runs.
        self.store.set_selection_complete(false).await;

        // Stale remote results must never mix with a fresh fetch.
        if kinds.contains(&SourceKind::Online) {
            self.store.clear_online(video_id).await;
        }

        let local = async {
            if kinds.contains(&SourceKind::Local) {
                attempt("local", self.local.scan(video_id, &self.sources.formats)).await
            } else {
                Vec::new()
            }
        };
        let embedded = async {
            if kinds.contains(&SourceKind::Embedded) {
                attempt(
                    "embedded",
                    self.embedded.extract(video_id, &self.sources.codecs),
                )
                .await
            } else {
                Vec::new()
            }
        };
        let online = async {
            let mut found = Vec::new();
            if kinds.contains(&SourceKind::Online) {
                for language in preferred_languages {
                    found.extend(attempt("online", self.online.search(video_id, language)).await);
                }
            }
            found
        };

        let (local, embedded, online) = tokio::join!(local, embedded, online);

        let mut candidates = local;
        candidates.extend(embedded);
        candidates.extend(online);
        info!(%generation, video_id, count = candidates.len(), "Subtitle fetch complete");
        self.store.insert_candidates(video_id, candidates).await;

        self.check_current_selection(video_id).await;

        if let Err(e) = self.preferences.store(video_id, preferred_languages).await {
            warn!(video_id, error = %e, "Failed to persist language preference");
        }

        self.notify(super::SubtitleEvent::RefreshFinished {
            video_id: video_id.to_string(),
        })
        .await;

        Ok(())
    }
}
