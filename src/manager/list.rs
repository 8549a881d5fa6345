//! Candidate normalization and per-video list assembly.

use tracing::warn;

use crate::error::ManagerError;
use crate::model::{SourceKind, SubtitleInfo, VideoSubtitleList};

use super::SubtitleManager;

impl SubtitleManager {
    /// Derives the canonical descriptor for one candidate.
    ///
    /// Pure given the store's instance and record for the id; fails if
    /// either is missing. `data` is populated only for online candidates,
    /// whose payload was pre-fetched; local and embedded content stays
    /// referenced by `src`.
    pub async fn subtitle_info(&self, id: &str) -> Result<SubtitleInfo, ManagerError> {
        let instance = self
            .store
            .instance(id)
            .await
            .ok_or_else(|| ManagerError::InstanceNotFound { id: id.to_string() })?;
        let record = self
            .store
            .record(id)
            .await
            .ok_or_else(|| ManagerError::RecordNotFound { id: id.to_string() })?;

        let data = match instance.kind {
            SourceKind::Online => instance.data.clone(),
            SourceKind::Local | SourceKind::Embedded => None,
        };

        Ok(SubtitleInfo {
            id: id.to_string(),
            kind: instance.kind,
            src: instance.src,
            format: record.format,
            language: record.language,
            data,
            name: None,
            rank: None,
            video_segments: None,
        })
    }

    /// Assembles the consumer-facing subtitle list for a video.
    ///
    /// Entries appear in store order; ranking is carried in the `rank`
    /// field (higher wins) and interpreted by the consumer. The entry
    /// matching the video's current selection is annotated with decoded
    /// coverage when the renderer has reported any. An entry whose backing
    /// data went missing is skipped, never aborting its siblings.
    pub async fn build_list(&self, video_src: &str) -> Result<VideoSubtitleList, ManagerError> {
        let records = self.store.records_for(video_src).await;
        let selection = self.store.selection(video_src).await;

        let mut subtitles = Vec::with_capacity(records.len());
        for record in records {
            let mut info = match self.subtitle_info(&record.id).await {
                Ok(info) => info,
                Err(e) => {
                    warn!(id = %record.id, error = %e, "Skipping subtitle with missing backing data");
                    continue;
                }
            };
            info.name = record.name.clone();
            info.rank = Some(record.rank);

            if selection.as_deref() == Some(record.id.as_str()) {
                info.video_segments = self.store.segments(&record.id).await;
            }

            subtitles.push(info);
        }

        Ok(VideoSubtitleList {
            video_src: video_src.to_string(),
            subtitles,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::config::model::SourcesConfig;
    use crate::error::SourceError;
    use crate::model::Candidate;
    use crate::source::{DisabledSearcher, EmbeddedExtractor, LocalScanner};
    use crate::store::{MemoryPreferenceStore, SubtitleStore};

    use super::*;

    struct IdleLocal;

    #[async_trait]
    impl LocalScanner for IdleLocal {
        async fn scan(&self, _: &str, _: &[String]) -> Result<Vec<Candidate>, SourceError> {
            Ok(Vec::new())
        }
    }

    struct IdleEmbedded;

    #[async_trait]
    impl EmbeddedExtractor for IdleEmbedded {
        async fn extract(&self, _: &str, _: &[String]) -> Result<Vec<Candidate>, SourceError> {
            Ok(Vec::new())
        }
    }

    fn manager(store: SubtitleStore) -> SubtitleManager {
        let (events, _) = tokio::sync::mpsc::channel(8);
        SubtitleManager::new(
            store,
            SourcesConfig::default(),
            Arc::new(IdleLocal),
            Arc::new(IdleEmbedded),
            Arc::new(DisabledSearcher),
            MemoryPreferenceStore::new(),
            events,
        )
    }

    #[tokio::test]
    async fn subtitle_info_fails_when_only_the_record_is_gone() {
        let store = SubtitleStore::new();
        store
            .insert_candidates(
                "vid1",
                vec![Candidate {
                    id: "a".to_string(),
                    kind: SourceKind::Local,
                    src: "/media/a.srt".to_string(),
                    data: None,
                    rank: 1,
                    language: None,
                    format: "srt".to_string(),
                    name: None,
                }],
            )
            .await;
        store.remove_record("a").await;

        let manager = manager(store);
        let err = manager.subtitle_info("a").await.unwrap_err();
        assert!(matches!(err, ManagerError::RecordNotFound { .. }));
    }
}
