//! Load-completion handling: merging derived metadata back into the store.

use crate::error::ManagerError;
use crate::model::{RecordPatch, SourceKind};

use super::SubtitleManager;

/// A subtitle instance whose asynchronous load just finished.
///
/// Produced by the external loader; `language` comes from the loader's
/// detected metadata, `data` carries the decoded payload for online
/// subtitles.
#[derive(Debug, Clone)]
pub struct LoadedSubtitle {
    /// Candidate identifier.
    pub id: String,

    /// Source kind.
    pub kind: SourceKind,

    /// Language detected during loading.
    pub language: String,

    /// Decoded payload; meaningful for online subtitles only.
    pub data: Option<String>,
}

impl SubtitleManager {
    /// Reacts to a candidate finishing its load.
    ///
    /// Registers the id as available for selection and merges the detected
    /// language into its record; online instances additionally merge their
    /// payload. Local and embedded candidates never inline `data`, their
    /// content stays referenced by `src`. Finishes by re-checking the owning
    /// video's selection, so a refresh that left the selection open gets
    /// closed by the first qualifying load. Idempotent per call; merges for
    /// distinct ids target disjoint keys.
    pub async fn on_loaded(&self, instance: &LoadedSubtitle) -> Result<(), ManagerError> {
        self.store.register_selectable(&instance.id).await;

        let mut patch = RecordPatch::language(instance.language.clone());
        if instance.kind == SourceKind::Online {
            patch.data = instance.data.clone();
        }

        if !self.store.update_record(&instance.id, &patch).await {
            return Err(ManagerError::RecordNotFound {
                id: instance.id.clone(),
            });
        }

        if let Some(video_id) = self.store.video_of(&instance.id).await {
            self.check_current_selection(&video_id).await;
        }
        Ok(())
    }
}
