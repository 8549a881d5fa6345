//! The subtitle manager: fetch orchestration, normalization, list
//! assembly, load completion, and selection.

pub mod list;
pub mod loaded;
pub mod refresh;
pub mod selection;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::config::model::SourcesConfig;
use crate::model::SubtitleRecord;
use crate::source::{EmbeddedExtractor, LocalScanner, OnlineSearcher};
use crate::store::{PreferenceStore, SubtitleStore};

pub use loaded::LoadedSubtitle;

/// Notifications pushed to consumers (the UI layer).
#[derive(Debug, Clone)]
pub enum SubtitleEvent {
    /// A refresh cycle finished, including its degraded branches.
    RefreshFinished {
        /// The refreshed video.
        video_id: String,
    },

    /// New ready or loaded entries for one video. Carries only that
    /// video's new entries, never a full-state resend.
    SubtitleListUpdated {
        /// The owning video.
        video_id: String,
        /// The new entries, in collection order.
        entries: Vec<SubtitleRecord>,
    },
}

/// Coordinates subtitle acquisition and state for all videos.
///
/// All mutation goes through the injected [`SubtitleStore`]; the three
/// source adapters and the preference store are narrow async collaborators
/// that may fail independently.
pub struct SubtitleManager {
    store: SubtitleStore,
    sources: SourcesConfig,
    local: Arc<dyn LocalScanner>,
    embedded: Arc<dyn EmbeddedExtractor>,
    online: Arc<dyn OnlineSearcher>,
    preferences: Arc<dyn PreferenceStore>,
    events: mpsc::Sender<SubtitleEvent>,
}

impl SubtitleManager {
    /// Creates a manager over the given store and collaborators.
    pub fn new(
        store: SubtitleStore,
        sources: SourcesConfig,
        local: Arc<dyn LocalScanner>,
        embedded: Arc<dyn EmbeddedExtractor>,
        online: Arc<dyn OnlineSearcher>,
        preferences: Arc<dyn PreferenceStore>,
        events: mpsc::Sender<SubtitleEvent>,
    ) -> Self {
        Self {
            store,
            sources,
            local,
            embedded,
            online,
            preferences,
            events,
        }
    }

    /// Returns the shared store handle.
    pub fn store(&self) -> &SubtitleStore {
        &self.store
    }

    /// Fire-and-forget event emission.
    pub(crate) async fn notify(&self, event: SubtitleEvent) {
        if self.events.send(event).await.is_err() {
            debug!("No consumer listening for subtitle events");
        }
    }
}
