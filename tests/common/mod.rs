//! Shared test fixtures: recording fake adapters and a manager harness.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use subtitle_pipeline::config::model::SourcesConfig;
use subtitle_pipeline::error::SourceError;
use subtitle_pipeline::model::{Candidate, SourceKind};
use subtitle_pipeline::source::{EmbeddedExtractor, LocalScanner, OnlineSearcher};
use subtitle_pipeline::store::{MemoryPreferenceStore, SubtitleStore};
use subtitle_pipeline::{SubtitleEvent, SubtitleManager};

/// Builds a candidate with the given id, kind, and rank.
pub fn candidate(id: &str, kind: SourceKind, rank: u32) -> Candidate {
    Candidate {
        id: id.to_string(),
        kind,
        src: format!("/media/{id}.srt"),
        data: match kind {
            SourceKind::Online => Some(format!("payload-{id}")),
            _ => None,
        },
        rank,
        language: None,
        format: "srt".to_string(),
        name: None,
    }
}

/// Local scanner fake that records its calls.
#[derive(Default)]
pub struct FakeLocal {
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
    pub results: Mutex<Vec<Candidate>>,
    pub fail: bool,
}

impl FakeLocal {
    pub fn returning(results: Vec<Candidate>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results),
            ..Self::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LocalScanner for FakeLocal {
    async fn scan(
        &self,
        video_id: &str,
        formats: &[String],
    ) -> Result<Vec<Candidate>, SourceError> {
        self.calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), formats.to_vec()));
        if self.fail {
            return Err(SourceError::Unavailable {
                name: "local".to_string(),
                message: "scan failed".to_string(),
            });
        }
        Ok(self.results.lock().unwrap().clone())
    }
}

/// Embedded extractor fake that records its calls.
#[derive(Default)]
pub struct FakeEmbedded {
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
    pub results: Mutex<Vec<Candidate>>,
    pub fail: bool,
}

impl FakeEmbedded {
    pub fn returning(results: Vec<Candidate>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results),
            ..Self::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl EmbeddedExtractor for FakeEmbedded {
    async fn extract(
        &self,
        video_id: &str,
        codecs: &[String],
    ) -> Result<Vec<Candidate>, SourceError> {
        self.calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), codecs.to_vec()));
        if self.fail {
            return Err(SourceError::Unavailable {
                name: "embedded".to_string(),
                message: "extract failed".to_string(),
            });
        }
        Ok(self.results.lock().unwrap().clone())
    }
}

/// Online searcher fake that records (video, language) calls.
#[derive(Default)]
pub struct FakeOnline {
    pub calls: Mutex<Vec<(String, String)>>,
    pub results: Mutex<Vec<Candidate>>,
    pub fail_for_language: Option<String>,
}

impl FakeOnline {
    pub fn returning(results: Vec<Candidate>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results),
            ..Self::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl OnlineSearcher for FakeOnline {
    async fn search(
        &self,
        video_id: &str,
        language: &str,
    ) -> Result<Vec<Candidate>, SourceError> {
        self.calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), language.to_string()));
        if self.fail_for_language.as_deref() == Some(language) {
            return Err(SourceError::Unavailable {
                name: "online".to_string(),
                message: format!("search failed for '{language}'"),
            });
        }
        Ok(self.results.lock().unwrap().clone())
    }
}

/// A manager wired to fakes, with its store, event receiver, and
/// preference store exposed for assertions.
pub struct Harness {
    pub manager: Arc<SubtitleManager>,
    pub store: SubtitleStore,
    pub events: mpsc::Receiver<SubtitleEvent>,
    pub preferences: Arc<MemoryPreferenceStore>,
}

pub fn harness(
    local: Arc<FakeLocal>,
    embedded: Arc<FakeEmbedded>,
    online: Arc<FakeOnline>,
) -> Harness {
    let store = SubtitleStore::new();
    let preferences = MemoryPreferenceStore::new();
    let (events_tx, events) = mpsc::channel(100);

    let manager = Arc::new(SubtitleManager::new(
        store.clone(),
        SourcesConfig::default(),
        local,
        embedded,
        online,
        preferences.clone(),
        events_tx,
    ));

    Harness {
        manager,
        store,
        events,
        preferences,
    }
}

/// Drains currently queued events without waiting.
pub fn drain_events(events: &mut mpsc::Receiver<SubtitleEvent>) -> Vec<SubtitleEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}
