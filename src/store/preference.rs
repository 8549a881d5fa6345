//! Persistent per-video language preferences.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::PreferenceError;

/// Stores the preferred-language list per video.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Persists the preferred languages for a video, replacing any prior
    /// list for that video.
    async fn store(&self, video_id: &str, languages: &[String]) -> Result<(), PreferenceError>;

    /// Loads the preferred languages for a video. An unknown video yields
    /// an empty list.
    async fn load(&self, video_id: &str) -> Result<Vec<String>, PreferenceError>;
}

/// Preference store backed by a single JSON file.
pub struct JsonPreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    lock: Mutex<()>,
}

impl JsonPreferenceStore {
    /// Creates a store over the given file. The file is created on first
    /// write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<HashMap<String, Vec<String>>, PreferenceError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                PreferenceError::ReadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                }
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(PreferenceError::ReadFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }

    async fn write_all(
        &self,
        preferences: &HashMap<String, Vec<String>>,
    ) -> Result<(), PreferenceError> {
        let json = serde_json::to_string_pretty(preferences)
            .map_err(|e| PreferenceError::SerializationFailed(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PreferenceError::WriteFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                })?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| PreferenceError::WriteFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn store(&self, video_id: &str, languages: &[String]) -> Result<(), PreferenceError> {
        let _guard = self.lock.lock().await;
        let mut preferences = self.read_all().await?;
        preferences.insert(video_id.to_string(), languages.to_vec());
        self.write_all(&preferences).await?;
        debug!(video_id, ?languages, "Stored language preference");
        Ok(())
    }

    async fn load(&self, video_id: &str) -> Result<Vec<String>, PreferenceError> {
        let _guard = self.lock.lock().await;
        let preferences = self.read_all().await?;
        Ok(preferences.get(video_id).cloned().unwrap_or_default())
    }
}

/// In-memory preference store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    preferences: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn store(&self, video_id: &str, languages: &[String]) -> Result<(), PreferenceError> {
        self.preferences
            .lock()
            .await
            .insert(video_id.to_string(), languages.to_vec());
        Ok(())
    }

    async fn load(&self, video_id: &str) -> Result<Vec<String>, PreferenceError> {
        Ok(self
            .preferences
            .lock()
            .await
            .get(video_id)
            .cloned()
            .unwrap_or_default())
    }
}
