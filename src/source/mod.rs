//! Subtitle source adapters.
//!
//! Each source is an independently failing async collaborator behind a
//! narrow trait. The orchestrator never calls an adapter directly; it goes
//! through [`attempt`], which contains a source failure to that source.

pub mod embedded;
pub mod local;

use std::future::Future;

use async_trait::async_trait;
use tracing::warn;

use crate::error::SourceError;
use crate::model::Candidate;

/// Scans for sidecar subtitle files near a video.
#[async_trait]
pub trait LocalScanner: Send + Sync {
    /// Returns local candidates for the video, limited to the given
    /// formats. Formats are passed through opaquely from configuration.
    async fn scan(&self, video_id: &str, formats: &[String]) -> Result<Vec<Candidate>, SourceError>;
}

/// Extracts subtitle tracks embedded in the video container.
#[async_trait]
pub trait EmbeddedExtractor: Send + Sync {
    /// Returns embedded candidates for the video, limited to the given
    /// codecs.
    async fn extract(&self, video_id: &str, codecs: &[String])
        -> Result<Vec<Candidate>, SourceError>;
}

/// Searches a remote subtitle service.
#[async_trait]
pub trait OnlineSearcher: Send + Sync {
    /// Returns online candidates for the video in one language.
    async fn search(&self, video_id: &str, language: &str)
        -> Result<Vec<Candidate>, SourceError>;
}

/// Runs one source call, degrading a failure to an empty contribution.
///
/// A failing source must never abort or taint the other sources' results;
/// the failure is logged here and nothing propagates to the caller.
pub async fn attempt<F>(source: &str, call: F) -> Vec<Candidate>
where
    F: Future<Output = Result<Vec<Candidate>, SourceError>>,
{
    match call.await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(source, error = %e, "Subtitle source failed, continuing without it");
            Vec::new()
        }
    }
}

/// Online searcher that always finds nothing.
///
/// Stands in where remote search is not wired up, e.g. the CLI.
pub struct DisabledSearcher;

#[async_trait]
impl OnlineSearcher for DisabledSearcher {
    async fn search(
        &self,
        _video_id: &str,
        _language: &str,
    ) -> Result<Vec<Candidate>, SourceError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn attempt_passes_successes_through() {
        let result = attempt("local", async { Ok(Vec::new()) }).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn attempt_degrades_failure_to_empty() {
        let result = attempt("online", async {
            Err(SourceError::Unavailable {
                name: "online".to_string(),
                message: "connection refused".to_string(),
            })
        })
        .await;
        assert!(result.is_empty());
    }
}
