//! Filesystem scanner for sidecar subtitle files.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;
use walkdir::WalkDir;

use crate::error::SourceError;
use crate::model::{Candidate, SourceKind};

use super::LocalScanner;

/// Rank for a sidecar whose file stem matches the video's.
const MATCHED_STEM_RANK: u32 = 10;
/// Rank for any other sidecar in the video's directory.
const SIDECAR_RANK: u32 = 5;

/// Scans the video's own directory for subtitle files.
pub struct DirectoryScanner;

#[async_trait]
impl LocalScanner for DirectoryScanner {
    async fn scan(
        &self,
        video_id: &str,
        formats: &[String],
    ) -> Result<Vec<Candidate>, SourceError> {
        let video_path = Path::new(video_id);
        let dir = video_path.parent().ok_or_else(|| SourceError::Unavailable {
            name: "local".to_string(),
            message: format!("'{video_id}' has no parent directory"),
        })?;
        let video_stem = video_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let dir = dir.to_path_buf();
        let formats = formats.to_vec();
        let candidates = tokio::task::spawn_blocking(move || {
            scan_directory(&dir, &video_stem, &formats)
        })
        .await
        .map_err(|e| SourceError::Unavailable {
            name: "local".to_string(),
            message: e.to_string(),
        })?;

        debug!(video_id, count = candidates.len(), "Local scan finished");
        Ok(candidates)
    }
}

/// Walks one directory level and collects subtitle files.
fn scan_directory(dir: &Path, video_stem: &str, formats: &[String]) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let Some(extension) = path.extension().map(|e| e.to_string_lossy().to_lowercase())
        else {
            continue;
        };
        if !formats.iter().any(|f| f.eq_ignore_ascii_case(&extension)) {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        // Same-stem sidecars outrank the rest of the directory.
        let rank = if stem == video_stem || stem.starts_with(&format!("{video_stem}.")) {
            MATCHED_STEM_RANK
        } else {
            SIDECAR_RANK
        };

        candidates.push(Candidate {
            id: Uuid::new_v4().to_string(),
            kind: SourceKind::Local,
            src: path.to_string_lossy().to_string(),
            data: None,
            rank,
            language: None,
            format: extension,
            name: path.file_name().map(|n| n.to_string_lossy().to_string()),
        });
    }

    candidates.sort_by(|a, b| b.rank.cmp(&a.rank).then_with(|| a.src.cmp(&b.src)));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn formats() -> Vec<String> {
        vec!["srt".to_string(), "ass".to_string()]
    }

    #[tokio::test]
    async fn finds_sidecars_matching_formats() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("movie.mkv");
        fs::write(&video, b"").unwrap();
        fs::write(dir.path().join("movie.srt"), b"").unwrap();
        fs::write(dir.path().join("other.ass"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let candidates = DirectoryScanner
            .scan(&video.to_string_lossy(), &formats())
            .await
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.kind == SourceKind::Local));
    }

    #[tokio::test]
    async fn same_stem_sidecar_ranks_highest() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("movie.mkv");
        fs::write(&video, b"").unwrap();
        fs::write(dir.path().join("movie.zh.srt"), b"").unwrap();
        fs::write(dir.path().join("unrelated.srt"), b"").unwrap();

        let candidates = DirectoryScanner
            .scan(&video.to_string_lossy(), &formats())
            .await
            .unwrap();

        assert!(candidates[0].src.ends_with("movie.zh.srt"));
        assert!(candidates[0].rank > candidates[1].rank);
    }

    #[tokio::test]
    async fn empty_directory_yields_no_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("movie.mkv");
        fs::write(&video, b"").unwrap();

        let candidates = DirectoryScanner
            .scan(&video.to_string_lossy(), &formats())
            .await
            .unwrap();

        assert!(candidates.is_empty());
    }
}
