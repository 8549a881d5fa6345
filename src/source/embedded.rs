//! Embedded subtitle track extraction via ffprobe.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::error::SourceError;
use crate::model::{Candidate, SourceKind};

use super::EmbeddedExtractor;

/// Rank for embedded tracks. Below same-stem sidecars, above loose ones.
const EMBEDDED_RANK: u32 = 8;

/// Lists subtitle streams in the video container using ffprobe.
pub struct FfprobeExtractor;

#[async_trait]
impl EmbeddedExtractor for FfprobeExtractor {
    async fn extract(
        &self,
        video_id: &str,
        codecs: &[String],
    ) -> Result<Vec<Candidate>, SourceError> {
        let output = tokio::process::Command::new("ffprobe")
            .args([
                "-v", "quiet",
                "-print_format", "json",
                "-show_streams",
                "-select_streams", "s",
            ])
            .arg(video_id)
            .output()
            .await
            .map_err(|e| SourceError::SpawnFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SourceError::Unavailable {
                name: "embedded".to_string(),
                message: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| SourceError::ParseFailed(e.to_string()))?;

        let candidates = parse_streams(&json, video_id, codecs)?;
        debug!(video_id, count = candidates.len(), "Embedded extraction finished");
        Ok(candidates)
    }
}

/// Parses ffprobe JSON output into embedded candidates.
fn parse_streams(
    json: &serde_json::Value,
    video_id: &str,
    codecs: &[String],
) -> Result<Vec<Candidate>, SourceError> {
    let streams = json
        .get("streams")
        .and_then(|s| s.as_array())
        .ok_or_else(|| SourceError::ParseFailed("Missing streams in ffprobe output".to_string()))?;

    let mut candidates = Vec::new();
    for stream in streams {
        let Some(candidate) = parse_subtitle_stream(stream, video_id, codecs) else {
            continue;
        };
        candidates.push(candidate);
    }
    Ok(candidates)
}

/// Parses one subtitle stream, filtering by supported codec.
fn parse_subtitle_stream(
    stream: &serde_json::Value,
    video_id: &str,
    codecs: &[String],
) -> Option<Candidate> {
    let index = stream.get("index")?.as_u64()?;
    let codec = stream.get("codec_name")?.as_str()?;
    if !codecs.iter().any(|c| c.eq_ignore_ascii_case(codec)) {
        return None;
    }

    let tags = stream.get("tags");
    let language = tags
        .and_then(|t| t.get("language"))
        .and_then(|v| v.as_str())
        .map(String::from);
    let title = tags
        .and_then(|t| t.get("title"))
        .and_then(|v| v.as_str())
        .map(String::from);

    Some(Candidate {
        id: Uuid::new_v4().to_string(),
        kind: SourceKind::Embedded,
        src: format!("{video_id}#{index}"),
        data: None,
        rank: EMBEDDED_RANK,
        language,
        format: codec_to_format(codec),
        name: title,
    })
}

/// Maps an ffprobe codec name to the subtitle format it carries.
fn codec_to_format(codec: &str) -> String {
    match codec {
        "subrip" => "srt".to_string(),
        "ass" | "ssa" => "ass".to_string(),
        "webvtt" => "vtt".to_string(),
        "mov_text" => "srt".to_string(),
        other => other.to_string(),
    }
}
