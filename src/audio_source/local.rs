//! Local file source implementation.
//!
//! Supports both video files (audio is extracted) and plain audio files.

use super::{sanitize_id, AudioSource, MediaMetadata, SourceType};
use crate::error::{Result, SkisseError};
use async_trait::async_trait;
use std::path::Path;

/// Supported audio file extensions.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "opus", "m4a"];

/// Supported video file extensions (audio will be extracted).
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "m4v", "mpeg", "mpg"];

/// Local file source for video and audio files.
pub struct LocalSource;

impl LocalSource {
    pub fn new() -> Self {
        Self
    }

    fn has_extension(path: &Path, extensions: &[&str]) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Check if path is a supported media file (audio or video).
    pub fn is_media_file(path: &Path) -> bool {
        Self::has_extension(path, AUDIO_EXTENSIONS) || Self::has_extension(path, VIDEO_EXTENSIONS)
    }

    /// Check if path needs audio extraction before transcription.
    pub fn is_video_file(path: &Path) -> bool {
        Self::has_extension(path, VIDEO_EXTENSIONS)
    }

    /// Get media duration using ffprobe; absence of metadata is not fatal.
    async fn probe_duration(path: &Path) -> Result<Option<u32>> {
        let output = tokio::process::Command::new("ffprobe")
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                path.to_str().unwrap_or(""),
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SkisseError::ToolNotFound("ffprobe".to_string())
                } else {
                    SkisseError::VideoSource(format!("Failed to run ffprobe: {}", e))
                }
            })?;

        if !output.status.success() {
            return Ok(None);
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&json_str).unwrap_or_default();

        Ok(json["format"]["duration"]
            .as_str()
            .and_then(|d| d.parse::<f64>().ok())
            .map(|d| d as u32))
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioSource for LocalSource {
    fn source_type(&self) -> SourceType {
        SourceType::Local
    }

    async fn fetch_media(&self, id: &str) -> Result<MediaMetadata> {
        let path = Path::new(id);

        if !path.exists() {
            return Err(SkisseError::VideoNotFound(format!("File not found: {}", id)));
        }

        if !Self::is_media_file(path) {
            return Err(SkisseError::InvalidInput(format!(
                "Not a recognized audio or video file: {}",
                id
            )));
        }

        let duration = Self::probe_duration(path).await?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");

        Ok(MediaMetadata {
            id: sanitize_id(stem),
            title: stem.to_string(),
            duration_seconds: duration,
            source_type: SourceType::Local,
            source_url: path
                .canonicalize()
                .unwrap_or_else(|_| path.to_path_buf())
                .to_string_lossy()
                .to_string(),
        })
    }

    fn can_handle(&self, input: &str) -> bool {
        let path = Path::new(input);
        path.exists() && Self::is_media_file(path)
    }

    fn extract_id(&self, input: &str) -> Option<String> {
        if self.can_handle(input) {
            Some(input.to_string())
        } else {
            None
        }
    }
}
