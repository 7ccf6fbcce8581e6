//! Media source abstraction.
//!
//! Provides a trait-based interface for the supported video sources
//! (YouTube, local media files).

mod local;
mod youtube;

pub use local::LocalSource;
pub use youtube::YoutubeSource;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Type of media source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    YouTube,
    Local,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::YouTube => write!(f, "youtube"),
            SourceType::Local => write!(f, "local"),
        }
    }
}

/// Metadata about a video to be processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Unique identifier (YouTube video ID, or sanitized file stem).
    pub id: String,
    /// Title.
    pub title: String,
    /// Duration in seconds (if known).
    pub duration_seconds: Option<u32>,
    /// Type of source.
    pub source_type: SourceType,
    /// URL or canonical path to the media.
    pub source_url: String,
}

/// Trait for media source providers.
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// Get the source type.
    fn source_type(&self) -> SourceType;

    /// Fetch metadata for media by ID or path.
    async fn fetch_media(&self, id: &str) -> Result<MediaMetadata>;

    /// Check if this source can handle the given input.
    fn can_handle(&self, input: &str) -> bool;

    /// Extract ID from input (URL, path, etc.).
    fn extract_id(&self, input: &str) -> Option<String>;
}

/// Detect the appropriate source for the given input.
pub fn detect_source(input: &str) -> Option<Box<dyn AudioSource>> {
    let youtube = YoutubeSource::new();
    if youtube.can_handle(input) {
        return Some(Box::new(youtube));
    }

    let local = LocalSource::new();
    if local.can_handle(input) {
        return Some(Box::new(local));
    }

    None
}

/// Parse input and return the appropriate source and ID.
pub fn parse_input(input: &str) -> Option<(Box<dyn AudioSource>, String)> {
    let source = detect_source(input)?;
    let id = source.extract_id(input)?;
    Some((source, id))
}

/// Keep only characters safe for file and directory names.
pub fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id("dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(sanitize_id("my talk (final).mp4"), "mytalkfinalmp4");
        assert_eq!(sanitize_id("a_b-c"), "a_b-c");
    }

    #[test]
    fn test_detect_source_prefers_youtube() {
        let source = detect_source("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(source.source_type(), SourceType::YouTube);
    }

    #[test]
    fn test_detect_source_unknown_input() {
        assert!(detect_source("definitely not a video ~ !!").is_none());
    }
}
