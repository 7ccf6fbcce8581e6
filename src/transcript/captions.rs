//! Caption track lookup via yt-dlp.

use crate::audio_source::{MediaMetadata, SourceType};
use crate::error::{Result, SkisseError};
use crate::transcript::CaptionSource;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Fetches English caption tracks (manual or auto-generated) through yt-dlp.
pub struct YtDlpCaptions;

#[async_trait]
impl CaptionSource for YtDlpCaptions {
    async fn english_captions(&self, media: &MediaMetadata) -> Result<Option<String>> {
        // Caption tracks only exist for hosted videos.
        if media.source_type != SourceType::YouTube {
            return Ok(None);
        }

        let workdir = tempfile::tempdir()?;
        let output = Command::new("yt-dlp")
            .args([
                "--skip-download",
                "--write-subs",
                "--write-auto-subs",
                "--sub-langs",
                "en.*",
                "--convert-subs",
                "srt",
                "-o",
                "captions",
            ])
            .arg(&media.source_url)
            .current_dir(workdir.path())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SkisseError::ToolNotFound("yt-dlp".to_string())
                } else {
                    SkisseError::Captions(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("yt-dlp caption lookup failed: {}", stderr.trim());
            // A failed lookup is not fatal; the chain falls back to audio.
            return Ok(None);
        }

        match find_srt(workdir.path())? {
            Some(srt_path) => {
                let srt = std::fs::read_to_string(srt_path)?;
                let text = srt_to_text(&srt);
                if text.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(text))
                }
            }
            None => Ok(None),
        }
    }
}

/// Find the first English .srt file yt-dlp produced.
fn find_srt(dir: &Path) -> Result<Option<std::path::PathBuf>> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let name = path.file_name().map(|n| n.to_string_lossy().to_string());
        if let Some(name) = name {
            if name.contains(".en") && name.ends_with(".srt") {
                return Ok(Some(path));
            }
        }
    }
    Ok(None)
}

/// Strip SRT structure down to plain caption text.
///
/// Drops cue indices and timing lines, and collapses the consecutive
/// duplicate lines auto-generated tracks are full of.
fn srt_to_text(srt: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in srt.lines() {
        let line = line.trim();
        if line.is_empty() || line.contains("-->") {
            continue;
        }
        // Cue index lines are bare integers.
        if line.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if lines.last().map(|l| l.as_str()) == Some(line) {
            continue;
        }
        lines.push(line.to_string());
    }

    lines.join(" ")
}
