//! Audio acquisition via yt-dlp and ffmpeg.
//!
//! Both paths produce the same WAV intermediate, a fixed lossless format the
//! speech-to-text stage can rely on. An artifact already present in the
//! output folder is reused instead of re-fetched. The acquisition chain
//! stamps a fresh folder per run, so reuse only fires when a caller supplies
//! a stable folder of its own; it is a cheap check kept for that case rather
//! than a cross-run cache.

use crate::error::{Result, SkisseError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, instrument};

/// Expected path of the audio artifact for a video in an output folder.
pub fn audio_artifact_path(output_dir: &Path, video_id: &str) -> PathBuf {
    output_dir.join(format!("{}.wav", video_id))
}

/// Downloads best-available audio from a URL and saves it as WAV.
///
/// Uses yt-dlp with its ffmpeg audio extractor. If the artifact already
/// exists at the expected path it is returned without re-downloading.
#[instrument(skip(output_dir), fields(video_id = %video_id))]
pub async fn download_audio(url: &str, video_id: &str, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let target_path = audio_artifact_path(output_dir, video_id);

    if target_path.exists() {
        info!("Using previously downloaded audio artifact");
        return Ok(target_path);
    }

    info!("Downloading audio from {}", url);

    let template = output_dir.join(format!("{}.%(ext)s", video_id));

    let result = Command::new("yt-dlp")
        .arg("--extract-audio")
        .arg("--audio-format").arg("wav")
        .arg("--audio-quality").arg("0")
        .arg("--output").arg(template.to_str().unwrap_or_default())
        .arg("--no-playlist")
        .arg("--quiet")
        .arg("--no-warnings")
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SkisseError::ToolNotFound("yt-dlp".into()));
        }
        Err(e) => {
            return Err(SkisseError::AudioDownload(format!(
                "yt-dlp execution failed: {e}"
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SkisseError::AudioDownload(format!("yt-dlp failed: {stderr}")));
    }

    if !target_path.exists() {
        return Err(SkisseError::AudioDownload(
            "Audio file not found after download".into(),
        ));
    }

    Ok(target_path)
}

/// Extracts the audio track of a local video file to WAV using ffmpeg.
///
/// Reuses an existing artifact, same as [`download_audio`].
#[instrument(skip(video_path, output_dir), fields(video_id = %video_id))]
pub async fn extract_audio(video_path: &Path, video_id: &str, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let target_path = audio_artifact_path(output_dir, video_id);

    if target_path.exists() {
        info!("Using previously extracted audio artifact");
        return Ok(target_path);
    }

    info!("Extracting audio from {}", video_path.display());

    let result = Command::new("ffmpeg")
        .arg("-i").arg(video_path)
        .arg("-vn")
        .arg("-acodec").arg("pcm_s16le")
        .arg("-ar").arg("16000")
        .arg("-ac").arg("1")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(&target_path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match result {
        Ok(out) if out.status.success() => Ok(target_path),
        Ok(out) => {
            let err = String::from_utf8_lossy(&out.stderr);
            Err(SkisseError::AudioDownload(format!(
                "ffmpeg extraction failed: {err}"
            )))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SkisseError::ToolNotFound("ffmpeg".into()))
        }
        Err(e) => Err(SkisseError::AudioDownload(format!("ffmpeg error: {e}"))),
    }
}
