//! Transcript acquisition chain.
//!
//! Given a video, the chain walks an ordered fallback sequence: caption
//! lookup first, then audio download plus speech-to-text. Each stage either
//! completes the chain or defers to the next one; only the final stage's
//! failure is fatal. Acquisition has no retry semantics on purpose — audio
//! download and transcription failures are typically not transient, unlike
//! the text-generation gateway's.

mod captions;
mod speech;

pub use captions::YtDlpCaptions;
pub use speech::WhisperSpeech;

use crate::audio::{download_audio, extract_audio};
use crate::audio_source::{MediaMetadata, SourceType};
use crate::error::{Result, SkisseError};
use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Result of one acquisition attempt. Immutable after creation.
#[derive(Debug, Clone)]
pub struct TranscriptResult {
    /// Video identifier.
    pub video_id: String,
    /// Full transcript text.
    pub transcript: String,
    /// Where the transcript was persisted.
    pub output_file: PathBuf,
    /// Detected language, when known ("en" for caption tracks).
    pub detected_language: Option<String>,
}

/// Source of caption tracks for a video.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch the English caption track as plain text, or None when the video
    /// has no usable English captions.
    async fn english_captions(&self, media: &MediaMetadata) -> Result<Option<String>>;
}

/// Produces an audio file for a video inside the given output folder.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(&self, media: &MediaMetadata, output_dir: &Path) -> Result<PathBuf>;
}

/// Default fetcher: yt-dlp for YouTube sources, ffmpeg for local video files.
pub struct ToolAudioFetcher;

#[async_trait]
impl AudioFetcher for ToolAudioFetcher {
    async fn fetch(&self, media: &MediaMetadata, output_dir: &Path) -> Result<PathBuf> {
        match media.source_type {
            SourceType::YouTube => download_audio(&media.source_url, &media.id, output_dir).await,
            SourceType::Local => {
                let video_path = Path::new(&media.source_url);
                extract_audio(video_path, &media.id, output_dir).await
            }
        }
    }
}

/// Speech-to-text output.
#[derive(Debug, Clone)]
pub struct SpeechResult {
    pub text: String,
    pub language: Option<String>,
}

/// Speech-to-text engine with automatic language detection.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<SpeechResult>;
}

/// Outcome of one acquisition stage.
enum StageOutcome {
    /// Transcript obtained; the chain stops here.
    Done {
        text: String,
        language: Option<String>,
    },
    /// Stage does not apply to this video; proceed to the next stage.
    Defer(&'static str),
}

/// The caption -> audio -> speech-to-text fallback chain.
pub struct AcquisitionChain {
    captions: Box<dyn CaptionSource>,
    fetcher: Box<dyn AudioFetcher>,
    speech: Box<dyn SpeechToText>,
    output_root: PathBuf,
}

impl AcquisitionChain {
    pub fn new(
        captions: Box<dyn CaptionSource>,
        speech: Box<dyn SpeechToText>,
        output_root: PathBuf,
    ) -> Self {
        Self {
            captions,
            fetcher: Box::new(ToolAudioFetcher),
            speech,
            output_root,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Box<dyn AudioFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Acquire a transcript for a video and persist it.
    ///
    /// Creates a timestamped per-video output folder, runs the stages in
    /// order, and writes the transcript into the folder. Partial outputs are
    /// left in place on failure; the temporary audio artifact is removed
    /// after successful transcription.
    #[instrument(skip(self), fields(video_id = %media.id))]
    pub async fn acquire(&self, media: &MediaMetadata) -> Result<TranscriptResult> {
        let output_dir = self.create_output_dir(&media.id)?;

        let outcome = match self.caption_stage(media).await? {
            StageOutcome::Done { text, language } => StageOutcome::Done { text, language },
            StageOutcome::Defer(reason) => {
                debug!("Caption stage deferred: {}", reason);
                self.speech_stage(media, &output_dir).await?
            }
        };

        let (text, language) = match outcome {
            StageOutcome::Done { text, language } => (text, language),
            StageOutcome::Defer(reason) => {
                return Err(SkisseError::Transcription(format!(
                    "No acquisition stage produced a transcript: {}",
                    reason
                )));
            }
        };

        let output_file = output_dir.join(format!("{}_transcript.txt", media.id));
        std::fs::write(&output_file, &text)?;
        info!("Transcript saved to {}", output_file.display());

        Ok(TranscriptResult {
            video_id: media.id.clone(),
            transcript: text,
            output_file,
            detected_language: language,
        })
    }

    /// Stage 1: English caption lookup.
    async fn caption_stage(&self, media: &MediaMetadata) -> Result<StageOutcome> {
        match self.captions.english_captions(media).await? {
            Some(text) => {
                info!("Using English caption track");
                Ok(StageOutcome::Done {
                    text,
                    language: Some("en".to_string()),
                })
            }
            None => Ok(StageOutcome::Defer("no English caption track")),
        }
    }

    /// Stages 2 and 3: audio fallback plus speech-to-text.
    ///
    /// Failures here are fatal for the video; there is no further fallback.
    async fn speech_stage(&self, media: &MediaMetadata, output_dir: &Path) -> Result<StageOutcome> {
        let audio_path = self.fetcher.fetch(media, output_dir).await?;

        info!("Running speech-to-text on {}", audio_path.display());
        let result = self.speech.transcribe(&audio_path).await?;

        // The WAV intermediate is only needed for transcription.
        if let Err(e) = std::fs::remove_file(&audio_path) {
            tracing::warn!("Failed to remove audio artifact: {}", e);
        }

        Ok(StageOutcome::Done {
            text: result.text,
            language: result.language,
        })
    }

    /// Create the timestamped per-video output folder.
    fn create_output_dir(&self, video_id: &str) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let dir = self.output_root.join(format!("{}_{}", video_id, timestamp));
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
