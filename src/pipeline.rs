//! End-to-end processing pipeline.
//!
//! Wires the acquisition chain, outline extractor, and elaborator together:
//! resolve the input to a video, skip if already processed, acquire a
//! transcript, extract and elaborate the outline, render it to markdown, and
//! record the video in the ledger.

use crate::audio_source::{parse_input, MediaMetadata};
use crate::config::{Prompts, Settings};
use crate::error::{Result, SkisseError};
use crate::gateway::{Gateway, OpenAiChatService, TokioDelay};
use crate::ledger::ProcessedLedger;
use crate::outline::{render_outline, Elaborator, OutlineExtractor};
use crate::transcript::{AcquisitionChain, TranscriptResult, WhisperSpeech, YtDlpCaptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// What one pipeline run produced.
#[derive(Debug)]
pub struct ProcessReport {
    pub video_id: String,
    pub title: String,
    pub points: usize,
    pub output_file: Option<PathBuf>,
    pub transcript_file: Option<PathBuf>,
    pub detected_language: Option<String>,
    /// True when the video was already in the ledger and nothing ran.
    pub skipped: bool,
}

pub struct Pipeline {
    extractor: OutlineExtractor,
    elaborator: Elaborator,
    chain: AcquisitionChain,
    ledger: ProcessedLedger,
}

impl Pipeline {
    /// Build a pipeline from settings, with live OpenAI-backed components.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let service = Arc::new(OpenAiChatService::new(
            &settings.gateway.model,
            Duration::from_secs(settings.gateway.request_timeout_secs),
        ));
        let gateway = Arc::new(Gateway::new(
            service,
            settings.gateway.max_retries,
            Duration::from_secs(settings.gateway.initial_wait_secs),
        ));

        let extractor = OutlineExtractor::with_config(
            gateway.clone(),
            prompts.clone(),
            settings.outline.chunk_size,
            Arc::new(TokioDelay),
        );
        let elaborator = Elaborator::new(gateway, prompts);

        let chain = AcquisitionChain::new(
            Box::new(YtDlpCaptions),
            Box::new(WhisperSpeech::new(
                &settings.transcription.model,
                Duration::from_secs(settings.transcription.request_timeout_secs),
            )),
            settings.output_dir(),
        );
        let ledger = ProcessedLedger::new(settings.ledger_path());

        Ok(Self {
            extractor,
            elaborator,
            chain,
            ledger,
        })
    }

    /// Build a pipeline from already-constructed components.
    pub fn with_components(
        extractor: OutlineExtractor,
        elaborator: Elaborator,
        chain: AcquisitionChain,
        ledger: ProcessedLedger,
    ) -> Self {
        Self {
            extractor,
            elaborator,
            chain,
            ledger,
        }
    }

    /// Run the full pipeline for a URL, video id, or local file path.
    #[instrument(skip(self))]
    pub async fn process(&self, input: &str, force: bool) -> Result<ProcessReport> {
        let media = resolve_input(input).await?;
        self.process_media(&media, force).await
    }

    /// Run the full pipeline for resolved media.
    pub async fn process_media(&self, media: &MediaMetadata, force: bool) -> Result<ProcessReport> {
        if !force && self.ledger.contains(&media.id)? {
            info!("{} already processed, skipping", media.id);
            return Ok(ProcessReport {
                video_id: media.id.clone(),
                title: media.title.clone(),
                points: 0,
                output_file: None,
                transcript_file: None,
                detected_language: None,
                skipped: true,
            });
        }

        let transcript = self.chain.acquire(media).await?;

        info!("Extracting outline ({} chars)", transcript.transcript.len());
        let mut points = self.extractor.extract(&transcript.transcript).await?;
        if points.is_empty() {
            warn!("No outline points extracted from transcript");
        }

        self.elaborator.elaborate(&mut points).await?;

        let markdown = render_outline(&points);
        let output_file = transcript
            .output_file
            .parent()
            .ok_or_else(|| {
                SkisseError::Outline("transcript file has no parent directory".to_string())
            })?
            .join(format!("{}_analysis.md", media.id));
        std::fs::write(&output_file, markdown)?;
        info!("Analysis saved to {}", output_file.display());

        self.ledger.record(&media.id)?;

        Ok(ProcessReport {
            video_id: media.id.clone(),
            title: media.title.clone(),
            points: points.len(),
            output_file: Some(output_file),
            transcript_file: Some(transcript.output_file),
            detected_language: transcript.detected_language,
            skipped: false,
        })
    }

    /// Acquire and persist a transcript without outline analysis.
    #[instrument(skip(self))]
    pub async fn transcript_only(&self, input: &str) -> Result<TranscriptResult> {
        let media = resolve_input(input).await?;
        self.chain.acquire(&media).await
    }
}

/// Resolve an input string to media metadata.
async fn resolve_input(input: &str) -> Result<MediaMetadata> {
    let (source, id) = parse_input(input).ok_or_else(|| {
        SkisseError::InvalidInput(format!(
            "'{}' is not a YouTube URL, video id, or existing media file",
            input
        ))
    })?;
    source.fetch_media(&id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_source::SourceType;
    use crate::gateway::tests::RecordingDelay;
    use crate::gateway::{ChatService, Message, Role};
    use crate::outline::DEFAULT_CHUNK_SIZE;
    use crate::transcript::tests::{FixedCaptions, FixedSpeech};
    use crate::transcript::SpeechResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns queued responses in order and records every user prompt.
    struct ScriptedService {
        responses: Mutex<Vec<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        fn new(responses: Vec<&str>) -> Self {
            let mut responses: Vec<String> =
                responses.into_iter().map(|s| s.to_string()).collect();
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatService for ScriptedService {
        async fn generate(&self, messages: &[Message]) -> Result<String> {
            if let Some(user) = messages.iter().rev().find(|m| m.role == Role::User) {
                self.prompts.lock().unwrap().push(user.content.clone());
            }
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| "Elaborated content.".to_string()))
        }
    }

    fn media() -> MediaMetadata {
        MediaMetadata {
            id: "dQw4w9WgXcQ".to_string(),
            title: "A talk".to_string(),
            duration_seconds: Some(212),
            source_type: SourceType::YouTube,
            source_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        }
    }

    fn build_pipeline(
        output_root: &std::path::Path,
        ledger_path: &std::path::Path,
        captions: Option<String>,
    ) -> Pipeline {
        let service = Arc::new(ScriptedService::new(vec!["1. Say hello\n1.1 Greeting"]));
        let delay = Arc::new(RecordingDelay::new());
        let gateway = Arc::new(Gateway::with_delay(
            service,
            delay.clone(),
            5,
            Duration::from_secs(2),
        ));
        let prompts = Prompts::default();

        let extractor = OutlineExtractor::with_config(
            gateway.clone(),
            prompts.clone(),
            DEFAULT_CHUNK_SIZE,
            delay.clone(),
        );
        let elaborator = Elaborator::with_delay(gateway, prompts, delay);

        let chain = AcquisitionChain::new(
            Box::new(FixedCaptions(captions)),
            Box::new(FixedSpeech(SpeechResult {
                text: "unused".to_string(),
                language: None,
            })),
            output_root.to_path_buf(),
        );
        let ledger = ProcessedLedger::new(ledger_path);

        Pipeline::with_components(extractor, elaborator, chain, ledger)
    }

    #[tokio::test]
    async fn test_end_to_end_produces_analysis_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = build_pipeline(
            dir.path(),
            &dir.path().join("processed_videos.txt"),
            Some("hello world".to_string()),
        );

        let report = pipeline.process_media(&media(), false).await.unwrap();
        assert!(!report.skipped);
        assert_eq!(report.points, 1);
        assert_eq!(report.detected_language.as_deref(), Some("en"));

        let markdown = std::fs::read_to_string(report.output_file.unwrap()).unwrap();
        assert!(markdown.contains("# Say hello"));
        assert!(markdown.contains("## Greeting"));
        assert!(markdown.contains("Elaborated content."));
        assert!(markdown.contains(&"-".repeat(80)));

        let transcript =
            std::fs::read_to_string(report.transcript_file.unwrap()).unwrap();
        assert_eq!(transcript, "hello world");
    }

    #[tokio::test]
    async fn test_already_processed_video_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let ledger_path = dir.path().join("processed_videos.txt");
        ProcessedLedger::new(&ledger_path)
            .record("dQw4w9WgXcQ")
            .unwrap();

        let pipeline = build_pipeline(dir.path(), &ledger_path, Some("hello".to_string()));
        let report = pipeline.process_media(&media(), false).await.unwrap();
        assert!(report.skipped);
        assert!(report.output_file.is_none());
    }

    #[tokio::test]
    async fn test_force_reprocesses_without_duplicating_ledger_entry() {
        let dir = tempfile::tempdir().unwrap();
        let ledger_path = dir.path().join("processed_videos.txt");
        ProcessedLedger::new(&ledger_path)
            .record("dQw4w9WgXcQ")
            .unwrap();

        let pipeline = build_pipeline(dir.path(), &ledger_path, Some("hello".to_string()));
        let report = pipeline.process_media(&media(), true).await.unwrap();
        assert!(!report.skipped);
        assert_eq!(report.points, 1);

        let entries = ProcessedLedger::new(&ledger_path).entries().unwrap();
        assert_eq!(entries, vec!["dQw4w9WgXcQ"]);
    }
}
