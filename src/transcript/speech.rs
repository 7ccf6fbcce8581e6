//! OpenAI Whisper speech-to-text implementation.

use crate::error::{Result, SkisseError};
use crate::openai::create_client;
use crate::transcript::{SpeechResult, SpeechToText};
use async_openai::types::{AudioResponseFormat, CreateTranscriptionRequestArgs};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Whisper API transcriber. Language is left unset so the model detects it.
pub struct WhisperSpeech {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl WhisperSpeech {
    pub fn new(model: &str, timeout: Duration) -> Self {
        Self {
            client: create_client(timeout),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl SpeechToText for WhisperSpeech {
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe(&self, audio_path: &Path) -> Result<SpeechResult> {
        debug!("Transcribing audio file");

        let file_bytes = tokio::fs::read(audio_path).await?;

        let request = CreateTranscriptionRequestArgs::default()
            .file(async_openai::types::AudioInput::from_vec_u8(
                audio_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("audio.wav")
                    .to_string(),
                file_bytes,
            ))
            .model(&self.model)
            .response_format(AudioResponseFormat::VerboseJson)
            .build()
            .map_err(|e| SkisseError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe_verbose_json(request)
            .await
            .map_err(|e| SkisseError::OpenAI(format!("Whisper API error: {}", e)))?;

        let language = if response.language.is_empty() {
            None
        } else {
            Some(response.language.clone())
        };
        debug!(
            "Transcription complete ({} chars, language {:?})",
            response.text.len(),
            language
        );

        Ok(SpeechResult {
            text: response.text.trim().to_string(),
            language,
        })
    }
}
