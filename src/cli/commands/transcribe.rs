//! Transcribe command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the transcribe command: acquire and save a transcript only.
pub async fn run_transcribe(input: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Transcribe) {
        Output::error(&format!("{}", e));
        Output::info("Run 'skisse doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    Output::info(&format!("Transcribing: {}", input));

    let pipeline = Pipeline::new(&settings)?;
    let spinner = Output::spinner("Acquiring transcript...");
    let result = pipeline.transcript_only(input).await;
    spinner.finish_and_clear();

    match result {
        Ok(result) => {
            Output::success(&format!(
                "Transcript saved ({} chars)",
                result.transcript.len()
            ));
            if let Some(lang) = &result.detected_language {
                Output::kv("Language", lang);
            }
            Output::kv("File", &result.output_file.display().to_string());
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Transcription failed: {}", e));
            Err(e.into())
        }
    }
}
