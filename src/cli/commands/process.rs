//! Process command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the process command: transcript acquisition plus outline analysis.
pub async fn run_process(
    input: &str,
    force: bool,
    chunk_size: Option<usize>,
    mut settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Process) {
        Output::error(&format!("{}", e));
        Output::info("Run 'skisse doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(size) = chunk_size {
        if size == 0 {
            Output::error("--chunk-size must be at least 1");
            return Err(anyhow::anyhow!("invalid chunk size"));
        }
        settings.outline.chunk_size = size;
    }

    Output::info(&format!("Processing: {}", input));

    let pipeline = Pipeline::new(&settings)?;
    let spinner = Output::spinner("Acquiring transcript and building outline...");
    let result = pipeline.process(input, force).await;
    spinner.finish_and_clear();

    match result {
        Ok(report) => {
            if report.skipped {
                Output::warning(&format!(
                    "'{}' is already processed. Use --force to reprocess.",
                    report.video_id
                ));
                return Ok(());
            }

            Output::success(&format!(
                "Analyzed '{}' ({} main points)",
                report.title, report.points
            ));
            if let Some(lang) = &report.detected_language {
                Output::kv("Language", lang);
            }
            if let Some(path) = &report.transcript_file {
                Output::kv("Transcript", &path.display().to_string());
            }
            if let Some(path) = &report.output_file {
                Output::kv("Analysis", &path.display().to_string());
            }
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Processing failed: {}", e));
            Err(e.into())
        }
    }
}
