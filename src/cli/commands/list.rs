//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::ledger::ProcessedLedger;
use anyhow::Result;

/// Run the list command.
pub fn run_list(settings: Settings) -> Result<()> {
    let ledger = ProcessedLedger::new(settings.ledger_path());

    let entries = ledger.entries()?;
    if entries.is_empty() {
        Output::info("No videos processed yet. Use 'skisse process <input>' to get started.");
        return Ok(());
    }

    Output::header(&format!("Processed Videos ({})", entries.len()));
    println!();
    for id in &entries {
        Output::list_item(id);
    }
    println!();
    Output::kv("Ledger", &ledger.path().display().to_string());
    Output::kv("Output directory", &settings.output_dir().display().to_string());

    Ok(())
}
