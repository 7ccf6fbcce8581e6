//! Processed-video ledger.
//!
//! A plain text file with one video id per line. Append-only; entries are
//! never removed, and reprocessing under `--force` does not duplicate them.

use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ProcessedLedger {
    path: PathBuf,
}

impl ProcessedLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a video id has already been processed.
    pub fn contains(&self, video_id: &str) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(contents.lines().any(|line| line.trim() == video_id))
    }

    /// Record a video id. Idempotent per id.
    pub fn record(&self, video_id: &str) -> Result<()> {
        if self.contains(video_id)? {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", video_id)?;
        debug!("Recorded {} in ledger", video_id);
        Ok(())
    }

    /// All recorded video ids, in recording order.
    pub fn entries(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(contents
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_contains_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ProcessedLedger::new(dir.path().join("processed_videos.txt"));
        assert!(!ledger.contains("abc").unwrap());
        assert!(ledger.entries().unwrap().is_empty());
    }

    #[test]
    fn test_record_and_contains() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ProcessedLedger::new(dir.path().join("processed_videos.txt"));

        ledger.record("vid1").unwrap();
        ledger.record("vid2").unwrap();

        assert!(ledger.contains("vid1").unwrap());
        assert!(ledger.contains("vid2").unwrap());
        assert!(!ledger.contains("vid3").unwrap());
        assert_eq!(ledger.entries().unwrap(), vec!["vid1", "vid2"]);
    }

    #[test]
    fn test_record_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ProcessedLedger::new(dir.path().join("processed_videos.txt"));

        ledger.record("vid1").unwrap();
        ledger.record("vid1").unwrap();

        assert_eq!(ledger.entries().unwrap(), vec!["vid1"]);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed_videos.txt");

        ProcessedLedger::new(&path).record("vid1").unwrap();
        let reopened = ProcessedLedger::new(&path);
        assert!(reopened.contains("vid1").unwrap());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("processed_videos.txt");
        ProcessedLedger::new(&path).record("vid1").unwrap();
        assert!(path.exists());
    }
}
