//! Audio download and extraction utilities.

mod downloader;

pub use downloader::{audio_artifact_path, download_audio, extract_audio};
