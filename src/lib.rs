//! Skisse - Structured outlines from spoken content
//!
//! A CLI tool that turns long-form spoken content (YouTube videos or local
//! media files) into a structured, elaborated outline in a distinctive
//! rhetorical style.
//!
//! The name "Skisse" comes from the Norwegian word for "sketch" or "outline."
//!
//! # Overview
//!
//! Skisse allows you to:
//! - Acquire transcripts from YouTube captions, or fall back to audio
//!   download and speech-to-text when no captions exist
//! - Break an unbounded transcript into model-sized chunks and extract a
//!   two-level outline (main points and sub-points) across chunk boundaries
//! - Elaborate each outline point into styled prose
//! - Render everything to a markdown artifact and track processed videos
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt template management
//! - `audio_source` - Media source abstraction (YouTube, local files)
//! - `audio` - Audio download and extraction
//! - `transcript` - Transcript acquisition chain (captions, speech-to-text)
//! - `gateway` - Resilient remote text-generation calls with retry/backoff
//! - `outline` - Outline parsing, chunked extraction, elaboration, rendering
//! - `ledger` - Append-only record of processed videos
//! - `pipeline` - End-to-end coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use skisse::config::Settings;
//! use skisse::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(&settings)?;
//!
//!     let report = pipeline.process("dQw4w9WgXcQ", false).await?;
//!     if let Some(path) = report.output_file {
//!         println!("Wrote outline to {}", path.display());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod audio_source;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod openai;
pub mod outline;
pub mod pipeline;
pub mod transcript;

pub use error::{Result, SkisseError};
