//! CLI module for Skisse.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Skisse - Video Outline Analyzer
///
/// A CLI tool that turns YouTube videos and local video files into
/// structured, elaborated outlines. The name "Skisse" comes from the
/// Norwegian word for "sketch" or "outline."
#[derive(Parser, Debug)]
#[command(name = "skisse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Skisse and verify system requirements
    Init,

    /// Check system requirements and configuration
    Doctor,

    /// Transcribe a video and produce an elaborated outline
    Process {
        /// YouTube URL/ID, or local audio/video file path
        input: String,

        /// Force re-processing even if already processed
        #[arg(short, long)]
        force: bool,

        /// Transcript chunk size in characters for outline extraction
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Acquire and save a transcript without outline analysis
    Transcribe {
        /// YouTube URL/ID, or local audio/video file path
        input: String,
    },

    /// List processed videos
    List,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
