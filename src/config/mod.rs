//! Configuration module for Skisse.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ElaborationPrompts, OutlinePrompts, Prompts};
pub use settings::{
    GatewaySettings, GeneralSettings, OutlineSettings, PromptSettings, Settings,
    TranscriptionSettings,
};
