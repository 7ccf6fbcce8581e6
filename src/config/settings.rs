//! Configuration settings for Skisse.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub gateway: GatewaySettings,
    pub outline: OutlineSettings,
    pub transcription: TranscriptionSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for application data (ledger file lives here).
    pub data_dir: String,
    /// Directory where per-video output folders are created.
    pub output_dir: String,
    /// Directory for temporary files.
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.skisse".to_string(),
            output_dir: "~/.skisse/output".to_string(),
            temp_dir: "/tmp/skisse".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Settings for the remote text-generation gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    /// Chat model used for outline extraction and elaboration.
    pub model: String,
    /// Maximum attempts before giving up on a call.
    pub max_retries: u32,
    /// First backoff wait in seconds; doubles after each failure.
    pub initial_wait_secs: u64,
    /// HTTP request timeout for chat completions, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            max_retries: 5,
            initial_wait_secs: 2,
            request_timeout_secs: 120,
        }
    }
}

/// Outline extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineSettings {
    /// Transcript chunk size in characters.
    pub chunk_size: usize,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self { chunk_size: 1000 }
    }
}

/// Speech-to-text settings for the acquisition fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Whisper model to use.
    pub model: String,
    /// HTTP request timeout for audio uploads, in seconds. Larger than the
    /// gateway's since a full WAV travels with the request.
    pub request_timeout_secs: u64,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "whisper-1".to_string(),
            request_timeout_secs: 300,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or the default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SkisseError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skisse")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }

    /// Path of the processed-videos ledger file.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir().join("processed_videos.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.gateway.max_retries, 5);
        assert_eq!(settings.gateway.initial_wait_secs, 2);
        assert_eq!(settings.gateway.request_timeout_secs, 120);
        assert_eq!(settings.transcription.request_timeout_secs, 300);
        assert_eq!(settings.outline.chunk_size, 1000);
        assert!(settings
            .ledger_path()
            .ends_with("processed_videos.txt"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.gateway.model, settings.gateway.model);
        assert_eq!(parsed.outline.chunk_size, settings.outline.chunk_size);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Settings = toml::from_str("[gateway]\nmax_retries = 3\n").unwrap();
        assert_eq!(parsed.gateway.max_retries, 3);
        assert_eq!(parsed.gateway.initial_wait_secs, 2);
        assert_eq!(parsed.outline.chunk_size, 1000);
    }
}
