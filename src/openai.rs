//! Shared OpenAI client construction.
//!
//! Both the text-generation gateway and the speech-to-text stage build their
//! client here so request timeouts stay config-driven. Audio uploads need a
//! much larger budget than chat completions, so the timeout is always the
//! caller's choice rather than a single baked-in constant.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client with the given request timeout.
pub fn create_client(timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}
