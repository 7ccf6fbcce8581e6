//! Resilient remote text-generation calls.
//!
//! Wraps a single chat-completion request with bounded retry and exponential
//! backoff. The backoff sleeps are real wall-clock waits on purpose: they are
//! backpressure against a rate-limited upstream, not incidental delays. Tests
//! substitute the [`Delay`] implementation to skip the waiting while still
//! observing call counts and wait durations.

mod openai;

pub use openai::OpenAiChatService;

use crate::error::{Result, SkisseError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

/// A single role-tagged message in a conversation.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Trait for remote text-generation services.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send a conversation and return the generated text.
    ///
    /// Fails with a transport or service error on any non-success condition;
    /// no streaming.
    async fn generate(&self, messages: &[Message]) -> Result<String>;
}

/// Trait for waiting between attempts.
///
/// Production code sleeps for real; tests record the requested durations.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Delay implementation backed by the tokio timer.
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Gateway issuing remote text-generation calls with retry and backoff.
pub struct Gateway {
    service: Arc<dyn ChatService>,
    delay: Arc<dyn Delay>,
    max_retries: u32,
    initial_wait: Duration,
}

impl Gateway {
    /// Create a gateway with the default tokio-backed delay.
    pub fn new(service: Arc<dyn ChatService>, max_retries: u32, initial_wait: Duration) -> Self {
        Self::with_delay(service, Arc::new(TokioDelay), max_retries, initial_wait)
    }

    /// Create a gateway with a custom delay implementation.
    pub fn with_delay(
        service: Arc<dyn ChatService>,
        delay: Arc<dyn Delay>,
        max_retries: u32,
        initial_wait: Duration,
    ) -> Self {
        Self {
            service,
            delay,
            max_retries,
            initial_wait,
        }
    }

    /// Issue one remote call, retrying on failure.
    ///
    /// Each failed attempt is reported and followed by a wait that doubles,
    /// starting at `initial_wait`. Once the retry budget is exhausted the
    /// call fails with [`SkisseError::RetriesExhausted`]; callers are not
    /// expected to recover from that automatically, since repeated failure
    /// usually means a persistent outage or invalid credentials.
    pub async fn call(&self, messages: &[Message]) -> Result<String> {
        let mut wait = self.initial_wait;

        for attempt in 1..=self.max_retries {
            match self.service.generate(messages).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!(
                        "API call failed (attempt {}/{}): {}. Retrying in {} seconds...",
                        attempt,
                        self.max_retries,
                        e,
                        wait.as_secs()
                    );
                    self.delay.wait(wait).await;
                    wait *= 2;
                }
            }
        }

        Err(SkisseError::RetriesExhausted(self.max_retries))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Service that fails a fixed number of times before succeeding.
    pub(crate) struct FlakyService {
        failures: u32,
        calls: AtomicU32,
        response: String,
    }

    impl FlakyService {
        pub(crate) fn new(failures: u32, response: &str) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
                response: response.to_string(),
            }
        }

        pub(crate) fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatService for FlakyService {
        async fn generate(&self, _messages: &[Message]) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(SkisseError::OpenAI("service unavailable".to_string()))
            } else {
                Ok(self.response.clone())
            }
        }
    }

    /// Delay that records the requested durations instead of sleeping.
    pub(crate) struct RecordingDelay {
        pub(crate) waits: Mutex<Vec<Duration>>,
    }

    impl RecordingDelay {
        pub(crate) fn new() -> Self {
            Self {
                waits: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn recorded(&self) -> Vec<Duration> {
            self.waits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Delay for RecordingDelay {
        async fn wait(&self, duration: Duration) {
            self.waits.lock().unwrap().push(duration);
        }
    }

    fn gateway(service: Arc<dyn ChatService>, delay: Arc<RecordingDelay>) -> Gateway {
        Gateway::with_delay(service, delay, 5, Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_success_without_retries() {
        let service = Arc::new(FlakyService::new(0, "hello"));
        let delay = Arc::new(RecordingDelay::new());
        let gw = gateway(service.clone(), delay.clone());

        let result = gw.call(&[Message::user("hi")]).await.unwrap();
        assert_eq!(result, "hello");
        assert_eq!(service.call_count(), 1);
        assert!(delay.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_backoff_doubles_after_each_failure() {
        let service = Arc::new(FlakyService::new(4, "finally"));
        let delay = Arc::new(RecordingDelay::new());
        let gw = gateway(service.clone(), delay.clone());

        let result = gw.call(&[Message::user("hi")]).await.unwrap();
        assert_eq!(result, "finally");
        assert_eq!(service.call_count(), 5);
        assert_eq!(
            delay.recorded(),
            vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8),
                Duration::from_secs(16),
            ]
        );
    }

    #[tokio::test]
    async fn test_exhaustion_after_max_retries() {
        let service = Arc::new(FlakyService::new(u32::MAX, ""));
        let delay = Arc::new(RecordingDelay::new());
        let gw = gateway(service.clone(), delay.clone());

        let err = gw.call(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, SkisseError::RetriesExhausted(5)));
        assert_eq!(service.call_count(), 5);
        assert_eq!(delay.recorded().len(), 5);
        assert_eq!(delay.recorded()[4], Duration::from_secs(32));
    }

    #[test]
    fn test_message_constructors() {
        let m = Message::system("be helpful");
        assert_eq!(m.role, Role::System);
        assert_eq!(m.content, "be helpful");

        let m = Message::user("question");
        assert_eq!(m.role, Role::User);
    }
}
