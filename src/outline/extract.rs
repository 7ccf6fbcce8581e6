//! Chunked outline extraction.
//!
//! A transcript of unbounded length is sliced into fixed-size character
//! windows and each window is sent through the gateway with a prompt that
//! continues the numbering from the points accumulated so far, so the
//! outline stays contiguous across chunk boundaries. Chunks are processed
//! strictly in order, one gateway call at a time.

use super::{parse_outline, OutlinePoint};
use crate::config::Prompts;
use crate::error::Result;
use crate::gateway::{Delay, Gateway, Message, TokioDelay};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Fixed pause between chunk calls, independent of the gateway's backoff.
const CHUNK_PAUSE: Duration = Duration::from_secs(1);

/// Split a transcript into contiguous fixed-size character windows.
///
/// The final chunk may be shorter; an empty transcript produces no chunks.
/// Concatenating the chunks reconstructs the input exactly. Boundaries may
/// fall mid-sentence or mid-item; that is an accepted accuracy/cost tradeoff
/// over sentence-aware splitting. A zero size (possible via a config file)
/// is treated as 1.
pub fn split_chunks(transcript: &str, chunk_size: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let chars: Vec<char> = transcript.chars().collect();
    chars
        .chunks(chunk_size)
        .map(|window| window.iter().collect())
        .collect()
}

/// Extracts a contiguous outline from a transcript, chunk by chunk.
pub struct OutlineExtractor {
    gateway: Arc<Gateway>,
    prompts: Prompts,
    chunk_size: usize,
    delay: Arc<dyn Delay>,
}

impl OutlineExtractor {
    /// Create an extractor with the default chunk size and real pauses.
    pub fn new(gateway: Arc<Gateway>, prompts: Prompts) -> Self {
        Self::with_config(gateway, prompts, DEFAULT_CHUNK_SIZE, Arc::new(TokioDelay))
    }

    /// Create an extractor with a custom chunk size and delay implementation.
    pub fn with_config(
        gateway: Arc<Gateway>,
        prompts: Prompts,
        chunk_size: usize,
        delay: Arc<dyn Delay>,
    ) -> Self {
        Self {
            gateway,
            prompts,
            chunk_size,
            delay,
        }
    }

    /// Process a transcript into an ordered outline.
    ///
    /// Each chunk produces one gateway call whose prompt instructs the model
    /// to continue numbering from the running point count, so the parsed
    /// outlines concatenate into one contiguous sequence. A fixed one-second
    /// pause follows every call as rate-limit backpressure.
    #[instrument(skip_all, fields(transcript_chars = transcript.chars().count()))]
    pub async fn extract(&self, transcript: &str) -> Result<Vec<OutlinePoint>> {
        let chunks = split_chunks(transcript, self.chunk_size);
        info!("Extracting outline from {} chunk(s)", chunks.len());

        let mut points: Vec<OutlinePoint> = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let messages = self.build_messages(chunk, points.len());
            let response = self.gateway.call(&messages).await?;

            let chunk_points = parse_outline(&response);
            debug!(
                "Chunk {}/{} produced {} point(s)",
                idx + 1,
                chunks.len(),
                chunk_points.len()
            );
            points.extend(chunk_points);

            self.delay.wait(CHUNK_PAUSE).await;
        }

        info!("Extracted {} outline point(s)", points.len());
        Ok(points)
    }

    /// Build the two-message conversation for one chunk.
    fn build_messages(&self, chunk: &str, running_count: usize) -> Vec<Message> {
        let mut vars = HashMap::new();
        vars.insert("start".to_string(), (running_count + 1).to_string());
        vars.insert("chunk".to_string(), chunk.to_string());

        vec![
            Message::system(
                self.prompts
                    .render_with_custom(&self.prompts.outline.system, &vars),
            ),
            Message::user(
                self.prompts
                    .render_with_custom(&self.prompts.outline.user, &vars),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result as SkisseResult;
    use crate::gateway::tests::RecordingDelay;
    use crate::gateway::ChatService;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Service returning canned responses in order, recording each prompt.
    struct ScriptedService {
        responses: Mutex<Vec<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        fn new(responses: &[&str]) -> Self {
            let mut responses: Vec<String> = responses.iter().map(|s| s.to_string()).collect();
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn recorded_prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatService for ScriptedService {
        async fn generate(&self, messages: &[Message]) -> SkisseResult<String> {
            let user = messages
                .iter()
                .find(|m| m.role == crate::gateway::Role::User)
                .map(|m| m.content.clone())
                .unwrap_or_default();
            self.prompts.lock().unwrap().push(user);
            Ok(self.responses.lock().unwrap().pop().unwrap_or_default())
        }
    }

    fn extractor(
        service: Arc<ScriptedService>,
        chunk_size: usize,
    ) -> (OutlineExtractor, Arc<RecordingDelay>) {
        let delay = Arc::new(RecordingDelay::new());
        let gateway = Arc::new(Gateway::with_delay(
            service,
            delay.clone(),
            5,
            Duration::from_secs(2),
        ));
        (
            OutlineExtractor::with_config(gateway, Prompts::default(), chunk_size, delay.clone()),
            delay,
        )
    }

    #[test]
    fn test_split_chunks_reconstructs_input() {
        let cases = ["", "a", "hello world", "grüße aus Øslo – æøå"];
        for text in cases {
            for size in [1, 3, 1000] {
                let chunks = split_chunks(text, size);
                assert_eq!(chunks.concat(), text, "size {}", size);
            }
        }
    }

    #[test]
    fn test_split_chunks_sizes() {
        let chunks = split_chunks("abcdefgh", 3);
        assert_eq!(chunks, vec!["abc", "def", "gh"]);
        assert!(split_chunks("", 10).is_empty());
    }

    #[test]
    fn test_zero_chunk_size_is_treated_as_one() {
        // chunk_size = 0 can reach this through an unvalidated config file.
        assert_eq!(split_chunks("abc", 0), vec!["a", "b", "c"]);
        assert!(split_chunks("", 0).is_empty());
    }

    #[tokio::test]
    async fn test_one_call_per_chunk_with_continuation_numbering() {
        // 25 characters at chunk size 10 -> 3 chunks, 3 gateway calls.
        let transcript = "a".repeat(25);
        let service = Arc::new(ScriptedService::new(&[
            "1. One\n1.1 A\n2. Two",
            "3. Three",
            "4. Four\n4.1 B",
        ]));
        let (extractor, delay) = extractor(service.clone(), 10);

        let points = extractor.extract(&transcript).await.unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].main_point, "One");
        assert_eq!(points[3].main_point, "Four");

        let prompts = service.recorded_prompts();
        assert_eq!(prompts.len(), 3);
        // First chunk starts numbering at 1; the second continues after the
        // two points parsed from chunk one.
        assert!(prompts[0].contains("point 1"));
        assert!(prompts[1].contains("point 3"));
        assert!(prompts[2].contains("point 4"));

        // One fixed pause after each chunk call.
        assert_eq!(delay.recorded(), vec![Duration::from_secs(1); 3]);
    }

    #[tokio::test]
    async fn test_empty_transcript_makes_no_calls() {
        let service = Arc::new(ScriptedService::new(&[]));
        let (extractor, delay) = extractor(service.clone(), 10);

        let points = extractor.extract("").await.unwrap();
        assert!(points.is_empty());
        assert!(service.recorded_prompts().is_empty());
        assert!(delay.recorded().is_empty());
    }
}
