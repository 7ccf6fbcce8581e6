//! Per-point elaboration.
//!
//! One gateway call per outline point, strictly in order. Cost and latency
//! scale linearly with outline size; there is no partial-success mode that
//! skips a failed point, so gateway exhaustion aborts the whole batch.

use super::OutlinePoint;
use crate::config::Prompts;
use crate::error::Result;
use crate::gateway::{Delay, Gateway, Message, TokioDelay};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Fixed pause between elaboration calls.
const POINT_PAUSE: Duration = Duration::from_secs(1);

/// Generates styled prose for each outline point.
pub struct Elaborator {
    gateway: Arc<Gateway>,
    prompts: Prompts,
    delay: Arc<dyn Delay>,
}

impl Elaborator {
    /// Create an elaborator with real pauses between calls.
    pub fn new(gateway: Arc<Gateway>, prompts: Prompts) -> Self {
        Self::with_delay(gateway, prompts, Arc::new(TokioDelay))
    }

    /// Create an elaborator with a custom delay implementation.
    pub fn with_delay(gateway: Arc<Gateway>, prompts: Prompts, delay: Arc<dyn Delay>) -> Self {
        Self {
            gateway,
            prompts,
            delay,
        }
    }

    /// Fill in `content` for every point, in place and in order.
    #[instrument(skip_all, fields(points = points.len()))]
    pub async fn elaborate(&self, points: &mut [OutlinePoint]) -> Result<()> {
        info!("Elaborating {} outline point(s)", points.len());

        for (idx, point) in points.iter_mut().enumerate() {
            let messages = self.build_messages(point);
            let content = self.gateway.call(&messages).await?;

            debug!("Elaborated point {} ({} chars)", idx + 1, content.len());
            point.content = Some(content);

            self.delay.wait(POINT_PAUSE).await;
        }

        Ok(())
    }

    /// Build the conversation asking for an elaboration of one point.
    fn build_messages(&self, point: &OutlinePoint) -> Vec<Message> {
        let mut vars = HashMap::new();
        vars.insert("main_point".to_string(), point.main_point.clone());
        vars.insert("sub_points".to_string(), point.sub_points_joined());

        vec![
            Message::system(
                self.prompts
                    .render_with_custom(&self.prompts.elaboration.system, &vars),
            ),
            Message::user(
                self.prompts
                    .render_with_custom(&self.prompts.elaboration.user, &vars),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result as SkisseResult, SkisseError};
    use crate::gateway::tests::RecordingDelay;
    use crate::gateway::{ChatService, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoService {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl EchoService {
        fn new(fail: bool) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl ChatService for EchoService {
        async fn generate(&self, messages: &[Message]) -> SkisseResult<String> {
            if self.fail {
                return Err(SkisseError::OpenAI("down".to_string()));
            }
            let user = messages
                .iter()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.clone())
                .unwrap_or_default();
            self.prompts.lock().unwrap().push(user.clone());
            Ok(format!("Elaboration of: {}", user))
        }
    }

    fn elaborator(service: Arc<EchoService>) -> (Elaborator, Arc<RecordingDelay>) {
        let delay = Arc::new(RecordingDelay::new());
        let gateway = Arc::new(Gateway::with_delay(
            service,
            delay.clone(),
            2,
            Duration::from_secs(1),
        ));
        (
            Elaborator::with_delay(gateway, Prompts::default(), delay.clone()),
            delay,
        )
    }

    fn sample_points() -> Vec<OutlinePoint> {
        let mut first = OutlinePoint::new("Start with why");
        first.sub_points.push("Purpose".to_string());
        first.sub_points.push("Belief".to_string());
        vec![first, OutlinePoint::new("The golden circle")]
    }

    #[tokio::test]
    async fn test_elaborate_sets_content_in_place() {
        let service = Arc::new(EchoService::new(false));
        let (elaborator, delay) = elaborator(service.clone());

        let mut points = sample_points();
        elaborator.elaborate(&mut points).await.unwrap();

        assert!(points.iter().all(|p| p.content.is_some()));
        // Sub-points are joined with ", " in the prompt.
        let prompts = service.prompts.lock().unwrap().clone();
        assert!(prompts[0].contains("Start with why"));
        assert!(prompts[0].contains("Purpose, Belief"));
        // One pause per point.
        assert_eq!(delay.recorded(), vec![Duration::from_secs(1); 2]);
    }

    #[tokio::test]
    async fn test_gateway_exhaustion_aborts_the_batch() {
        let service = Arc::new(EchoService::new(true));
        let (elaborator, _delay) = elaborator(service);

        let mut points = sample_points();
        let err = elaborator.elaborate(&mut points).await.unwrap_err();
        assert!(matches!(err, SkisseError::RetriesExhausted(_)));
        // Nothing was mutated past the failure.
        assert!(points.iter().all(|p| p.content.is_none()));
    }
}
