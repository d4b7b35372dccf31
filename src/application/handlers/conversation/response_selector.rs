//! Response selector.
//!
//! Renders a reply intent into text. Free-form intents are requested from
//! the injected generator under a timeout; anything that goes wrong falls
//! back to the deterministic template.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::conversation::configs::render;
use crate::domain::conversation::{FactSet, ReplyIntent, ReplySource, ResponseSanitizer, Scenario};
use crate::domain::foundation::SessionId;
use crate::ports::{UtteranceGenerator, UtteranceRequest};

/// Default bound on a single generation call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Reply text plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReply {
    pub text: String,
    pub source: ReplySource,
}

impl RenderedReply {
    fn template(text: String) -> Self {
        Self {
            text,
            source: ReplySource::Template,
        }
    }
}

/// Holds the process-wide generator handle.
#[derive(Clone)]
pub struct ResponseSelector {
    generator: Option<Arc<dyn UtteranceGenerator>>,
    timeout: Duration,
    sanitizer: ResponseSanitizer,
}

impl ResponseSelector {
    /// A selector that only ever uses templates.
    pub fn templated() -> Self {
        Self {
            generator: None,
            timeout: DEFAULT_GENERATION_TIMEOUT,
            sanitizer: ResponseSanitizer::new(),
        }
    }

    /// A selector that asks the generator for free-form lines.
    pub fn with_generator(generator: Arc<dyn UtteranceGenerator>, timeout: Duration) -> Self {
        Self {
            generator: Some(generator),
            timeout,
            sanitizer: ResponseSanitizer::new(),
        }
    }

    /// Returns true if a generator is configured.
    pub fn generation_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Renders the reply for an intent.
    pub async fn render(
        &self,
        session_id: SessionId,
        scenario: &Scenario,
        intent: ReplyIntent,
        facts: &FactSet,
    ) -> RenderedReply {
        let template = render(&intent, facts, scenario);

        let generator = match &self.generator {
            Some(generator) if intent.uses_generation() => generator,
            _ => return RenderedReply::template(template),
        };

        let request = UtteranceRequest {
            session_id,
            scenario,
            intent,
            facts,
        };

        let failure = match tokio::time::timeout(self.timeout, generator.generate(request)).await {
            Ok(Ok(raw)) => match self.sanitizer.sanitize(&raw) {
                Ok(text) => {
                    debug!(
                        session_id = %session_id,
                        intent = intent.name(),
                        "Generated reply"
                    );
                    return RenderedReply {
                        text,
                        source: ReplySource::Generated,
                    };
                }
                Err(e) => e.to_string(),
            },
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!("timed out after {}ms", self.timeout.as_millis()),
        };

        warn!(
            session_id = %session_id,
            intent = intent.name(),
            error = %failure,
            "Generation failed, falling back to template"
        );

        RenderedReply {
            text: template,
            source: ReplySource::Fallback,
        }
    }
}

impl std::fmt::Debug for ResponseSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSelector")
            .field("generation_enabled", &self.generation_enabled())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::configs::COVERAGE_INQUIRY;
    use crate::domain::conversation::{ClosingReason, FactUpdate};
    use crate::ports::AIError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Reply(&'static str),
        Fail,
        Hang,
    }

    struct ScriptedGenerator {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UtteranceGenerator for ScriptedGenerator {
        async fn generate(&self, _request: UtteranceRequest<'_>) -> Result<String, AIError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Reply(text) => Ok(text.to_string()),
                Behavior::Fail => Err(AIError::unavailable("down")),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok("too late".to_string())
                }
            }
        }
    }

    fn facts() -> FactSet {
        FactSet::new().merged(&FactUpdate::none().with_agent_name("Maria"))
    }

    async fn render_with(selector: &ResponseSelector, intent: ReplyIntent) -> RenderedReply {
        selector
            .render(SessionId::new(), &COVERAGE_INQUIRY, intent, &facts())
            .await
    }

    #[tokio::test]
    async fn templated_selector_uses_templates() {
        let reply = render_with(&ResponseSelector::templated(), ReplyIntent::ConfirmDepartment).await;
        assert_eq!(reply.source, ReplySource::Template);
        assert!(reply.text.starts_with("Nice to meet you, Maria!"));
    }

    #[tokio::test]
    async fn generative_intent_uses_generator() {
        let generator = ScriptedGenerator::new(Behavior::Reply("\"Hi Maria, is this coverage?\""));
        let selector = ResponseSelector::with_generator(generator.clone(), Duration::from_secs(1));

        let reply = render_with(&selector, ReplyIntent::ConfirmDepartment).await;

        assert_eq!(reply.source, ReplySource::Generated);
        assert_eq!(reply.text, "Hi Maria, is this coverage?");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn transactional_intent_never_calls_generator() {
        let generator = ScriptedGenerator::new(Behavior::Reply("unused"));
        let selector = ResponseSelector::with_generator(generator.clone(), Duration::from_secs(1));

        let reply = render_with(&selector, ReplyIntent::ProvideMemberId).await;
        let closing = render_with(&selector, ReplyIntent::conclude(ClosingReason::Farewell)).await;

        assert_eq!(reply.source, ReplySource::Template);
        assert!(reply.text.contains("MEM123456789"));
        assert_eq!(closing.source, ReplySource::Template);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn generator_failure_falls_back() {
        let selector = ResponseSelector::with_generator(
            ScriptedGenerator::new(Behavior::Fail),
            Duration::from_secs(1),
        );
        let reply = render_with(&selector, ReplyIntent::AskAboutPlan).await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert!(reply.text.contains("colonoscopy"));
    }

    #[tokio::test]
    async fn empty_generation_falls_back() {
        let selector = ResponseSelector::with_generator(
            ScriptedGenerator::new(Behavior::Reply("   ")),
            Duration::from_secs(1),
        );
        let reply = render_with(&selector, ReplyIntent::ConfirmDepartment).await;
        assert_eq!(reply.source, ReplySource::Fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_falls_back() {
        let selector = ResponseSelector::with_generator(
            ScriptedGenerator::new(Behavior::Hang),
            Duration::from_millis(50),
        );
        let reply = render_with(&selector, ReplyIntent::AskAboutPlan).await;
        assert_eq!(reply.source, ReplySource::Fallback);
    }
}
