//! Prompted utterance generator.
//!
//! Turns a reply intent and the known facts into a persona system prompt
//! and asks an `AIProvider` for the customer's next line.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::conversation::configs::{generation_prompt, GENERATION_INSTRUCTION};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata, UtteranceGenerator,
    UtteranceRequest,
};

/// UtteranceGenerator backed by a chat-completion provider.
pub struct PromptedUtteranceGenerator {
    provider: Arc<dyn AIProvider>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl PromptedUtteranceGenerator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn build_request(&self, request: &UtteranceRequest<'_>) -> Result<CompletionRequest, AIError> {
        let prompt = generation_prompt(&request.intent, request.facts, request.scenario)
            .ok_or_else(|| {
                AIError::InvalidRequest(format!(
                    "intent '{}' has no generation prompt",
                    request.intent.name()
                ))
            })?;

        let mut completion = CompletionRequest::new(RequestMetadata::for_session(request.session_id))
            .with_system_prompt(prompt)
            .with_message(MessageRole::User, GENERATION_INSTRUCTION);

        if let Some(max_tokens) = self.max_tokens {
            completion = completion.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            completion = completion.with_temperature(temperature);
        }
        Ok(completion)
    }
}

#[async_trait]
impl UtteranceGenerator for PromptedUtteranceGenerator {
    async fn generate(&self, request: UtteranceRequest<'_>) -> Result<String, AIError> {
        let completion = self.build_request(&request)?;
        let trace_id = completion.metadata.trace_id.clone();
        let response = self.provider.complete(completion).await?;
        debug!(
            session_id = %request.session_id,
            trace_id = %trace_id,
            intent = request.intent.name(),
            model = %response.model,
            tokens = response.usage.total_tokens,
            finish_reason = ?response.finish_reason,
            "Generated customer line"
        );

        let text = response.content.trim();
        if text.is_empty() {
            return Err(AIError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}
