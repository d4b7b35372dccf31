//! customer-call-bot server.
//!
//! Reads configuration from `CALL_BOT__*` environment variables (and `.env`),
//! wires the generation client, session store and turn processor, and serves
//! the conversation API.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use customer_call_bot::adapters::ai::{
    OpenAICompatibleConfig, OpenAICompatibleProvider, PromptedUtteranceGenerator,
};
use customer_call_bot::adapters::{app_router, ConversationHandlers, InMemorySessionStore};
use customer_call_bot::application::handlers::conversation::{ResponseSelector, TurnProcessor};
use customer_call_bot::config::{AiConfig, AiProvider, AppConfig, ServerConfig, ValidationError};
use customer_call_bot::ports::{AIProvider, SessionStore, UtteranceGenerator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let selector = build_selector(&config)?;
    let processor = Arc::new(
        TurnProcessor::new(selector, config.conversation.scenario)
            .with_priming_utterance(config.conversation.priming_utterance.clone()),
    );
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let app = app_router(ConversationHandlers::from_parts(store, processor))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        scenario = %config.conversation.scenario,
        generation = config.conversation.generation_enabled,
        "customer-call-bot listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_selector(config: &AppConfig) -> Result<ResponseSelector, Box<dyn std::error::Error>> {
    if !config.conversation.generation_enabled {
        info!("Generation disabled, all replies are templated");
        return Ok(ResponseSelector::templated());
    }

    let provider: Arc<dyn AIProvider> = Arc::new(OpenAICompatibleProvider::new(
        provider_config(&config.ai)?,
    )?);
    let info = provider.provider_info();
    info!(provider = %info.name, model = %info.model, "Generation service configured");

    let generator: Arc<dyn UtteranceGenerator> = Arc::new(
        PromptedUtteranceGenerator::new(provider)
            .with_max_tokens(config.ai.max_tokens)
            .with_temperature(config.ai.temperature),
    );

    Ok(ResponseSelector::with_generator(
        generator,
        config.conversation.generation_timeout(),
    ))
}

fn provider_config(ai: &AiConfig) -> Result<OpenAICompatibleConfig, ValidationError> {
    let missing = match ai.provider {
        AiProvider::Groq => "GROQ_API_KEY",
        AiProvider::OpenAI => "OPENAI_API_KEY",
    };
    let key = ai.api_key().ok_or(ValidationError::MissingRequired(missing))?;

    let base = match ai.provider {
        AiProvider::Groq => OpenAICompatibleConfig::groq(key),
        AiProvider::OpenAI => OpenAICompatibleConfig::openai(key),
    };
    let mut provider = base
        .with_temperature(ai.temperature)
        .with_max_tokens(ai.max_tokens)
        .with_timeout(ai.timeout())
        .with_max_retries(ai.max_retries);
    if let Some(model) = &ai.model {
        provider = provider.with_model(model.clone());
    }
    Ok(provider)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}
