//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Generation timeout must be greater than zero")]
    InvalidGenerationTimeout,

    #[error("Generation timeout ({generation_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    GenerationOutlastsRequest {
        generation_secs: u64,
        request_secs: u64,
    },

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Priming utterance cannot be blank")]
    BlankPrimingUtterance,
}
