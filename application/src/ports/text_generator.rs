//! Text generation port
//!
//! Defines the interface for asking a hosted text model for a structured
//! (JSON) answer under a declared response schema.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to a hosted generative model
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A single structured generation request
#[derive(Debug, Clone)]
pub struct TextGenerationRequest {
    /// Model identifier understood by the provider
    pub model: String,
    pub prompt: String,
    /// Schema the response must follow (declared to the provider)
    pub schema: Value,
}

impl TextGenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            schema,
        }
    }
}

/// Gateway for structured text generation
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a response and return its raw text (expected to be JSON)
    async fn generate_structured(
        &self,
        request: TextGenerationRequest,
    ) -> Result<String, GatewayError>;
}
