//! Error types for the Gemini adapter

use tourgen_application::GatewayError;
use thiserror::Error;

/// Errors that can occur while setting up the Gemini adapter
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("No Gemini API key found: set {0} (or API_KEY), or gemini.api_key in the config file")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Longest response body kept in an error message
const MAX_ERROR_BODY: usize = 500;

/// Map a non-success HTTP status to a gateway error
pub fn status_error(status: u16, body: &str) -> GatewayError {
    let body: String = body.chars().take(MAX_ERROR_BODY).collect();
    match status {
        401 | 403 => GatewayError::Authentication(format!("HTTP {status}: {body}")),
        _ => GatewayError::Http { status, body },
    }
}

/// Map a transport-level reqwest failure to a gateway error
pub fn transport_error(error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() || error.is_request() {
        GatewayError::Connection(error.to_string())
    } else {
        GatewayError::Other(error.to_string())
    }
}
