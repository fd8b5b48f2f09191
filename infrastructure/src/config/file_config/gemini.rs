//! Gemini provider configuration from TOML (`[gemini]` section)

use crate::gemini::gateway::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use tourgen_application::config::generation_params::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};

/// Environment variable accepted when `api_key_env` is unset in the environment
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Gemini API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended — use env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Gemini API.
    pub base_url: String,
    /// Model that writes the itinerary.
    pub text_model: String,
    /// Model that paints the day images.
    pub image_model: String,
    /// Limit on establishing a connection; 0 disables it.
    ///
    /// Requests themselves are bounded only by the `[generation]` timeouts.
    pub connect_timeout_seconds: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            connect_timeout_seconds: 10,
        }
    }
}

impl FileGeminiConfig {
    /// Resolve the API key from the process environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key: explicit key, then `api_key_env`, then `API_KEY`
    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        non_empty(self.api_key.clone())
            .or_else(|| non_empty(lookup(&self.api_key_env)))
            .or_else(|| non_empty(lookup(FALLBACK_API_KEY_ENV)))
    }
}
