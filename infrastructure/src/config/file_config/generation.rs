//! Generation configuration from TOML (`[generation]` section)

use serde::{Deserialize, Serialize};

/// Raw generation settings from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Limit for one image request before the day gets the placeholder
    pub image_timeout_seconds: u64,
    /// Limit for the itinerary request (unset = wait indefinitely)
    pub text_timeout_seconds: Option<u64>,
    /// Image requests in flight at once (0 = all days at once)
    pub max_concurrent_images: usize,
    /// Generate day images at all
    pub images: bool,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            image_timeout_seconds: 60,
            text_timeout_seconds: None,
            max_concurrent_images: 0,
            images: true,
        }
    }
}
