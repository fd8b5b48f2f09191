//! Generation parameters — pipeline control.
//!
//! [`GenerationParams`] groups the static parameters that control a
//! generation run in [`TourPipeline`](crate::use_cases::run_pipeline::TourPipeline).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// Generation control parameters.
///
/// Controls model selection, timeouts and the image fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Model that writes the itinerary.
    pub text_model: String,
    /// Model that paints one picture per day.
    pub image_model: String,
    /// Limit for a single image request; on expiry the day gets the placeholder.
    pub image_timeout: Option<Duration>,
    /// Limit for the itinerary request. `None` waits indefinitely.
    pub text_timeout: Option<Duration>,
    /// Maximum image requests in flight. `0` means one task per day at once.
    pub max_concurrent_images: usize,
    /// When false the run finishes with the text-only package.
    pub images_enabled: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            image_timeout: Some(Duration::from_secs(60)),
            text_timeout: None,
            max_concurrent_images: 0,
            images_enabled: true,
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_image_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.image_timeout = timeout;
        self
    }

    pub fn with_text_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.text_timeout = timeout;
        self
    }

    pub fn with_max_concurrent_images(mut self, max: usize) -> Self {
        self.max_concurrent_images = max;
        self
    }

    pub fn with_images_enabled(mut self, enabled: bool) -> Self {
        self.images_enabled = enabled;
        self
    }
}
