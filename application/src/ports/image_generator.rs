//! Image generation port

use super::text_generator::GatewayError;
use async_trait::async_trait;

/// Parameters of one image request
#[derive(Debug, Clone)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    /// Number of images wanted
    pub count: u32,
    pub mime_type: String,
    pub aspect_ratio: String,
}

/// One image returned by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub base64_bytes: String,
}

/// Gateway for image generation
///
/// Returning `Ok(vec![])` is valid: the provider may produce nothing
/// (for example when a prompt is filtered).
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_images(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<Vec<GeneratedImage>, GatewayError>;
}
