//! Gemini gateway implementation
//!
//! One HTTP client serves both capabilities: structured itinerary text via
//! `generateContent` and day pictures via the Imagen `predict` endpoint.

use super::error::{GeminiError, status_error, transport_error};
use super::types::{
    GenerateContentRequest, GenerateContentResponse, OutputOptions, PredictInstance,
    PredictParameters, PredictRequest, PredictResponse,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tourgen_application::{
    GatewayError, GeneratedImage, ImageGenerationRequest, ImageGenerator, TextGenerationRequest,
    TextGenerator,
};
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gateway to the hosted Gemini and Imagen models
pub struct GeminiGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiGateway {
    /// Create a gateway with the given credential, endpoint and connect timeout
    ///
    /// The client never limits a whole request: a text or image call may
    /// run as long as the caller's own timeout allows.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        connect_timeout: Option<Duration>,
    ) -> Result<Self, GeminiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey("GEMINI_API_KEY".to_string()));
        }

        let client = client_builder(connect_timeout).build()?;
        let gateway = Self::with_client(client, api_key, base_url);

        info!(base_url = %gateway.base_url, "GeminiGateway initialized");

        Ok(gateway)
    }

    /// Create a gateway around an existing HTTP client
    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    /// Remove the credential from text headed for logs or errors
    fn redact(&self, text: &str) -> String {
        text.replace(&self.api_key, "***")
    }

    async fn post<B, R>(&self, model: &str, method: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(model, method);
        debug!("Sending request to Gemini API: {}", self.redact(&url));

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let error = transport_error(&e);
                warn!("Gemini request failed: {}", self.redact(&error.to_string()));
                error
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = self.redact(&body);
            warn!(status = status.as_u16(), "Gemini API returned an error: {}", body);
            return Err(status_error(status.as_u16(), &body));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(self.redact(&e.to_string())))
    }
}

fn client_builder(connect_timeout: Option<Duration>) -> ClientBuilder {
    let builder = Client::builder();
    match connect_timeout {
        Some(limit) => builder.connect_timeout(limit),
        None => builder,
    }
}

#[async_trait]
impl TextGenerator for GeminiGateway {
    async fn generate_structured(
        &self,
        request: TextGenerationRequest,
    ) -> Result<String, GatewayError> {
        let body = GenerateContentRequest::structured(&request.prompt, request.schema);
        let response: GenerateContentResponse = self
            .post(&request.model, "generateContent", &body)
            .await?;

        match response.text() {
            Some(text) => {
                debug!(
                    bytes = text.len(),
                    finish_reason = response.finish_reason().unwrap_or("unknown"),
                    "Gemini response received"
                );
                Ok(text)
            }
            None => Err(GatewayError::InvalidResponse(format!(
                "no candidates in response (finish reason: {})",
                response.finish_reason().unwrap_or("none")
            ))),
        }
    }
}

#[async_trait]
impl ImageGenerator for GeminiGateway {
    async fn generate_images(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<Vec<GeneratedImage>, GatewayError> {
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: request.prompt,
            }],
            parameters: PredictParameters {
                sample_count: request.count,
                aspect_ratio: request.aspect_ratio,
                output_options: OutputOptions {
                    mime_type: request.mime_type.clone(),
                },
            },
        };

        let response: PredictResponse = self.post(&request.model, "predict", &body).await?;

        let images: Vec<GeneratedImage> = response
            .predictions
            .into_iter()
            .filter_map(|prediction| {
                let bytes = prediction.bytes_base64_encoded?;
                Some(GeneratedImage {
                    mime_type: prediction
                        .mime_type
                        .unwrap_or_else(|| request.mime_type.clone()),
                    base64_bytes: bytes,
                })
            })
            .collect();

        debug!(count = images.len(), "Imagen response received");
        Ok(images)
    }
}
