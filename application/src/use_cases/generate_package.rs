//! Generate Package use case
//!
//! Asks the text model for an itinerary under the declared schema and turns
//! the raw answer into a checked [`TourPackage`].
//!
//! A response passes through, in order:
//! 1. code-fence stripping and JSON parsing
//! 2. the shallow check on `packageName`, `itinerary` and `totalPrice`
//! 3. full structural validation against the schema
//! 4. typed deserialization and semantic checks (day count, unique days)

use crate::config::GenerationParams;
use crate::ports::text_generator::{GatewayError, TextGenerationRequest, TextGenerator};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tourgen_domain::{
    GENERATION_FAILED_MESSAGE, PackageValidator, PromptTemplate, SchemaViolation, TourPackage,
    TripRequest, ValidationError, tour_package_schema,
};
use tracing::{debug, error, info};

/// Errors that can occur while generating the itinerary text
///
/// `Display` carries the detailed cause for logs; users only ever see
/// [`GenerationError::user_message`].
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Gateway error: {0}")]
    Upstream(#[from] GatewayError),

    #[error("Response is not valid JSON: {0}")]
    MalformedResponse(String),

    #[error("Response is missing essential fields: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),

    #[error("Response does not match the schema: {}", join_errors(.0))]
    SchemaViolation(Vec<SchemaViolation>),

    #[error("Generated package is invalid: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("Text generation timed out after {0:?}")]
    Timeout(Duration),
}

impl GenerationError {
    /// Message safe to show to the user, whatever the cause
    pub fn user_message(&self) -> &'static str {
        GENERATION_FAILED_MESSAGE
    }
}

fn join_errors<E: std::fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Use case for generating the text part of a tour package
pub struct GeneratePackageUseCase {
    generator: Arc<dyn TextGenerator>,
    params: GenerationParams,
}

impl GeneratePackageUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>, params: GenerationParams) -> Self {
        Self { generator, params }
    }

    pub async fn execute(&self, request: &TripRequest) -> Result<TourPackage, GenerationError> {
        info!(
            location = request.location(),
            days = request.days(),
            model = %self.params.text_model,
            "Generating itinerary"
        );

        let generation = TextGenerationRequest::new(
            &self.params.text_model,
            PromptTemplate::package_prompt(request),
            tour_package_schema(),
        );

        let raw = match self.params.text_timeout {
            Some(limit) => {
                tokio::time::timeout(limit, self.generator.generate_structured(generation))
                    .await
                    .map_err(|_| GenerationError::Timeout(limit))??
            }
            None => self.generator.generate_structured(generation).await?,
        };

        debug!(bytes = raw.len(), "Received itinerary response");
        parse_package(&raw, request.days())
    }
}

/// Turn a raw model answer into a checked package for `expected_days` days
pub fn parse_package(raw: &str, expected_days: u32) -> Result<TourPackage, GenerationError> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body).map_err(|e| {
        error!(error = %e, "Failed to parse itinerary response as JSON");
        GenerationError::MalformedResponse(e.to_string())
    })?;

    let missing = PackageValidator::missing_essentials(&value);
    if !missing.is_empty() {
        return Err(GenerationError::Incomplete(missing));
    }

    PackageValidator::validate_json(&value).map_err(GenerationError::SchemaViolation)?;

    let package: TourPackage = serde_json::from_value(value)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    PackageValidator::check_package(&package, expected_days).map_err(GenerationError::Invalid)?;

    Ok(package)
}

/// Remove an optional Markdown code fence (```json ... ```) around a body
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") up to the first newline
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}


#[cfg(test)]
mod tests {
    use super::test_support::{package_json, package_text};
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tourgen_domain::HotelTier;

    // ==================== Test Mocks ====================

    struct MockTextGenerator {
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
        prompts: Mutex<Vec<TextGenerationRequest>>,
    }

    impl MockTextGenerator {
        fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for MockTextGenerator {
        async fn generate_structured(
            &self,
            request: TextGenerationRequest,
        ) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
        }
    }

    struct SlowTextGenerator;

    #[async_trait]
    impl TextGenerator for SlowTextGenerator {
        async fn generate_structured(
            &self,
            _request: TextGenerationRequest,
        ) -> Result<String, GatewayError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(package_text("Too Late", 3))
        }
    }

    fn kyoto_request(days: u32) -> TripRequest {
        TripRequest::new("Kyoto, Japan", days, 2, HotelTier::FourStar).unwrap()
    }

    // ==================== Parsing ====================

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_parse_valid_package() {
        let package = parse_package(&package_text("Kyoto Escape", 3), 3).unwrap();
        assert_eq!(package.name, "Kyoto Escape");
        assert_eq!(package.day_numbers(), vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_fenced_package() {
        let raw = format!("```json\n{}\n```", package_text("Fenced", 2));
        assert!(parse_package(&raw, 2).is_ok());
    }

    #[test]
    fn test_parse_not_json() {
        let err = parse_package("Sorry, I can't help with that.", 3).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
        assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
    }

    #[test]
    fn test_parse_missing_package_name() {
        let mut value = package_json("x", 3);
        value.as_object_mut().unwrap().remove("packageName");

        let err = parse_package(&value.to_string(), 3).unwrap_err();
        match err {
            GenerationError::Incomplete(fields) => assert_eq!(fields, vec!["packageName"]),
            other => panic!("Expected Incomplete, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_zero_total_is_incomplete() {
        let mut value = package_json("Free Trip", 3);
        value["totalPrice"] = serde_json::json!(0);
        let err = parse_package(&value.to_string(), 3).unwrap_err();
        assert!(matches!(err, GenerationError::Incomplete(_)));
    }

    #[test]
    fn test_parse_nested_schema_violation() {
        let mut value = package_json("Broken", 3);
        value["itinerary"][2]
            .as_object_mut()
            .unwrap()
            .remove("activities");

        let err = parse_package(&value.to_string(), 3).unwrap_err();
        match err {
            GenerationError::SchemaViolation(violations) => {
                assert_eq!(violations[0].path(), "$.itinerary[2].activities");
            }
            other => panic!("Expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_wrong_day_count() {
        let err = parse_package(&package_text("Short", 2), 3).unwrap_err();
        match err {
            GenerationError::Invalid(errors) => assert_eq!(
                errors,
                vec![ValidationError::DayCountMismatch {
                    expected: 3,
                    actual: 2
                }]
            ),
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_duplicate_day_numbers() {
        let mut value = package_json("Dupes", 3);
        value["itinerary"][2]["day"] = serde_json::json!(2);
        let err = parse_package(&value.to_string(), 3).unwrap_err();
        assert!(err.to_string().contains("day 2 appears more than once"));
    }

    // ==================== Use case ====================

    #[tokio::test]
    async fn test_execute_sends_prompt_schema_and_model() {
        let generator = Arc::new(MockTextGenerator::new(vec![Ok(package_text("Kyoto", 3))]));
        let use_case = GeneratePackageUseCase::new(generator.clone(), GenerationParams::default());

        let package = use_case.execute(&kyoto_request(3)).await.unwrap();
        assert_eq!(package.days.len(), 3);

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].model, "gemini-2.5-flash");
        assert!(prompts[0].prompt.contains("Kyoto, Japan"));
        assert_eq!(prompts[0].schema, tour_package_schema());
    }

    #[tokio::test]
    async fn test_execute_upstream_error() {
        let generator = Arc::new(MockTextGenerator::new(vec![Err(GatewayError::Http {
            status: 503,
            body: "overloaded".to_string(),
        })]));
        let use_case = GeneratePackageUseCase::new(generator, GenerationParams::default());

        let err = use_case.execute(&kyoto_request(3)).await.unwrap_err();
        assert!(matches!(err, GenerationError::Upstream(_)));
        assert!(err.to_string().contains("503"));
        assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_execute_text_timeout() {
        let params =
            GenerationParams::default().with_text_timeout(Some(Duration::from_millis(20)));
        let use_case = GeneratePackageUseCase::new(Arc::new(SlowTextGenerator), params);

        let err = use_case.execute(&kyoto_request(3)).await.unwrap_err();
        assert!(matches!(err, GenerationError::Timeout(_)));
    }
}
