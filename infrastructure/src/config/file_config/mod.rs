//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod export;
mod gemini;
mod generation;
mod logging;
mod output;

pub use export::FileExportConfig;
pub use gemini::{FALLBACK_API_KEY_ENV, FileGeminiConfig};
pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tourgen_application::GenerationParams;

/// Configuration validation issues
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("{field}: timeout cannot be 0")]
    InvalidTimeout { field: &'static str },

    #[error("{field}: model name cannot be empty")]
    EmptyModelName { field: &'static str },

    #[error("gemini.base_url: '{0}' is not an http(s) URL")]
    InvalidBaseUrl(String),

    #[error("gemini.api_key_env cannot be empty")]
    EmptyApiKeyEnv,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Hosted model provider settings
    pub gemini: FileGeminiConfig,
    /// Pipeline settings
    pub generation: FileGenerationConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Export settings
    pub export: FileExportConfig,
    /// Log file and run journal
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.gemini.text_model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName {
                field: "gemini.text_model",
            });
        }
        if self.gemini.image_model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName {
                field: "gemini.image_model",
            });
        }
        if self.gemini.api_key_env.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyApiKeyEnv);
        }

        let url = self.gemini.base_url.as_str();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            issues.push(ConfigValidationError::InvalidBaseUrl(url.to_string()));
        }

        if self.generation.image_timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout {
                field: "generation.image_timeout_seconds",
            });
        }
        if self.generation.text_timeout_seconds == Some(0) {
            issues.push(ConfigValidationError::InvalidTimeout {
                field: "generation.text_timeout_seconds",
            });
        }

        issues
    }

    /// Pipeline parameters described by this configuration
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_text_model(&self.gemini.text_model)
            .with_image_model(&self.gemini.image_model)
            .with_image_timeout(Some(Duration::from_secs(
                self.generation.image_timeout_seconds,
            )))
            .with_text_timeout(self.generation.text_timeout_seconds.map(Duration::from_secs))
            .with_max_concurrent_images(self.generation.max_concurrent_images)
            .with_images_enabled(self.generation.images)
    }

    /// Connect timeout for the HTTP client, `None` when set to 0
    pub fn connect_timeout(&self) -> Option<Duration> {
        match self.gemini.connect_timeout_seconds {
            0 => None,
            seconds => Some(Duration::from_secs(seconds)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourgen_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[gemini]
api_key_env = "MY_GEMINI_KEY"
text_model = "gemini-2.5-pro"
connect_timeout_seconds = 5

[generation]
image_timeout_seconds = 30
text_timeout_seconds = 120
max_concurrent_images = 3

[output]
format = "json"
color = false

[export]
directory = "itineraries"

[logging]
journal = "runs.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.gemini.text_model, "gemini-2.5-pro");
        assert_eq!(config.gemini.image_model, "imagen-4.0-generate-001");
        assert_eq!(config.generation.max_concurrent_images, 3);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert_eq!(
            config.export.directory.as_deref(),
            Some(std::path::Path::new("itineraries"))
        );
        assert!(config.logging.file.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[generation]
images = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.generation.images);
        // Defaults should apply
        assert_eq!(config.gemini.text_model, "gemini-2.5-flash");
        assert_eq!(config.generation.image_timeout_seconds, 60);
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.gemini.api_key_env, "GEMINI_API_KEY");
        assert!(config.gemini.api_key.is_none());
        assert!(config.export.directory.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_all_issues() {
        let mut config = FileConfig::default();
        config.gemini.text_model = " ".to_string();
        config.gemini.base_url = "generativelanguage.googleapis.com".to_string();
        config.generation.image_timeout_seconds = 0;
        config.generation.text_timeout_seconds = Some(0);

        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.contains(&ConfigValidationError::EmptyModelName {
            field: "gemini.text_model"
        }));
        assert!(issues.contains(&ConfigValidationError::InvalidTimeout {
            field: "generation.text_timeout_seconds"
        }));
    }

    #[test]
    fn test_generation_params_from_config() {
        let mut config = FileConfig::default();
        config.gemini.image_model = "imagen-3".to_string();
        config.generation.text_timeout_seconds = Some(45);
        config.generation.max_concurrent_images = 2;

        let params = config.generation_params();
        assert_eq!(params.text_model, "gemini-2.5-flash");
        assert_eq!(params.image_model, "imagen-3");
        assert_eq!(params.image_timeout, Some(Duration::from_secs(60)));
        assert_eq!(params.text_timeout, Some(Duration::from_secs(45)));
        assert_eq!(params.max_concurrent_images, 2);
        assert!(params.images_enabled);
    }

    #[test]
    fn test_connect_timeout_zero_disables_it() {
        let mut config = FileConfig::default();
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(10)));

        config.gemini.connect_timeout_seconds = 0;
        assert_eq!(config.connect_timeout(), None);
        assert!(config.validate().is_empty());
    }
}
