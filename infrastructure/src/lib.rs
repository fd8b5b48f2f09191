//! Infrastructure layer for tourgen
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod export;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileExportConfig, FileGeminiConfig,
    FileGenerationConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
};
pub use export::FileExporter;
pub use gemini::{
    error::GeminiError,
    gateway::{DEFAULT_BASE_URL, GeminiGateway},
};
pub use logging::JsonlRunJournal;
