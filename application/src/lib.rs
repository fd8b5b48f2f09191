//! Application layer for tourgen
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use ports::{
    exporter::{ExportError, ExportReport, PackageExporter},
    image_generator::{GeneratedImage, ImageGenerationRequest, ImageGenerator},
    progress::{NoProgress, PipelineObserver},
    run_journal::{NoRunJournal, RunEvent, RunJournal},
    text_generator::{GatewayError, TextGenerationRequest, TextGenerator},
};
pub use use_cases::enrich_images::EnrichImagesUseCase;
pub use use_cases::generate_package::{GeneratePackageUseCase, GenerationError};
pub use use_cases::run_pipeline::TourPipeline;
