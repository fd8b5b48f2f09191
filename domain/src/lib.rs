//! Domain layer for tourgen
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Trip request
//!
//! A validated set of preferences (destination, days, travelers, hotel tier)
//! that drives one generation run.
//!
//! ## Tour package
//!
//! The structured itinerary returned by the text model, checked against the
//! declared schema and later enriched with one image per day.
//!
//! ## Pipeline
//!
//! - **GeneratingText**: the itinerary is being written
//! - **GeneratingImages**: the text-only package is visible, pictures pending
//! - **Ready / Failed**: terminal states

pub mod config;
pub mod core;
pub mod package;
pub mod pipeline;
pub mod prompt;
pub mod trip;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::error::GENERATION_FAILED_MESSAGE;
pub use package::{
    audit::PriceAudit,
    entities::{HotelSuggestion, ItineraryDay, PriceLine, TourPackage},
    image::ImageRef,
    schema::tour_package_schema,
    validation::{PackageValidator, PackageWarning, SchemaViolation, ValidationError},
};
pub use pipeline::{PipelinePhase, PipelineSnapshot, PipelineStatus};
pub use prompt::{ImageSpec, PromptTemplate};
pub use trip::{
    hotel_tier::{HotelTier, UnknownHotelTier},
    request::{LOCATION_SUGGESTIONS, MAX_DAYS, MAX_TRAVELERS, TripRequest, TripRequestError},
};
