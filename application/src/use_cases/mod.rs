//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod enrich_images;
pub mod generate_package;
pub mod run_pipeline;
