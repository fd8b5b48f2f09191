//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod exporter;
pub mod image_generator;
pub mod progress;
pub mod run_journal;
pub mod text_generator;
