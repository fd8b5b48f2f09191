//! Application-level configuration.
//!
//! - [`GenerationParams`] — model selection, timeouts, image fan-out

pub mod generation_params;

pub use generation_params::GenerationParams;
