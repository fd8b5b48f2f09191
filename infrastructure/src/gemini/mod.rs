//! Gemini adapter
//!
//! Implements `TextGenerator` and `ImageGenerator` over the Gemini REST API.

pub mod error;
pub mod gateway;
pub mod types;
