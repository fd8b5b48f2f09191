//! Core domain concepts shared across all subdomains.
//!
//! - [`error::GENERATION_FAILED_MESSAGE`] — the only failure text users see

pub mod error;
