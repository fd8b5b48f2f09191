//! User-facing error text

/// Message shown to the user whenever itinerary generation fails.
///
/// The specific cause is logged, never displayed.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate tour package. The AI model may be temporarily unavailable. Please try again later.";
