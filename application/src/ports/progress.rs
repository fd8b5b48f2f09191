//! Progress notification port
//!
//! Defines the interface for reporting progress during a generation run.

use tourgen_domain::{PipelineSnapshot, PriceAudit, TourPackage};

/// Callback for progress updates during a generation run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log lines, etc.)
pub trait PipelineObserver: Send + Sync {
    /// Called whenever the run publishes a new state
    fn on_phase_change(&self, snapshot: &PipelineSnapshot);

    /// Called when one day's image request finishes
    fn on_image_complete(&self, day: u32, success: bool);

    /// Called as soon as the text-only package is available
    fn on_partial_package(&self, _package: &TourPackage) {}

    /// Called with the price consistency audit of a new package
    fn on_price_audit(&self, _audit: &PriceAudit) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoProgress;

impl PipelineObserver for NoProgress {
    fn on_phase_change(&self, _snapshot: &PipelineSnapshot) {}
    fn on_image_complete(&self, _day: u32, _success: bool) {}
}
