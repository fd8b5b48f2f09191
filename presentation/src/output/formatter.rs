//! Output formatter trait

use tourgen_domain::{OutputFormat, TourPackage};

/// Trait for formatting generated tour packages
pub trait OutputFormatter {
    /// Format the complete package
    fn format(&self, package: &TourPackage) -> String;

    /// Format as JSON
    fn format_json(&self, package: &TourPackage) -> String;

    /// Format a short overview (concise output)
    fn format_summary(&self, package: &TourPackage) -> String;

    /// Format in the requested output format
    fn render(&self, format: OutputFormat, package: &TourPackage) -> String {
        match format {
            OutputFormat::Full => self.format(package),
            OutputFormat::Summary => self.format_summary(package),
            OutputFormat::Json => self.format_json(package),
        }
    }
}
