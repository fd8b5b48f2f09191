//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for a generated tour package
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full package with itinerary, hotel and price breakdown (default)
    #[default]
    Full,
    /// Name, price and one line per day
    Summary,
    /// JSON output
    Json,
}
