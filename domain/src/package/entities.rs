//! Tour package entities
//!
//! Field names on the wire follow the contract declared to the text model
//! (see [`super::schema::tour_package_schema`]); the Rust names describe
//! what each field means in this crate.

use super::image::ImageRef;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day of the itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// 1-based day number, unique within a package
    pub day: u32,
    /// Theme of the day's activities
    pub title: String,
    /// Activities and sights, in order
    pub activities: Vec<String>,
    /// Illustration attached by the image enrichment step
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl ItineraryDay {
    pub fn new(day: u32, title: impl Into<String>, activities: Vec<String>) -> Self {
        Self {
            day,
            title: title.into(),
            activities,
            image: None,
        }
    }

    /// True when a real (non-sentinel) image is attached
    pub fn has_image(&self) -> bool {
        matches!(&self.image, Some(image) if !image.is_placeholder())
    }
}

/// One line of the estimated price breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLine {
    /// Expense category (Flights, Hotel, Activities, ...)
    #[serde(rename = "item")]
    pub category: String,
    pub cost: Decimal,
    /// What this cost covers
    #[serde(rename = "description")]
    pub note: String,
}

/// Hotel suggested for the stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelSuggestion {
    pub name: String,
    /// Star rating or kind of hotel as phrased by the model
    #[serde(rename = "rating")]
    pub rating_label: String,
    pub description: String,
    #[serde(rename = "estimatedPricePerNight")]
    pub price_per_night: Decimal,
}

/// A complete generated tour package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourPackage {
    #[serde(rename = "packageName")]
    pub name: String,
    pub location: String,
    #[serde(rename = "durationDays")]
    pub duration_days: u32,
    #[serde(rename = "overallDescription")]
    pub summary: String,
    #[serde(rename = "totalPrice")]
    pub total_cost: Decimal,
    #[serde(rename = "currency")]
    pub currency_code: String,
    #[serde(rename = "priceBreakdown")]
    pub price_lines: Vec<PriceLine>,
    #[serde(rename = "suggestedHotel")]
    pub hotel: HotelSuggestion,
    #[serde(rename = "itinerary")]
    pub days: Vec<ItineraryDay>,
}

impl TourPackage {
    /// Attach image results to the itinerary by position.
    ///
    /// Image `i` goes to day `i`. Days without a matching result receive the
    /// placeholder; surplus results are dropped.
    pub fn with_images(mut self, images: Vec<ImageRef>) -> Self {
        let mut images = images.into_iter();
        for day in &mut self.days {
            day.image = Some(images.next().unwrap_or(ImageRef::Placeholder));
        }
        self
    }

    /// Sum of all price lines
    pub fn price_line_total(&self) -> Decimal {
        self.price_lines.iter().map(|line| line.cost).sum()
    }

    /// Day numbers in itinerary order
    pub fn day_numbers(&self) -> Vec<u32> {
        self.days.iter().map(|d| d.day).collect()
    }

    /// Number of days that received a real image
    pub fn image_count(&self) -> usize {
        self.days.iter().filter(|d| d.has_image()).count()
    }

    /// Exported file name of a day's image; `None` unless the day has a real image
    pub fn image_file_name(&self, day: &ItineraryDay) -> Option<String> {
        let image = day.image.as_ref().filter(|image| !image.is_placeholder())?;
        Some(format!(
            "{}-day-{}.{}",
            self.export_file_stem(),
            day.day,
            image.file_extension()
        ))
    }

    /// File stem for exported documents: whitespace runs become `-`.
    pub fn export_file_stem(&self) -> String {
        let slug = self.name.split_whitespace().collect::<Vec<_>>().join("-");
        if slug.is_empty() {
            "tour-package-itinerary".to_string()
        } else {
            format!("{slug}-itinerary")
        }
    }
}
