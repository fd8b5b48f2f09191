//! Trip request value object

use super::hotel_tier::HotelTier;
use serde::Serialize;
use thiserror::Error;

/// Longest trip the generator accepts, in days
pub const MAX_DAYS: u32 = 30;

/// Largest travel party the generator accepts
pub const MAX_TRAVELERS: u32 = 20;

/// Destinations offered as suggestions to the user
pub const LOCATION_SUGGESTIONS: [&str; 9] = [
    "Paris, France",
    "Kyoto, Japan",
    "Rome, Italy",
    "Bali, Indonesia",
    "New York, USA",
    "Maui, Hawaii",
    "London, UK",
    "Queenstown, New Zealand",
    "Santorini, Greece",
];

/// Reasons a trip request can be rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TripRequestError {
    #[error("Destination cannot be empty")]
    EmptyLocation,

    #[error("Trip length must be between 1 and 30 days, got {0}")]
    DaysOutOfRange(u32),

    #[error("Number of travelers must be between 1 and 20, got {0}")]
    TravelersOutOfRange(u32),
}

/// The user's trip preferences (Value Object)
///
/// Immutable once built; one request drives exactly one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    location: String,
    days: u32,
    travelers: u32,
    hotel_tier: HotelTier,
}

impl TripRequest {
    /// Build a validated trip request
    pub fn new(
        location: impl Into<String>,
        days: u32,
        travelers: u32,
        hotel_tier: HotelTier,
    ) -> Result<Self, TripRequestError> {
        let location = location.into().trim().to_string();
        if location.is_empty() {
            return Err(TripRequestError::EmptyLocation);
        }
        if !(1..=MAX_DAYS).contains(&days) {
            return Err(TripRequestError::DaysOutOfRange(days));
        }
        if !(1..=MAX_TRAVELERS).contains(&travelers) {
            return Err(TripRequestError::TravelersOutOfRange(travelers));
        }

        Ok(Self {
            location,
            days,
            travelers,
            hotel_tier,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn travelers(&self) -> u32 {
        self.travelers
    }

    pub fn hotel_tier(&self) -> HotelTier {
        self.hotel_tier
    }
}

impl Default for TripRequest {
    /// Paris, 7 days, 2 travelers, 4-star
    fn default() -> Self {
        Self {
            location: LOCATION_SUGGESTIONS[0].to_string(),
            days: 7,
            travelers: 2,
            hotel_tier: HotelTier::FourStar,
        }
    }
}

impl std::fmt::Display for TripRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} for {} day(s), {} traveler(s), {} hotel",
            self.location, self.days, self.travelers, self.hotel_tier
        )
    }
}
