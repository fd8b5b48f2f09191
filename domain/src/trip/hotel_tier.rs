//! Hotel tier value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a hotel tier label is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown hotel tier '{0}' (expected one of: 3-star, 4-star, 5-star, Boutique)")]
pub struct UnknownHotelTier(pub String);

/// Accommodation preference for a trip (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HotelTier {
    ThreeStar,
    #[default]
    FourStar,
    FiveStar,
    Boutique,
}

impl HotelTier {
    /// All tiers in the order they are offered to the user
    pub const ALL: [HotelTier; 4] = [
        HotelTier::ThreeStar,
        HotelTier::FourStar,
        HotelTier::FiveStar,
        HotelTier::Boutique,
    ];

    /// Get the label used in prompts and in the upstream contract
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelTier::ThreeStar => "3-star",
            HotelTier::FourStar => "4-star",
            HotelTier::FiveStar => "5-star",
            HotelTier::Boutique => "Boutique",
        }
    }

    /// Check whether a free-form rating label returned by the model
    /// plausibly describes this tier (e.g. "4-star", "4 Star Hotel", "boutique").
    pub fn matches_label(&self, label: &str) -> bool {
        let normalized: String = label
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match self {
            HotelTier::Boutique => normalized.contains("boutique"),
            tier => {
                let digit = match tier {
                    HotelTier::ThreeStar => '3',
                    HotelTier::FourStar => '4',
                    _ => '5',
                };
                normalized.contains(&format!("{digit}star"))
            }
        }
    }
}

impl std::fmt::Display for HotelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HotelTier {
    type Err = UnknownHotelTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match key.as_str() {
            "3" | "3star" | "three" | "threestar" => Ok(HotelTier::ThreeStar),
            "4" | "4star" | "four" | "fourstar" => Ok(HotelTier::FourStar),
            "5" | "5star" | "five" | "fivestar" => Ok(HotelTier::FiveStar),
            "boutique" => Ok(HotelTier::Boutique),
            _ => Err(UnknownHotelTier(s.to_string())),
        }
    }
}

impl Serialize for HotelTier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HotelTier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
