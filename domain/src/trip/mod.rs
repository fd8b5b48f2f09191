//! Trip request subdomain.
//!
//! - [`request::TripRequest`] — validated user preferences for one run
//! - [`hotel_tier::HotelTier`] — accommodation preference

pub mod hotel_tier;
pub mod request;
