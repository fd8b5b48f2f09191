//! Output schema declared to the text model
//!
//! The same document constrains the model's JSON output and drives
//! [`super::validation::PackageValidator::validate_json`].

use serde_json::{Value, json};

/// Schema of a tour package response (OpenAPI subset used by the hosted model)
pub fn tour_package_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "packageName": { "type": "STRING", "description": "A catchy name for the tour package." },
            "location": { "type": "STRING", "description": "The destination city and country." },
            "durationDays": { "type": "INTEGER", "description": "The total number of days for the trip." },
            "overallDescription": { "type": "STRING", "description": "A brief, inviting summary of the entire trip experience." },
            "totalPrice": { "type": "NUMBER", "description": "The total estimated price for the package." },
            "currency": { "type": "STRING", "description": "The currency of the price (e.g., USD, EUR)." },
            "priceBreakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "item": { "type": "STRING", "description": "Category of the expense (e.g., Flights, Hotel, Activities)." },
                        "cost": { "type": "NUMBER", "description": "Estimated cost for this item." },
                        "description": { "type": "STRING", "description": "Brief description of what this cost covers." }
                    },
                    "required": ["item", "cost", "description"]
                }
            },
            "suggestedHotel": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING", "description": "Name of a suggested hotel." },
                    "rating": { "type": "STRING", "description": "Star rating or type of the hotel (e.g., 4-star, Boutique)." },
                    "description": { "type": "STRING", "description": "Brief description of the hotel and its amenities." },
                    "estimatedPricePerNight": { "type": "NUMBER", "description": "Estimated price per night for the hotel." }
                },
                "required": ["name", "rating", "description", "estimatedPricePerNight"]
            },
            "itinerary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "INTEGER", "description": "The day number of the itinerary." },
                        "title": { "type": "STRING", "description": "A theme or title for the day's activities." },
                        "activities": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "A list of activities and sights for the day."
                        }
                    },
                    "required": ["day", "title", "activities"]
                }
            }
        },
        "required": [
            "packageName", "location", "durationDays", "overallDescription",
            "totalPrice", "currency", "priceBreakdown", "suggestedHotel", "itinerary"
        ]
    })
}
