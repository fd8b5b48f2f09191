//! Prompt templates for the generation pipeline

use crate::trip::request::TripRequest;

/// Parameters sent with every image request
pub struct ImageSpec;

impl ImageSpec {
    /// One picture per itinerary day
    pub const COUNT: u32 = 1;
    pub const MIME_TYPE: &'static str = "image/jpeg";
    pub const ASPECT_RATIO: &'static str = "16:9";
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Instruction for the itinerary text model
    pub fn package_prompt(request: &TripRequest) -> String {
        format!(
            r#"Act as an expert travel agent. Generate a detailed and exciting tour package based on the following criteria:

- **Destination:** {location}
- **Duration:** {days} days
- **Number of Travelers:** {travelers}
- **Hotel Preference:** {hotel}

Please create a complete package including a creative package name, a day-by-day itinerary, a suitable hotel suggestion, and a detailed price breakdown. The tone should be enthusiastic and appealing to a traveler. Ensure all prices are estimated and clearly stated. The total price should be the sum of the price breakdown items. The hotel suggestion must match the requested preference. The itinerary should be logical for the duration and location and contain exactly {days} days numbered 1 to {days}."#,
            location = request.location(),
            days = request.days(),
            travelers = request.travelers(),
            hotel = request.hotel_tier(),
        )
    }

    /// Subject of one day's illustration
    pub fn image_subject(day_title: &str, location: &str) -> String {
        format!("{day_title}, {location}")
    }

    /// Styled prompt for the image model
    pub fn image_prompt(subject: &str) -> String {
        format!(
            r#"A vibrant, photorealistic, high-quality photograph representing: "{subject}". Centered, well-lit, travel photography style."#
        )
    }
}
