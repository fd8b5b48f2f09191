//! Tour package subdomain.
//!
//! - [`entities`] — the package, its days, price lines and hotel
//! - [`image::ImageRef`] — per-day illustration or the "no image" sentinel
//! - [`schema`] — the JSON schema declared to the text model
//! - [`validation`] — structural and semantic checks
//! - [`audit::PriceAudit`] — advisory total-versus-breakdown comparison

pub mod audit;
pub mod entities;
pub mod image;
pub mod schema;
pub mod validation;
