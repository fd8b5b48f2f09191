//! Validation of generated tour packages
//!
//! Three layers, applied in order by the generator:
//! 1. [`PackageValidator::missing_essentials`] — the shallow completeness check
//!    on name, itinerary and total price
//! 2. [`PackageValidator::validate_json`] — full structural check of the raw
//!    JSON against the declared schema
//! 3. [`PackageValidator::check_package`] — semantic rules on the typed package

use super::entities::TourPackage;
use super::schema::tour_package_schema;
use crate::trip::hotel_tier::HotelTier;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Fields whose absence makes a response unusable
pub const ESSENTIAL_FIELDS: [&str; 3] = ["packageName", "itinerary", "totalPrice"];

/// A structural mismatch between a response and the declared schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("{path}: required field is missing")]
    Missing { path: String },

    #[error("{path}: expected {expected}, found {found}")]
    WrongType {
        path: String,
        expected: String,
        found: String,
    },
}

impl SchemaViolation {
    pub fn path(&self) -> &str {
        match self {
            SchemaViolation::Missing { path } | SchemaViolation::WrongType { path, .. } => path,
        }
    }
}

/// A semantic rule broken by an otherwise well-formed package
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("package name is empty")]
    EmptyName,

    #[error("itinerary has no days")]
    EmptyItinerary,

    #[error("day numbers start at 1, found day 0")]
    DayZero,

    #[error("day {0} appears more than once")]
    DuplicateDay(u32),

    #[error("itinerary has {actual} day(s) but {expected} were requested")]
    DayCountMismatch { expected: u32, actual: usize },

    #[error("price line '{0}' has a negative cost")]
    NegativeCost(String),

    #[error("hotel price per night is negative")]
    NegativeHotelPrice,

    #[error("total price is negative")]
    NegativeTotal,
}

/// Non-fatal observations about a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageWarning {
    /// The suggested hotel's rating does not read like the requested tier
    HotelTierMismatch { requested: HotelTier, returned: String },
}

impl std::fmt::Display for PackageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageWarning::HotelTierMismatch {
                requested,
                returned,
            } => write!(
                f,
                "requested a {requested} hotel but the suggestion is rated '{returned}'"
            ),
        }
    }
}

/// Validator for raw and typed tour packages
pub struct PackageValidator;

impl PackageValidator {
    /// Essential fields that are absent or falsy (null, false, 0, empty string)
    pub fn missing_essentials(value: &Value) -> Vec<&'static str> {
        ESSENTIAL_FIELDS
            .iter()
            .copied()
            .filter(|field| value.get(field).is_none_or(is_falsy))
            .collect()
    }

    /// Check a raw response against the declared tour package schema
    pub fn validate_json(value: &Value) -> Result<(), Vec<SchemaViolation>> {
        let mut violations = Vec::new();
        check_node(&tour_package_schema(), value, "$", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Semantic checks on a typed package generated for `expected_days` days
    pub fn check_package(
        package: &TourPackage,
        expected_days: u32,
    ) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if package.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName);
        }

        if package.days.is_empty() {
            errors.push(ValidationError::EmptyItinerary);
        } else if package.days.len() != expected_days as usize {
            errors.push(ValidationError::DayCountMismatch {
                expected: expected_days,
                actual: package.days.len(),
            });
        }

        let mut seen = HashSet::new();
        for day in &package.days {
            if day.day == 0 {
                errors.push(ValidationError::DayZero);
            } else if !seen.insert(day.day) {
                errors.push(ValidationError::DuplicateDay(day.day));
            }
        }

        for line in &package.price_lines {
            if line.cost < Decimal::ZERO {
                errors.push(ValidationError::NegativeCost(line.category.clone()));
            }
        }
        if package.hotel.price_per_night < Decimal::ZERO {
            errors.push(ValidationError::NegativeHotelPrice);
        }
        if package.total_cost < Decimal::ZERO {
            errors.push(ValidationError::NegativeTotal);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Advisory checks that never reject a package
    pub fn warnings(package: &TourPackage, requested_tier: HotelTier) -> Vec<PackageWarning> {
        let mut warnings = Vec::new();
        if !requested_tier.matches_label(&package.hotel.rating_label) {
            warnings.push(PackageWarning::HotelTierMismatch {
                requested: requested_tier,
                returned: package.hotel.rating_label.clone(),
            });
        }
        warnings
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "STRING" => value.is_string(),
        "NUMBER" => value.is_number(),
        "INTEGER" => value.is_i64() || value.is_u64(),
        "BOOLEAN" => value.is_boolean(),
        "ARRAY" => value.is_array(),
        "OBJECT" => value.is_object(),
        _ => true,
    }
}

fn check_node(schema: &Value, value: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
    let expected = schema["type"].as_str().unwrap_or_default();
    if !matches_type(expected, value) {
        out.push(SchemaViolation::WrongType {
            path: path.to_string(),
            expected: expected.to_lowercase(),
            found: json_type_name(value).to_string(),
        });
        return;
    }

    match value {
        Value::Object(map) => {
            if let Some(required) = schema["required"].as_array() {
                for field in required.iter().filter_map(Value::as_str) {
                    if map.get(field).is_none_or(Value::is_null) {
                        out.push(SchemaViolation::Missing {
                            path: format!("{path}.{field}"),
                        });
                    }
                }
            }
            if let Some(properties) = schema["properties"].as_object() {
                for (name, child_schema) in properties {
                    if let Some(child) = map.get(name).filter(|v| !v.is_null()) {
                        check_node(child_schema, child, &format!("{path}.{name}"), out);
                    }
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    check_node(item_schema, item, &format!("{path}[{i}]"), out);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::entities::ItineraryDay;
    use crate::package::entities::fixtures::kyoto_package;
    use serde_json::json;

    fn valid_json() -> Value {
        serde_json::to_value(kyoto_package()).unwrap()
    }

    #[test]
    fn test_valid_package_passes_schema() {
        assert!(PackageValidator::validate_json(&valid_json()).is_ok());
    }

    #[test]
    fn test_missing_essentials() {
        let mut value = valid_json();
        assert!(PackageValidator::missing_essentials(&value).is_empty());

        value.as_object_mut().unwrap().remove("packageName");
        value["totalPrice"] = json!(0);
        assert_eq!(
            PackageValidator::missing_essentials(&value),
            vec!["packageName", "totalPrice"]
        );
    }

    #[test]
    fn test_empty_itinerary_array_is_not_missing() {
        let mut value = valid_json();
        value["itinerary"] = json!([]);
        assert!(PackageValidator::missing_essentials(&value).is_empty());
    }

    #[test]
    fn test_nested_wrong_type_reports_path() {
        let mut value = valid_json();
        value["itinerary"][1]["activities"] = json!("walk around");

        let violations = PackageValidator::validate_json(&value).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path(), "$.itinerary[1].activities");
        assert!(violations[0].to_string().contains("expected array"));
    }

    #[test]
    fn test_nested_missing_field_reports_path() {
        let mut value = valid_json();
        value["suggestedHotel"]
            .as_object_mut()
            .unwrap()
            .remove("estimatedPricePerNight");

        let violations = PackageValidator::validate_json(&value).unwrap_err();
        assert_eq!(
            violations,
            vec![SchemaViolation::Missing {
                path: "$.suggestedHotel.estimatedPricePerNight".to_string()
            }]
        );
    }

    #[test]
    fn test_integer_rejects_fractional_day() {
        let mut value = valid_json();
        value["itinerary"][0]["day"] = json!(1.5);
        assert!(PackageValidator::validate_json(&value).is_err());
        value["itinerary"][0]["day"] = json!(1);
        assert!(PackageValidator::validate_json(&value).is_ok());
    }

    #[test]
    fn test_non_object_root() {
        let violations = PackageValidator::validate_json(&json!([1, 2])).unwrap_err();
        assert_eq!(violations[0].path(), "$");
    }

    #[test]
    fn test_check_package_ok() {
        assert!(PackageValidator::check_package(&kyoto_package(), 3).is_ok());
    }

    #[test]
    fn test_check_package_day_count_mismatch() {
        let errors = PackageValidator::check_package(&kyoto_package(), 4).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DayCountMismatch {
                expected: 4,
                actual: 3
            }]
        );
    }

    #[test]
    fn test_check_package_duplicate_day() {
        let mut package = kyoto_package();
        package.days[2] = ItineraryDay::new(2, "Again", vec![]);
        let errors = PackageValidator::check_package(&package, 3).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DuplicateDay(2)]);
    }

    #[test]
    fn test_check_package_negative_cost() {
        let mut package = kyoto_package();
        package.price_lines[0].cost = Decimal::new(-5, 0);
        let errors = PackageValidator::check_package(&package, 3).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NegativeCost("Flights".to_string())]);
    }

    #[test]
    fn test_hotel_tier_warning() {
        let package = kyoto_package();
        assert!(PackageValidator::warnings(&package, HotelTier::FourStar).is_empty());

        let warnings = PackageValidator::warnings(&package, HotelTier::FiveStar);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().contains("5-star"));
    }
}
