//! Price consistency audit
//!
//! The prompt asks the model for a total equal to the sum of the price
//! breakdown. Nothing enforces it; the audit only reports the outcome.

use super::entities::TourPackage;
use rust_decimal::Decimal;
use serde::Serialize;

/// Largest difference still treated as consistent (one cent)
pub fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Result of comparing the stated total with the price breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PriceAudit {
    Consistent {
        total: Decimal,
    },
    Mismatch {
        stated: Decimal,
        computed: Decimal,
        difference: Decimal,
    },
}

impl PriceAudit {
    pub fn of(package: &TourPackage) -> Self {
        let stated = package.total_cost;
        let computed = package.price_line_total();
        let difference = (stated - computed).abs();

        if difference <= tolerance() {
            PriceAudit::Consistent { total: stated }
        } else {
            PriceAudit::Mismatch {
                stated,
                computed,
                difference,
            }
        }
    }

    pub fn is_consistent(&self) -> bool {
        matches!(self, PriceAudit::Consistent { .. })
    }
}

impl std::fmt::Display for PriceAudit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceAudit::Consistent { total } => {
                write!(f, "total {total} matches the price breakdown")
            }
            PriceAudit::Mismatch {
                stated,
                computed,
                difference,
            } => write!(
                f,
                "stated total {stated} differs from breakdown sum {computed} by {difference}"
            ),
        }
    }
}
