//! Student schema variants.
//!
//! A deployment runs exactly one variant. The variant decides which name
//! fields and which performance field (`marks` or `gpa`) a student carries,
//! the accepted range of that field, and the default listing order.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

/// Which student shape this deployment stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// `roll_number`, `name`, `email`, `marks` (0-100).
    #[default]
    Simple,
    /// Split first/last name, `gpa` (0.00-4.00) and optional demographic
    /// and academic attributes.
    Rich,
}

/// Default ordering of the unfiltered student list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentOrder {
    RollNumber,
    LastNameFirstName,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown student schema '{0}', expected 'simple' or 'rich'")]
pub struct UnknownSchemaVariant(pub String);

impl SchemaVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Rich => "rich",
        }
    }

    /// Name of the scalar performance field for this variant.
    pub fn performance_field(self) -> &'static str {
        match self {
            Self::Simple => "marks",
            Self::Rich => "gpa",
        }
    }

    /// Inclusive range accepted for the performance field.
    pub fn performance_range(self) -> (Decimal, Decimal) {
        match self {
            Self::Simple => (Decimal::ZERO, Decimal::ONE_HUNDRED),
            Self::Rich => (Decimal::new(0, 2), Decimal::new(400, 2)),
        }
    }

    pub fn order(self) -> StudentOrder {
        match self {
            Self::Simple => StudentOrder::RollNumber,
            Self::Rich => StudentOrder::LastNameFirstName,
        }
    }
}

impl FromStr for SchemaVariant {
    type Err = UnknownSchemaVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "rich" => Ok(Self::Rich),
            other => Err(UnknownSchemaVariant(other.to_string())),
        }
    }
}
