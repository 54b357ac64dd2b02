//! Field-level validation rules shared by the student, course and enrollment
//! forms.
//!
//! Every rule reports a [`ValidationError`] naming the violated rule and the
//! offending field. Callers run all rules before touching the store, so a
//! rejected form never leaves a partial write behind.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::types::Date;

/// Fractional digits kept for NUMERIC(_, 2) columns. Extra digits are
/// rounded half away from zero, as Postgres does on store.
pub const DECIMAL_PLACES: u32 = 2;

/// Date format accepted for `date_of_birth` and `enrollment_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// A single violated input rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are required! Missing: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid {field} value!")]
    InvalidNumericValue { field: &'static str },

    #[error("{field} should be between {min} and {max}!")]
    OutOfRange {
        field: &'static str,
        min: Decimal,
        max: Decimal,
    },

    #[error("Enter a valid email address.")]
    InvalidEmail,

    #[error("Select a valid choice. '{value}' is not one of the available {field} choices.")]
    InvalidChoice { field: &'static str, value: String },

    #[error("Invalid {field}: expected a date in YYYY-MM-DD format")]
    InvalidDate { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("A student with this roll number already exists!")]
    DuplicateIdentifier,

    #[error("A student with this email already exists!")]
    DuplicateEmail,

    #[error("A course with this code already exists!")]
    DuplicateCourseCode,

    #[error("This student is already enrolled in this course!")]
    AlreadyEnrolled,
}

impl ValidationError {
    /// Stable machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::InvalidNumericValue { .. } => "INVALID_NUMERIC_VALUE",
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidChoice { .. } => "INVALID_CHOICE",
            Self::InvalidDate { .. } => "INVALID_DATE",
            Self::TooLong { .. } => "TOO_LONG",
            Self::DuplicateIdentifier => "DUPLICATE_IDENTIFIER",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::DuplicateCourseCode => "DUPLICATE_COURSE_CODE",
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
        }
    }

    /// Name of the input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::InvalidNumericValue { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidChoice { field, .. }
            | Self::InvalidDate { field }
            | Self::TooLong { field, .. } => field,
            Self::InvalidEmail | Self::DuplicateEmail => "email",
            Self::DuplicateIdentifier => "roll_number",
            Self::DuplicateCourseCode => "code",
            Self::AlreadyEnrolled => "course_id",
        }
    }

    /// Whether the error is a uniqueness violation against existing records
    /// rather than a defect in the input itself.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateIdentifier
                | Self::DuplicateEmail
                | Self::DuplicateCourseCode
                | Self::AlreadyEnrolled
        )
    }

    /// Map a unique-constraint name from the store back to the error the
    /// pre-write check would have reported.
    ///
    /// Returns `None` for constraints this layer does not own.
    pub fn from_unique_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            "uq_students_roll_number" => Some(Self::DuplicateIdentifier),
            "uq_students_email" => Some(Self::DuplicateEmail),
            "uq_courses_code" => Some(Self::DuplicateCourseCode),
            "uq_enrollments_student_course" => Some(Self::AlreadyEnrolled),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw numeric input
// ---------------------------------------------------------------------------

/// A numeric field as submitted by a client: a JSON number, a string that
/// still has to be parsed, or any other JSON value.
///
/// Kept unparsed so a malformed value can be reported as
/// [`ValidationError::InvalidNumericValue`] and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
    /// Booleans, arrays and objects. Never a number.
    Other(serde_json::Value),
}

impl NumericInput {
    /// The textual form of the value, as it would appear in a form field.
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Other(v) => v.to_string(),
        }
    }

    /// `true` for an empty or whitespace-only string.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(value.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Require a non-blank text field, returning it trimmed.
pub fn require_text<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField { field }),
    }
}

/// Require a numeric field to be present and non-blank.
pub fn require_numeric<'a>(
    field: &'static str,
    value: Option<&'a NumericInput>,
) -> Result<&'a NumericInput, ValidationError> {
    match value {
        Some(v) if !v.is_blank() => Ok(v),
        _ => Err(ValidationError::MissingField { field }),
    }
}

/// Normalize an optional text field: trimmed, blank becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a decimal and check that it lies within `[min, max]` (inclusive),
/// rounding it to [`DECIMAL_PLACES`].
///
/// The range is checked before rounding, so `100.004` is out of `[0, 100]`.
/// Text too large (or too finely scaled) for [`Decimal`] that still reads as
/// a float is judged by its float value, so `1e30` is out of range rather
/// than invalid.
pub fn parse_bounded_decimal(
    field: &'static str,
    raw: &NumericInput,
    min: Decimal,
    max: Decimal,
) -> Result<Decimal, ValidationError> {
    let text = match raw {
        NumericInput::Number(n) => n.to_string(),
        NumericInput::Text(s) => s.trim().to_string(),
        NumericInput::Other(_) => return Err(ValidationError::InvalidNumericValue { field }),
    };

    let value = match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        Ok(value) => value,
        Err(_) => float_fallback(field, &text, min, max)?,
    };
    check_decimal_range(field, value, min, max)?;
    Ok(value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero))
}

fn float_fallback(
    field: &'static str,
    text: &str,
    min: Decimal,
    max: Decimal,
) -> Result<Decimal, ValidationError> {
    let value: f64 = text
        .parse()
        .map_err(|_| ValidationError::InvalidNumericValue { field })?;
    if value.is_nan() {
        return Err(ValidationError::InvalidNumericValue { field });
    }

    let lo = min.to_f64().unwrap_or(f64::NEG_INFINITY);
    let hi = max.to_f64().unwrap_or(f64::INFINITY);
    if value < lo || value > hi {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Decimal::try_from(value).map_err(|_| ValidationError::InvalidNumericValue { field })
}

fn check_decimal_range(
    field: &'static str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(())
}

/// Parse a strictly positive whole number.
pub fn parse_positive_int(field: &'static str, raw: &NumericInput) -> Result<i32, ValidationError> {
    let value: i128 = match raw {
        NumericInput::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        NumericInput::Text(s) => s.trim().parse().ok(),
        NumericInput::Other(_) => None,
    }
    .ok_or(ValidationError::InvalidNumericValue { field })?;

    if value < 1 || value > i128::from(i32::MAX) {
        return Err(ValidationError::OutOfRange {
            field,
            min: Decimal::ONE,
            max: Decimal::from(i32::MAX),
        });
    }
    Ok(value as i32)
}

/// Check that an email address is syntactically valid.
pub fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Parse an optional `YYYY-MM-DD` date. Blank input is treated as absent.
pub fn parse_optional_date(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<Date>, ValidationError> {
    match optional_text(raw) {
        None => Ok(None),
        Some(text) => Date::parse_from_str(&text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ValidationError::InvalidDate { field }),
    }
}

/// Check that a text value does not exceed `max` characters.
pub fn check_max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("name", Some("  Alice ")).unwrap(), "Alice");
        assert_matches!(
            require_text("name", Some("   ")),
            Err(ValidationError::MissingField { field: "name" })
        );
        assert_matches!(
            require_text("name", None),
            Err(ValidationError::MissingField { field: "name" })
        );
    }

    fn marks(raw: NumericInput) -> Result<Decimal, ValidationError> {
        parse_bounded_decimal("marks", &raw, Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    #[test]
    fn bounded_decimal_accepts_numbers_and_strings() {
        assert_eq!(marks(NumericInput::from("91.5")).unwrap(), Decimal::new(915, 1));
        assert_eq!(marks(NumericInput::from(91.5)).unwrap(), Decimal::new(915, 1));
        assert_eq!(marks(NumericInput::from(80)).unwrap(), Decimal::from(80));
        assert_eq!(marks(NumericInput::from(" 1e1 ")).unwrap(), Decimal::from(10));
    }

    #[test]
    fn bounded_decimal_rejects_non_numbers() {
        assert_matches!(
            marks(NumericInput::from("ninety")),
            Err(ValidationError::InvalidNumericValue { field: "marks" })
        );
        assert_matches!(
            marks(NumericInput::Other(serde_json::Value::Bool(true))),
            Err(ValidationError::InvalidNumericValue { field: "marks" })
        );
        assert_matches!(
            marks(NumericInput::from("NaN")),
            Err(ValidationError::InvalidNumericValue { field: "marks" })
        );
    }

    #[test]
    fn bounded_decimal_rounds_excess_precision() {
        assert_eq!(marks(NumericInput::from("91.555")).unwrap(), Decimal::new(9156, 2));
        assert_eq!(marks(NumericInput::from("91.554")).unwrap(), Decimal::new(9155, 2));
        assert_eq!(marks(NumericInput::from("91.500")).unwrap(), Decimal::new(915, 1));
        // Checked before rounding.
        assert_matches!(
            marks(NumericInput::from("100.004")),
            Err(ValidationError::OutOfRange { field: "marks", .. })
        );
    }

    #[test]
    fn bounded_decimal_range_is_inclusive() {
        assert_eq!(marks(NumericInput::from(0)).unwrap(), Decimal::ZERO);
        assert_eq!(marks(NumericInput::from(100)).unwrap(), Decimal::ONE_HUNDRED);
        assert_matches!(
            marks(NumericInput::from("-0.01")),
            Err(ValidationError::OutOfRange { .. })
        );
        assert_matches!(
            marks(NumericInput::from("100.01")),
            Err(ValidationError::OutOfRange { .. })
        );
    }

    #[test]
    fn numbers_beyond_decimal_capacity_are_out_of_range() {
        assert_matches!(
            marks(NumericInput::from("1000000000000000000000000000000")),
            Err(ValidationError::OutOfRange { field: "marks", .. })
        );
        assert_matches!(
            marks(NumericInput::from(1e30)),
            Err(ValidationError::OutOfRange { field: "marks", .. })
        );
        assert_matches!(
            marks(NumericInput::from("-inf")),
            Err(ValidationError::OutOfRange { field: "marks", .. })
        );
    }

    #[test]
    fn positive_int_rules() {
        assert_eq!(parse_positive_int("credits", &NumericInput::from(3)).unwrap(), 3);
        assert_eq!(parse_positive_int("credits", &NumericInput::from(" 4 ")).unwrap(), 4);
        assert_matches!(
            parse_positive_int("credits", &NumericInput::from(0)),
            Err(ValidationError::OutOfRange { .. })
        );
        assert_matches!(
            parse_positive_int("credits", &NumericInput::from("2.5")),
            Err(ValidationError::InvalidNumericValue { .. })
        );
        assert_matches!(
            parse_positive_int("year", &NumericInput::from("99999999999")),
            Err(ValidationError::OutOfRange { field: "year", .. })
        );
        assert_matches!(
            parse_positive_int("year", &NumericInput::Other(serde_json::json!([2026]))),
            Err(ValidationError::InvalidNumericValue { field: "year" })
        );
    }

    #[test]
    fn email_syntax() {
        assert!(check_email("alice@x.com").is_ok());
        assert_matches!(check_email("alice"), Err(ValidationError::InvalidEmail));
        assert_matches!(check_email("alice@"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn optional_dates() {
        assert_eq!(parse_optional_date("date_of_birth", Some("")).unwrap(), None);
        assert_eq!(
            parse_optional_date("date_of_birth", Some("2001-02-03")).unwrap(),
            Date::from_ymd_opt(2001, 2, 3)
        );
        assert_matches!(
            parse_optional_date("date_of_birth", Some("03/02/2001")),
            Err(ValidationError::InvalidDate { field: "date_of_birth" })
        );
    }

    #[test]
    fn conflicts_and_constraint_mapping() {
        assert!(ValidationError::DuplicateEmail.is_conflict());
        assert!(!ValidationError::InvalidEmail.is_conflict());
        assert_eq!(
            ValidationError::from_unique_constraint("uq_students_roll_number"),
            Some(ValidationError::DuplicateIdentifier)
        );
        assert_eq!(ValidationError::from_unique_constraint("students_pkey"), None);
    }

    #[test]
    fn messages_name_the_rule() {
        assert_eq!(
            ValidationError::MissingField { field: "email" }.to_string(),
            "All fields are required! Missing: email"
        );
        assert_eq!(
            ValidationError::OutOfRange {
                field: "marks",
                min: Decimal::ZERO,
                max: Decimal::ONE_HUNDRED
            }
            .to_string(),
            "marks should be between 0 and 100!"
        );
    }
}
