//! Student form validation.
//!
//! [`validate_student`] turns a raw [`StudentForm`] into a [`ValidStudent`]
//! for the active [`SchemaVariant`], or reports the first violated rule.
//! Uniqueness depends on the store, so callers look up collisions first and
//! hand the result to [`check_uniqueness`].
//!
//! Rule order:
//! 1. presence of every required field
//! 2. performance field parses as a decimal, then lies in range
//! 3. email syntax
//! 4. optional attributes (choices, dates, lengths)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::choices::{parse_choice, Gender, YearLevel};
use crate::schema::SchemaVariant;
use crate::types::Date;
use crate::validation::{
    check_email, check_max_len, optional_text, parse_bounded_decimal, parse_optional_date,
    require_numeric, require_text, NumericInput, ValidationError,
};

/// Maximum length of a phone number.
pub const PHONE_MAX_LEN: usize = 15;

/// Raw student input as submitted, before any validation.
///
/// Every field is optional so that incomplete input can be reported (and
/// echoed back) instead of failing deserialization.
///
/// The identifier may arrive as `roll_number` or `student_id`; see
/// [`StudentForm::identifier`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentForm {
    pub roll_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub marks: Option<NumericInput>,
    pub gpa: Option<NumericInput>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub year_level: Option<String>,
    pub major: Option<String>,
    pub enrollment_date: Option<String>,
    pub is_active: Option<bool>,
}

impl StudentForm {
    /// The submitted identifier. A non-blank `roll_number` wins over
    /// `student_id` when both are present.
    pub fn identifier(&self) -> Option<&str> {
        self.roll_number
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .or(self.student_id.as_deref())
    }
}

/// A student field set that passed every input rule.
///
/// Fields that do not belong to `variant` are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidStudent {
    pub variant: SchemaVariant,
    pub roll_number: String,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub marks: Option<Decimal>,
    pub gpa: Option<Decimal>,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub year_level: Option<YearLevel>,
    pub major: Option<String>,
    pub enrollment_date: Option<Date>,
    pub is_active: bool,
}

/// Validate a student form for the given schema variant.
pub fn validate_student(
    form: &StudentForm,
    variant: SchemaVariant,
) -> Result<ValidStudent, ValidationError> {
    match variant {
        SchemaVariant::Simple => validate_simple(form),
        SchemaVariant::Rich => validate_rich(form),
    }
}

fn validate_simple(form: &StudentForm) -> Result<ValidStudent, ValidationError> {
    let name = require_text("name", form.name.as_deref())?;
    let roll_number = require_text("roll_number", form.identifier())?;
    let email = require_text("email", form.email.as_deref())?;
    let raw_marks = require_numeric("marks", form.marks.as_ref())?;

    let marks = checked_performance(SchemaVariant::Simple, raw_marks)?;
    check_email(email)?;

    Ok(ValidStudent {
        variant: SchemaVariant::Simple,
        roll_number: roll_number.to_string(),
        name: name.to_string(),
        first_name: None,
        last_name: None,
        email: email.to_string(),
        marks: Some(marks),
        gpa: None,
        phone: None,
        date_of_birth: None,
        gender: None,
        address: None,
        year_level: None,
        major: None,
        enrollment_date: None,
        is_active: true,
    })
}

fn validate_rich(form: &StudentForm) -> Result<ValidStudent, ValidationError> {
    let roll_number = require_text("roll_number", form.identifier())?;
    let first_name = require_text("first_name", form.first_name.as_deref())?;
    let last_name = require_text("last_name", form.last_name.as_deref())?;
    let email = require_text("email", form.email.as_deref())?;
    let raw_gpa = require_numeric("gpa", form.gpa.as_ref())?;

    let gpa = checked_performance(SchemaVariant::Rich, raw_gpa)?;
    check_email(email)?;

    let phone = optional_text(form.phone.as_deref());
    if let Some(phone) = &phone {
        check_max_len("phone", phone, PHONE_MAX_LEN)?;
    }
    let date_of_birth = parse_optional_date("date_of_birth", form.date_of_birth.as_deref())?;
    let gender = parse_choice("gender", form.gender.as_deref(), Gender::from_code)?;
    let year_level = parse_choice("year_level", form.year_level.as_deref(), YearLevel::from_code)?;
    let enrollment_date =
        parse_optional_date("enrollment_date", form.enrollment_date.as_deref())?;

    Ok(ValidStudent {
        variant: SchemaVariant::Rich,
        roll_number: roll_number.to_string(),
        name: full_name(first_name, last_name),
        first_name: Some(first_name.to_string()),
        last_name: Some(last_name.to_string()),
        email: email.to_string(),
        marks: None,
        gpa: Some(gpa),
        phone,
        date_of_birth,
        gender,
        address: optional_text(form.address.as_deref()),
        year_level,
        major: optional_text(form.major.as_deref()),
        enrollment_date,
        is_active: form.is_active.unwrap_or(true),
    })
}

fn checked_performance(
    variant: SchemaVariant,
    raw: &NumericInput,
) -> Result<Decimal, ValidationError> {
    let (min, max) = variant.performance_range();
    parse_bounded_decimal(variant.performance_field(), raw, min, max)
}

/// Display name for the rich variant.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}

/// Turn store lookups into the uniqueness verdict.
///
/// The identifier is checked before the email, so a form colliding on both
/// reports [`ValidationError::DuplicateIdentifier`].
pub fn check_uniqueness(roll_number_taken: bool, email_taken: bool) -> Result<(), ValidationError> {
    if roll_number_taken {
        return Err(ValidationError::DuplicateIdentifier);
    }
    if email_taken {
        return Err(ValidationError::DuplicateEmail);
    }
    Ok(())
}
