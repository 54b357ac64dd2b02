//! Course form validation.

use serde::{Deserialize, Serialize};

use crate::validation::{
    optional_text, parse_positive_int, require_numeric, require_text, NumericInput,
    ValidationError,
};

/// Credits assigned when the form leaves them out.
pub const DEFAULT_CREDITS: i32 = 3;

/// Raw course input as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseForm {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<NumericInput>,
    pub instructor: Option<String>,
    pub semester: Option<String>,
    pub year: Option<NumericInput>,
}

/// A course field set that passed every input rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCourse {
    pub code: String,
    pub name: String,
    pub description: String,
    pub credits: i32,
    pub instructor: String,
    pub semester: String,
    pub year: i32,
}

/// Validate a course form. Presence is checked for every required field
/// before any numeric rule runs.
pub fn validate_course(form: &CourseForm) -> Result<ValidCourse, ValidationError> {
    let code = require_text("code", form.code.as_deref())?;
    let name = require_text("name", form.name.as_deref())?;
    let instructor = require_text("instructor", form.instructor.as_deref())?;
    let semester = require_text("semester", form.semester.as_deref())?;
    let raw_year = require_numeric("year", form.year.as_ref())?;

    let credits = match form.credits.as_ref().filter(|c| !c.is_blank()) {
        Some(raw) => parse_positive_int("credits", raw)?,
        None => DEFAULT_CREDITS,
    };
    let year = parse_positive_int("year", raw_year)?;

    Ok(ValidCourse {
        code: code.to_string(),
        name: name.to_string(),
        description: optional_text(form.description.as_deref()).unwrap_or_default(),
        credits,
        instructor: instructor.to_string(),
        semester: semester.to_string(),
        year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn cs101() -> CourseForm {
        CourseForm {
            code: Some("CS101".into()),
            name: Some("Intro to Computing".into()),
            description: None,
            credits: None,
            instructor: Some("Dr. Knuth".into()),
            semester: Some("Fall".into()),
            year: Some(NumericInput::from(2026)),
        }
    }

    #[test]
    fn credits_default_to_three() {
        let course = validate_course(&cs101()).unwrap();
        assert_eq!(course.credits, DEFAULT_CREDITS);
        assert_eq!(course.description, "");
        assert_eq!(course.year, 2026);
    }

    #[test]
    fn credits_must_be_positive() {
        let mut form = cs101();
        form.credits = Some(NumericInput::from(0));
        assert_matches!(
            validate_course(&form),
            Err(ValidationError::OutOfRange { field: "credits", .. })
        );
        form.credits = Some(NumericInput::from("four"));
        assert_matches!(
            validate_course(&form),
            Err(ValidationError::InvalidNumericValue { field: "credits" })
        );
    }

    #[test]
    fn required_fields() {
        let mut form = cs101();
        form.instructor = Some(" ".into());
        assert_matches!(
            validate_course(&form),
            Err(ValidationError::MissingField { field: "instructor" })
        );
        let mut form = cs101();
        form.year = None;
        assert_matches!(
            validate_course(&form),
            Err(ValidationError::MissingField { field: "year" })
        );
    }
}
