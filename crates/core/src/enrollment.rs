//! Enrollment form validation and update merging.
//!
//! The persisted shape of an enrollment's mutable fields is
//! [`EnrollmentState`]. Every write goes through
//! [`EnrollmentState::with_derived_points`] so `grade_points` always agrees
//! with `grade`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::choices::{parse_choice, EnrollmentStatus};
use crate::grading::{derive_grade_points, Grade};
use crate::types::DbId;
use crate::validation::{parse_bounded_decimal, NumericInput, ValidationError};

/// Raw enrollment input. `student_id` and `course_id` are only read on
/// create; an enrollment cannot be moved to another student or course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentForm {
    pub student_id: Option<DbId>,
    pub course_id: Option<DbId>,
    pub status: Option<String>,
    pub grade: Option<String>,
    pub grade_points: Option<NumericInput>,
    pub attendance_percentage: Option<NumericInput>,
}

/// The mutable fields of an enrollment as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentState {
    pub status: EnrollmentStatus,
    pub grade: Option<Grade>,
    pub grade_points: Option<Decimal>,
    pub attendance_percentage: Decimal,
}

impl Default for EnrollmentState {
    fn default() -> Self {
        Self {
            status: EnrollmentStatus::Enrolled,
            grade: None,
            grade_points: None,
            attendance_percentage: Decimal::ZERO,
        }
    }
}

impl EnrollmentState {
    /// Apply the grade-point derivation rule.
    pub fn with_derived_points(mut self) -> Self {
        self.grade_points = derive_grade_points(self.grade, self.grade_points);
        self
    }
}

/// A validated request to enroll a student in a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student_id: DbId,
    pub course_id: DbId,
    pub state: EnrollmentState,
}

/// A validated partial update. `None` leaves the stored value as is.
///
/// `grade` distinguishes "not submitted" (`None`) from "cleared"
/// (`Some(None)`, sent as an empty string).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentChanges {
    pub status: Option<EnrollmentStatus>,
    pub grade: Option<Option<Grade>>,
    pub grade_points: Option<Decimal>,
    pub attendance_percentage: Option<Decimal>,
}

impl EnrollmentChanges {
    /// Merge the changes over `current`. Derivation is left to the caller
    /// so the write path applies it in exactly one place.
    pub fn apply(&self, current: &EnrollmentState) -> EnrollmentState {
        EnrollmentState {
            status: self.status.unwrap_or(current.status),
            grade: self.grade.unwrap_or(current.grade),
            grade_points: self.grade_points.or(current.grade_points),
            attendance_percentage: self
                .attendance_percentage
                .unwrap_or(current.attendance_percentage),
        }
    }
}

/// Validate a create request.
pub fn validate_new_enrollment(form: &EnrollmentForm) -> Result<NewEnrollment, ValidationError> {
    let student_id = form
        .student_id
        .ok_or(ValidationError::MissingField { field: "student_id" })?;
    let course_id = form
        .course_id
        .ok_or(ValidationError::MissingField { field: "course_id" })?;

    let changes = validate_enrollment_changes(form)?;
    let state = changes.apply(&EnrollmentState::default());

    Ok(NewEnrollment {
        student_id,
        course_id,
        state,
    })
}

/// Validate an update request.
pub fn validate_enrollment_changes(
    form: &EnrollmentForm,
) -> Result<EnrollmentChanges, ValidationError> {
    let status = parse_choice("status", form.status.as_deref(), EnrollmentStatus::from_code)?;

    let grade = match form.grade.as_deref() {
        None => None,
        Some(raw) => Some(parse_choice("grade", Some(raw), Grade::from_code)?),
    };

    let grade_points = optional_decimal(
        "grade_points",
        form.grade_points.as_ref(),
        Decimal::ZERO,
        Decimal::new(400, 2),
    )?;
    let attendance_percentage = optional_decimal(
        "attendance_percentage",
        form.attendance_percentage.as_ref(),
        Decimal::ZERO,
        Decimal::ONE_HUNDRED,
    )?;

    Ok(EnrollmentChanges {
        status,
        grade,
        grade_points,
        attendance_percentage,
    })
}

fn optional_decimal(
    field: &'static str,
    raw: Option<&NumericInput>,
    min: Decimal,
    max: Decimal,
) -> Result<Option<Decimal>, ValidationError> {
    let Some(raw) = raw.filter(|r| !r.is_blank()) else {
        return Ok(None);
    };
    parse_bounded_decimal(field, raw, min, max).map(Some)
}
