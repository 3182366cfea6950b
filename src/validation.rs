//! Pre-submission validation gate.
//!
//! Runs required-field and cross-field checks locally, then the
//! duplicate-enrollment probe, before any create request leaves the client.
//! The probe is best-effort: the authoritative uniqueness constraint lives
//! server-side, so a probe that cannot reach the network logs and falls
//! through to the create attempt instead of blocking submission.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::api::{
    AcademicPeriodApi, ApiError, DUPLICATE_ENROLLMENT_MESSAGE, EnrollmentApi,
};
use crate::model::{AcademicPeriod, AgeGroupField, Enrollment, EnrollmentStatus};

/// Field name → user-facing message, ordered deterministically.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum GateError {
    /// Local validation failed; nothing was sent.
    #[error("validation failed on {} field(s)", .0.len())]
    Invalid(FieldErrors),

    /// The duplicate probe found a non-cancelled enrollment for the same
    /// student, period and year.
    #[error("{DUPLICATE_ENROLLMENT_MESSAGE}")]
    Duplicate {
        academic_period_id: String,
        academic_year: String,
    },

    /// The submission itself failed; the server remains authoritative.
    #[error(transparent)]
    Api(#[from] ApiError),
}

fn require(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), "required".to_string());
    }
}

/// Required-field checks for an enrollment draft. Pure, never fails.
pub fn validate_enrollment_draft(draft: &Enrollment) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "studentId", &draft.student_id);
    require(&mut errors, "institutionId", &draft.institution_id);
    require(&mut errors, "classroomId", &draft.classroom_id);
    require(&mut errors, "academicYear", &draft.academic_year);
    require(&mut errors, "academicPeriodId", &draft.academic_period_id);
    require(&mut errors, "shift", &draft.shift);
    require(&mut errors, "modality", &draft.modality);
    match &draft.age_group {
        AgeGroupField::Known(_) => {}
        AgeGroupField::Unknown(raw) if raw.trim().is_empty() => {
            errors.insert("ageGroup".to_string(), "required".to_string());
        }
        AgeGroupField::Unknown(raw) => {
            errors.insert(
                "ageGroup".to_string(),
                format!("unrecognized age group: {raw}"),
            );
        }
    }
    errors
}

/// Required-field and date-ordering checks for an academic-period draft.
pub fn validate_period_draft(draft: &AcademicPeriod) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "institutionId", &draft.institution_id);
    require(&mut errors, "academicYear", &draft.academic_year);
    require(&mut errors, "periodName", &draft.period_name);

    if draft.start_date >= draft.end_date {
        errors.insert(
            "endDate".to_string(),
            "must fall after the start date".to_string(),
        );
    }
    if draft.enrollment_period_start >= draft.enrollment_period_end {
        errors.insert(
            "enrollmentPeriodEnd".to_string(),
            "must fall after the enrollment period start".to_string(),
        );
    }
    if draft.allow_late_enrollment {
        match draft.late_enrollment_end_date {
            None => {
                errors.insert(
                    "lateEnrollmentEndDate".to_string(),
                    "required when late enrollment is allowed".to_string(),
                );
            }
            Some(late_end) if late_end <= draft.enrollment_period_end => {
                errors.insert(
                    "lateEnrollmentEndDate".to_string(),
                    "must fall after the enrollment period end".to_string(),
                );
            }
            Some(_) => {}
        }
    }
    errors
}

/// Gates create/update submissions behind local validation and the
/// duplicate-enrollment probe.
pub struct ValidationGate {
    enrollments: EnrollmentApi,
    periods: AcademicPeriodApi,
}

impl ValidationGate {
    pub fn new(enrollments: EnrollmentApi, periods: AcademicPeriodApi) -> Self {
        Self {
            enrollments,
            periods,
        }
    }

    /// Validate, probe for duplicates, then POST.
    ///
    /// A positive duplicate result always rejects, without issuing the
    /// create. A probe that errors for any other reason is logged and
    /// skipped — the server constraint is the final arbiter.
    pub async fn create_enrollment(&self, draft: &Enrollment) -> Result<Enrollment, GateError> {
        let errors = validate_enrollment_draft(draft);
        if !errors.is_empty() {
            return Err(GateError::Invalid(errors));
        }
        self.check_duplicate(draft).await?;
        Ok(self.enrollments.create(draft).await?)
    }

    /// Validate then PUT. Updates are not probed: the uniqueness triple is
    /// already held by the record being updated.
    pub async fn update_enrollment(
        &self,
        id: &str,
        enrollment: &Enrollment,
    ) -> Result<Enrollment, GateError> {
        let errors = validate_enrollment_draft(enrollment);
        if !errors.is_empty() {
            return Err(GateError::Invalid(errors));
        }
        Ok(self.enrollments.update(id, enrollment).await?)
    }

    /// Validate then POST an academic period.
    pub async fn create_period(&self, draft: &AcademicPeriod) -> Result<AcademicPeriod, GateError> {
        let errors = validate_period_draft(draft);
        if !errors.is_empty() {
            return Err(GateError::Invalid(errors));
        }
        Ok(self.periods.create(draft).await?)
    }

    /// Validate then PUT an academic period.
    pub async fn update_period(
        &self,
        id: &str,
        period: &AcademicPeriod,
    ) -> Result<AcademicPeriod, GateError> {
        let errors = validate_period_draft(period);
        if !errors.is_empty() {
            return Err(GateError::Invalid(errors));
        }
        Ok(self.periods.update(id, period).await?)
    }

    /// Best-effort duplicate probe over the student's existing enrollments.
    async fn check_duplicate(&self, draft: &Enrollment) -> Result<(), GateError> {
        let existing = match self.enrollments.list_by_student(&draft.student_id).await {
            Ok(enrollments) => enrollments,
            Err(e) => {
                tracing::warn!(
                    student_id = %draft.student_id,
                    error = %e,
                    "duplicate probe failed, deferring to the server constraint"
                );
                return Ok(());
            }
        };

        let duplicate = existing.iter().any(|e| {
            e.status != EnrollmentStatus::Cancelled
                && !e.deleted
                && e.academic_period_id == draft.academic_period_id
                && e.academic_year == draft.academic_year
        });

        if duplicate {
            Err(GateError::Duplicate {
                academic_period_id: draft.academic_period_id.clone(),
                academic_year: draft.academic_year.clone(),
            })
        } else {
            Ok(())
        }
    }
}
