//! Raw wire-format structs for the legacy enrollment endpoints.
//!
//! The enrollment service predates the canonical schema: boolean flags arrive
//! as `1`/`"true"`/`true`, the age group as free text or enum code, and
//! `studentAge` cannot be trusted. Each struct here mirrors one endpoint's
//! actual payload shape and converts itself into the canonical model through
//! the field normalizer, immediately after deserialization. Internal
//! consumers only ever see the canonical types from [`crate::model`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::documents::DocumentChecklist;
use crate::model::{
    AcademicPeriod, Enrollment, EnrollmentStatus, EnrollmentType, PeriodStatus,
};
use crate::normalize::{derive_student_age, normalize_age_group_value, normalize_boolean};

/// An enrollment record as the enrollment service actually sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentWire {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub institution_id: String,
    #[serde(default)]
    pub classroom_id: String,
    #[serde(default)]
    pub academic_year: String,
    #[serde(default)]
    pub academic_period_id: String,
    #[serde(default)]
    pub enrollment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "type")]
    pub enrollment_type: Option<String>,
    #[serde(default)]
    pub age_group: Value,
    /// Present on the wire but discarded; the age is always recomputed.
    #[serde(default)]
    pub student_age: Value,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub modality: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub birth_certificate: Value,
    #[serde(default)]
    pub student_id_document: Value,
    #[serde(default)]
    pub guardian_id_document: Value,
    #[serde(default)]
    pub vaccination_record: Value,
    #[serde(default)]
    pub disability_certificate: Value,
    #[serde(default)]
    pub utility_bill: Value,
    #[serde(default)]
    pub psychological_report: Value,
    #[serde(default)]
    pub student_photo: Value,
    #[serde(default)]
    pub health_record: Value,
    #[serde(default)]
    pub signed_enrollment_form: Value,
    #[serde(default)]
    pub id_verification: Value,
    #[serde(default)]
    pub deleted: Value,
}

impl EnrollmentWire {
    /// Convert to the canonical model. Total: unrecognized statuses fall back
    /// to `Pending` with a warning, unknown age groups pass through as-is,
    /// and `student_age` is derived from the normalized group.
    pub fn normalize(self) -> Enrollment {
        let status = parse_status(self.status.as_deref(), self.id.as_deref());
        let enrollment_type = match self.enrollment_type.as_deref() {
            Some("REENROLLMENT") => EnrollmentType::Reenrollment,
            _ => EnrollmentType::New,
        };
        let age_group = normalize_age_group_value(&self.age_group);
        let student_age = derive_student_age(&age_group);

        Enrollment {
            id: self.id,
            student_id: self.student_id,
            institution_id: self.institution_id,
            classroom_id: self.classroom_id,
            academic_year: self.academic_year,
            academic_period_id: self.academic_period_id,
            enrollment_date: self.enrollment_date,
            status,
            enrollment_type,
            age_group,
            student_age,
            shift: self.shift,
            modality: self.modality,
            section: self.section,
            documents: DocumentChecklist {
                birth_certificate: normalize_boolean(&self.birth_certificate),
                student_id_document: normalize_boolean(&self.student_id_document),
                guardian_id_document: normalize_boolean(&self.guardian_id_document),
                vaccination_record: normalize_boolean(&self.vaccination_record),
                disability_certificate: normalize_boolean(&self.disability_certificate),
                utility_bill: normalize_boolean(&self.utility_bill),
                psychological_report: normalize_boolean(&self.psychological_report),
                student_photo: normalize_boolean(&self.student_photo),
                health_record: normalize_boolean(&self.health_record),
                signed_enrollment_form: normalize_boolean(&self.signed_enrollment_form),
                id_verification: normalize_boolean(&self.id_verification),
            },
            deleted: normalize_boolean(&self.deleted),
        }
    }
}

fn parse_status(raw: Option<&str>, id: Option<&str>) -> EnrollmentStatus {
    match raw {
        Some("ACTIVE") => EnrollmentStatus::Active,
        Some("INACTIVE") => EnrollmentStatus::Inactive,
        Some("PENDING") => EnrollmentStatus::Pending,
        Some("CANCELLED") => EnrollmentStatus::Cancelled,
        other => {
            tracing::warn!(status = ?other, enrollment_id = ?id, "unrecognized status, assuming PENDING");
            EnrollmentStatus::Pending
        }
    }
}

/// An academic period as the enrollment service sends it. Dates come through
/// typed; only the boolean-ish flags need normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPeriodWire {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub institution_id: String,
    #[serde(default)]
    pub academic_year: String,
    #[serde(default)]
    pub period_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub enrollment_period_start: DateTime<Utc>,
    pub enrollment_period_end: DateTime<Utc>,
    #[serde(default)]
    pub allow_late_enrollment: Value,
    #[serde(default)]
    pub late_enrollment_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub deleted: Value,
}

impl AcademicPeriodWire {
    pub fn normalize(self) -> AcademicPeriod {
        let status = match self.status.as_deref() {
            Some("ACTIVE") => PeriodStatus::Active,
            Some("INACTIVE") => PeriodStatus::Inactive,
            Some("CLOSED") => PeriodStatus::Closed,
            _ => PeriodStatus::Pending,
        };
        AcademicPeriod {
            id: self.id,
            institution_id: self.institution_id,
            academic_year: self.academic_year,
            period_name: self.period_name,
            start_date: self.start_date,
            end_date: self.end_date,
            enrollment_period_start: self.enrollment_period_start,
            enrollment_period_end: self.enrollment_period_end,
            allow_late_enrollment: normalize_boolean(&self.allow_late_enrollment),
            late_enrollment_end_date: self.late_enrollment_end_date,
            status,
            deleted: normalize_boolean(&self.deleted),
        }
    }
}
