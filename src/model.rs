use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::documents::DocumentChecklist;

/// Lifecycle status of an enrollment record.
///
/// `Inactive` is reachable through
/// [`Deactivate`](crate::state_machine::LifecycleAction::Deactivate) but no
/// modeled UI flow invokes it; it is kept for administrative callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Active,
    Inactive,
    Pending,
    Cancelled,
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Active => write!(f, "ACTIVE"),
            EnrollmentStatus::Inactive => write!(f, "INACTIVE"),
            EnrollmentStatus::Pending => write!(f, "PENDING"),
            EnrollmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Whether the enrollment is a first registration or a returning student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentType {
    New,
    Reenrollment,
}

/// Canonical preschool age groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "AGE_3")]
    Age3,
    #[serde(rename = "AGE_4")]
    Age4,
    #[serde(rename = "AGE_5")]
    Age5,
}

impl AgeGroup {
    /// The age implied by the group. This mapping is the source of truth;
    /// `studentAge` from any collaborator is discarded and recomputed.
    pub fn age(&self) -> u8 {
        match self {
            AgeGroup::Age3 => 3,
            AgeGroup::Age4 => 4,
            AgeGroup::Age5 => 5,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AgeGroup::Age3 => "AGE_3",
            AgeGroup::Age4 => "AGE_4",
            AgeGroup::Age5 => "AGE_5",
        }
    }
}

/// An age-group field as seen by consumers after boundary normalization.
///
/// Upstream services emit both enum codes and localized free text. Inputs the
/// normalizer does not recognize pass through as `Unknown` with the original
/// string intact — they are a data-quality signal, never silently coerced to
/// a default group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeGroupField {
    Known(AgeGroup),
    Unknown(String),
}

impl AgeGroupField {
    pub fn as_known(&self) -> Option<AgeGroup> {
        match self {
            AgeGroupField::Known(g) => Some(*g),
            AgeGroupField::Unknown(_) => None,
        }
    }
}

/// A student's enrollment in an institution for one academic period.
///
/// `id` and `enrollment_date` are server-assigned and absent until the record
/// is persisted. `academic_year` is a label such as "2024-2025", never parsed
/// as an integer. `deleted` is a soft-delete marker, distinct from
/// `status == Cancelled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub student_id: String,
    pub institution_id: String,
    pub classroom_id: String,
    pub academic_year: String,
    pub academic_period_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<DateTime<Utc>>,
    pub status: EnrollmentStatus,
    #[serde(rename = "type")]
    pub enrollment_type: EnrollmentType,
    pub age_group: AgeGroupField,
    /// Derived from `age_group`, never trusted verbatim from a collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_age: Option<u8>,
    pub shift: String,
    pub modality: String,
    pub section: String,
    #[serde(flatten)]
    pub documents: DocumentChecklist,
    #[serde(default)]
    pub deleted: bool,
}

impl Enrollment {
    /// Empty draft for a new enrollment form. Replaces the implicit default
    /// state previously embedded in UI form initializers.
    pub fn draft() -> Self {
        Self {
            id: None,
            student_id: String::new(),
            institution_id: String::new(),
            classroom_id: String::new(),
            academic_year: String::new(),
            academic_period_id: String::new(),
            enrollment_date: None,
            status: EnrollmentStatus::Pending,
            enrollment_type: EnrollmentType::New,
            age_group: AgeGroupField::Unknown(String::new()),
            student_age: None,
            shift: String::new(),
            modality: String::new(),
            section: String::new(),
            documents: DocumentChecklist::default(),
            deleted: false,
        }
    }
}

/// Status of an academic period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodStatus {
    Active,
    Inactive,
    Pending,
    Closed,
}

/// An institution's instructional term plus its matriculation window.
///
/// `start_date..end_date` is the instructional window;
/// `enrollment_period_start..enrollment_period_end` is the matriculation
/// window. No ordering is enforced between the two windows, only
/// start < end within each. `late_enrollment_end_date` is required iff
/// `allow_late_enrollment`, and must fall after `enrollment_period_end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub institution_id: String,
    pub academic_year: String,
    pub period_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub enrollment_period_start: DateTime<Utc>,
    pub enrollment_period_end: DateTime<Utc>,
    pub allow_late_enrollment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_enrollment_end_date: Option<DateTime<Utc>>,
    pub status: PeriodStatus,
    #[serde(default)]
    pub deleted: bool,
}

impl AcademicPeriod {
    /// Empty draft for a new period form. All dates start at `now`; the
    /// draft does not pass the validation gate until they are edited.
    pub fn draft() -> Self {
        let now = Utc::now();
        Self {
            id: None,
            institution_id: String::new(),
            academic_year: String::new(),
            period_name: String::new(),
            start_date: now,
            end_date: now,
            enrollment_period_start: now,
            enrollment_period_end: now,
            allow_late_enrollment: false,
            late_enrollment_end_date: None,
            status: PeriodStatus::Pending,
            deleted: false,
        }
    }
}

/// Read-only student view owned by the student service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentData {
    pub id: String,
    #[serde(default)]
    pub cui: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Read-only institution view owned by the institution service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
}

/// Read-only classroom view owned by the institution service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}
