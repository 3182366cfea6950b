//! Client-side orchestration core for school-enrollment administration.
//!
//! This crate is a stateless orchestrator over three remote services
//! (enrollment, student, institution): it drives the enrollment lifecycle
//! state machine, normalizes the services' disagreeing field encodings at the
//! boundary, validates academic-period time-window rules, and assembles
//! composite detail views with a settle-all join that tolerates the failure
//! of any individual service. It renders nothing and persists nothing.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod documents;
pub mod model;
pub mod normalize;
pub mod periods;
pub mod state_machine;
pub mod validation;

pub use aggregate::{DetailAggregator, EnrollmentDetail, Slot, SlotError, settle_all};
pub use api::{
    AcademicPeriodApi, ApiError, DUPLICATE_ENROLLMENT_MESSAGE, EnrollmentApi, InstitutionApi,
    RetryPolicy, StudentApi,
};
pub use config::MatriculaConfig;
pub use documents::{DocumentChecklist, DocumentProgress};
pub use model::{
    AcademicPeriod, AgeGroup, AgeGroupField, Classroom, Enrollment, EnrollmentStatus,
    EnrollmentType, InstitutionDetail, PeriodStatus, StudentData,
};
pub use periods::{EnrollmentWindow, enrollment_window, is_period_active};
pub use state_machine::{EnrollmentLifecycle, LifecycleAction, TransitionOutcome};
pub use validation::{
    FieldErrors, GateError, ValidationGate, validate_enrollment_draft, validate_period_draft,
};
