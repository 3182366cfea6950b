pub mod academic_periods;
pub mod enrollments;
pub mod error;
pub mod executor;
pub mod integration;
pub mod wire;

pub use academic_periods::AcademicPeriodApi;
pub use enrollments::EnrollmentApi;
pub use error::{ApiError, DUPLICATE_ENROLLMENT_MESSAGE};
pub use executor::{RequestExecutor, RetryPolicy};
pub use integration::{InstitutionApi, StudentApi};

/// Single-record endpoints must return a body; a 204 from one of them is a
/// contract violation, not an empty success.
pub(crate) fn require_body<T>(body: Option<T>, path: &str) -> Result<T, ApiError> {
    body.ok_or_else(|| ApiError::Unexpected {
        status: 204,
        message: format!("expected a record body from {path}"),
    })
}
