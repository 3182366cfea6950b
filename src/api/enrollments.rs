//! Typed client for the enrollment service's `/enrollments` endpoints.
//!
//! Every inbound record passes through [`EnrollmentWire::normalize`] before
//! it is returned, so callers only ever see canonical [`Enrollment`] values.
//! List endpoints return bare arrays; mutations return the updated record.

use reqwest::Method;

use super::error::ApiError;
use super::executor::{RequestExecutor, RetryPolicy};
use super::require_body;
use super::wire::EnrollmentWire;
use crate::model::{Enrollment, EnrollmentStatus};

pub struct EnrollmentApi {
    exec: RequestExecutor,
}

impl EnrollmentApi {
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            exec: RequestExecutor::new(base_url, policy),
        }
    }

    /// `GET /enrollments`
    pub async fn list(&self) -> Result<Vec<Enrollment>, ApiError> {
        self.list_path("/enrollments").await
    }

    /// `GET /enrollments/active`
    pub async fn list_active(&self) -> Result<Vec<Enrollment>, ApiError> {
        self.list_path("/enrollments/active").await
    }

    /// `GET /enrollments/pending`
    pub async fn list_pending(&self) -> Result<Vec<Enrollment>, ApiError> {
        self.list_path("/enrollments/pending").await
    }

    /// `GET /enrollments/cancelled`
    pub async fn list_cancelled(&self) -> Result<Vec<Enrollment>, ApiError> {
        self.list_path("/enrollments/cancelled").await
    }

    /// `GET /enrollments/student/{id}` — every enrollment for one student.
    pub async fn list_by_student(&self, student_id: &str) -> Result<Vec<Enrollment>, ApiError> {
        self.list_path(&format!("/enrollments/student/{student_id}"))
            .await
    }

    /// `GET /enrollments/{id}`
    pub async fn get(&self, id: &str) -> Result<Enrollment, ApiError> {
        let path = format!("/enrollments/{id}");
        let wire: Option<EnrollmentWire> = self.exec.get(&path).await?;
        Ok(require_body(wire, &path)?.normalize())
    }

    /// `POST /enrollments` — the server assigns `id` and `enrollmentDate`.
    pub async fn create(&self, draft: &Enrollment) -> Result<Enrollment, ApiError> {
        let wire: Option<EnrollmentWire> =
            self.exec.send(Method::POST, "/enrollments", draft).await?;
        Ok(require_body(wire, "/enrollments")?.normalize())
    }

    /// `PUT /enrollments/{id}`
    pub async fn update(&self, id: &str, enrollment: &Enrollment) -> Result<Enrollment, ApiError> {
        let path = format!("/enrollments/{id}");
        let wire: Option<EnrollmentWire> = self.exec.send(Method::PUT, &path, enrollment).await?;
        Ok(require_body(wire, &path)?.normalize())
    }

    /// `PUT /enrollments/{id}/status?status=…` — idempotent-intent status
    /// change. The echoed record is the new source of truth.
    pub async fn set_status(
        &self,
        id: &str,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, ApiError> {
        let path = format!("/enrollments/{id}/status?status={status}");
        let wire: Option<EnrollmentWire> = self.exec.send_empty(Method::PUT, &path).await?;
        Ok(require_body(wire, &path)?.normalize())
    }

    async fn list_path(&self, path: &str) -> Result<Vec<Enrollment>, ApiError> {
        let wires: Option<Vec<EnrollmentWire>> = self.exec.get(path).await?;
        Ok(wires
            .unwrap_or_default()
            .into_iter()
            .map(EnrollmentWire::normalize)
            .collect())
    }
}
