//! Clients for the student and institution integration services.
//!
//! These services emit clean, typed payloads, so records deserialize straight
//! into the read-only model views; nothing here is mutated, only fetched.

use super::error::ApiError;
use super::executor::{RequestExecutor, RetryPolicy};
use super::require_body;
use crate::model::{Classroom, InstitutionDetail, StudentData};

/// Client for the student service.
pub struct StudentApi {
    exec: RequestExecutor,
}

impl StudentApi {
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            exec: RequestExecutor::new(base_url, policy),
        }
    }

    /// `GET /integration/students/{id}`
    pub async fn get(&self, id: &str) -> Result<StudentData, ApiError> {
        let path = format!("/integration/students/{id}");
        let body = self.exec.get(&path).await?;
        require_body(body, &path)
    }

    /// `GET /integration/students/cui/{cui}` — lookup by the national
    /// identity number.
    pub async fn get_by_cui(&self, cui: &str) -> Result<StudentData, ApiError> {
        let path = format!("/integration/students/cui/{cui}");
        let body = self.exec.get(&path).await?;
        require_body(body, &path)
    }
}

/// Client for the institution service, which also owns classrooms.
pub struct InstitutionApi {
    exec: RequestExecutor,
}

impl InstitutionApi {
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            exec: RequestExecutor::new(base_url, policy),
        }
    }

    /// `GET /integration/institutions/{id}`
    pub async fn get(&self, id: &str) -> Result<InstitutionDetail, ApiError> {
        let path = format!("/integration/institutions/{id}");
        let body = self.exec.get(&path).await?;
        require_body(body, &path)
    }

    /// `GET /integration/classrooms/{id}`
    pub async fn get_classroom(&self, id: &str) -> Result<Classroom, ApiError> {
        let path = format!("/integration/classrooms/{id}");
        let body = self.exec.get(&path).await?;
        require_body(body, &path)
    }
}
