//! Typed client for the enrollment service's `/academic-periods` endpoints.

use reqwest::Method;
use serde_json::Value;

use super::error::ApiError;
use super::executor::{RequestExecutor, RetryPolicy};
use super::require_body;
use super::wire::AcademicPeriodWire;
use crate::model::AcademicPeriod;

pub struct AcademicPeriodApi {
    exec: RequestExecutor,
}

impl AcademicPeriodApi {
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            exec: RequestExecutor::new(base_url, policy),
        }
    }

    /// `GET /academic-periods`
    pub async fn list(&self) -> Result<Vec<AcademicPeriod>, ApiError> {
        let wires: Option<Vec<AcademicPeriodWire>> = self.exec.get("/academic-periods").await?;
        Ok(wires
            .unwrap_or_default()
            .into_iter()
            .map(AcademicPeriodWire::normalize)
            .collect())
    }

    /// `GET /academic-periods/{id}`
    pub async fn get(&self, id: &str) -> Result<AcademicPeriod, ApiError> {
        let path = format!("/academic-periods/{id}");
        let wire: Option<AcademicPeriodWire> = self.exec.get(&path).await?;
        Ok(require_body(wire, &path)?.normalize())
    }

    /// `POST /academic-periods`
    pub async fn create(&self, draft: &AcademicPeriod) -> Result<AcademicPeriod, ApiError> {
        let wire: Option<AcademicPeriodWire> = self
            .exec
            .send(Method::POST, "/academic-periods", draft)
            .await?;
        Ok(require_body(wire, "/academic-periods")?.normalize())
    }

    /// `PUT /academic-periods/{id}`
    pub async fn update(
        &self,
        id: &str,
        period: &AcademicPeriod,
    ) -> Result<AcademicPeriod, ApiError> {
        let path = format!("/academic-periods/{id}");
        let wire: Option<AcademicPeriodWire> = self.exec.send(Method::PUT, &path, period).await?;
        Ok(require_body(wire, &path)?.normalize())
    }

    /// `DELETE /academic-periods/{id}` — soft delete on the server.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/academic-periods/{id}");
        let _: Option<Value> = self.exec.send_empty(Method::DELETE, &path).await?;
        Ok(())
    }

    /// `PATCH /academic-periods/{id}/restore`
    pub async fn restore(&self, id: &str) -> Result<AcademicPeriod, ApiError> {
        let path = format!("/academic-periods/{id}/restore");
        let wire: Option<AcademicPeriodWire> = self.exec.send_empty(Method::PATCH, &path).await?;
        Ok(require_body(wire, &path)?.normalize())
    }
}
