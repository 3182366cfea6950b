//! Resilient request executor: timeout plus bounded retry around every
//! outbound call.
//!
//! This is the only layer allowed to retry. It classifies non-2xx responses
//! into [`ApiError`] and retries only transient failures (timeout, network,
//! generic 5xx); client errors are final on the first attempt. Every attempt
//! and outcome is reported through `tracing` with a per-call correlation id —
//! the embedding application chooses the subscriber, nothing here writes to a
//! console.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::{sleep, timeout};
use uuid::Uuid;

use super::error::{ApiError, DUPLICATE_ENROLLMENT_MESSAGE};

/// Retry behavior shared by every service client.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first.
    pub max_attempts: u32,
    /// Base delay in milliseconds for exponential backoff between attempts.
    pub base_delay_ms: u64,
    /// Per-attempt budget; an attempt exceeding it is cancelled and counted
    /// as a failed attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            attempt_timeout: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after the given attempt number.
    /// delay = base_delay_ms * 2^(attempt - 1)
    pub fn delay_for_attempt(&self, attempt: u32) -> u64 {
        self.base_delay_ms * 2u64.pow(attempt.saturating_sub(1))
    }
}

/// HTTP transport for one backend service.
///
/// Purely a transport concern: no business interpretation beyond status-code
/// classification. Service clients own one executor each and express their
/// endpoints on top of it.
pub struct RequestExecutor {
    client: Client,
    base_url: String,
    policy: RetryPolicy,
}

impl RequestExecutor {
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET returning a deserialized body, or `None` on 204.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        self.execute(Method::GET, path, None).await
    }

    /// Send a JSON body and deserialize the echoed record.
    pub async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Unexpected {
            status: 0,
            message: format!("failed to encode request body: {e}"),
        })?;
        self.execute(method, path, Some(body)).await
    }

    /// Bodyless mutation (status transitions, restores, deletes).
    pub async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        self.execute(method, path, None).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4();
        let attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let mut request = self
                .client
                .request(method.clone(), &url)
                .header(reqwest::header::ACCEPT, "application/json");
            if let Some(body) = &body {
                request = request.json(body);
            }

            let err = match timeout(self.policy.attempt_timeout, request.send()).await {
                Err(_elapsed) => ApiError::Timeout {
                    timeout_ms: self.policy.attempt_timeout.as_millis() as u64,
                },
                Ok(Err(e)) => ApiError::Transport(e),
                Ok(Ok(response)) => {
                    let status = response.status();
                    if status == StatusCode::NO_CONTENT {
                        tracing::debug!(%request_id, %method, path, attempt, "empty success");
                        return Ok(None);
                    }
                    if status.is_success() {
                        tracing::debug!(
                            %request_id, %method, path, attempt,
                            status = status.as_u16(),
                            "request succeeded"
                        );
                        return response.json::<T>().await.map(Some).map_err(ApiError::from);
                    }
                    classify(status, path, response).await
                }
            };

            if attempt < attempts && err.is_retryable() {
                let delay_ms = self.policy.delay_for_attempt(attempt);
                tracing::warn!(
                    %request_id, %method, path, attempt,
                    max_attempts = attempts,
                    delay_ms,
                    error = %err,
                    "attempt failed, retrying"
                );
                sleep(Duration::from_millis(delay_ms)).await;
                continue;
            }

            tracing::warn!(%request_id, %method, path, attempt, error = %err, "request failed");
            return Err(err);
        }
    }
}

/// Classify a non-2xx response by status, consuming the body where the
/// taxonomy needs it.
async fn classify(status: StatusCode, path: &str, response: Response) -> ApiError {
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound {
            path: path.to_string(),
        },
        StatusCode::BAD_REQUEST => {
            let body = response.text().await.unwrap_or_default();
            ApiError::Validation {
                field_errors: parse_field_errors(&body),
            }
        }
        s if s.is_server_error() => {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            if ApiError::is_unique_constraint(&message) {
                ApiError::Conflict {
                    message: DUPLICATE_ENROLLMENT_MESSAGE.to_string(),
                }
            } else {
                ApiError::Server {
                    status: s.as_u16(),
                    message,
                }
            }
        }
        s => {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            ApiError::Unexpected {
                status: s.as_u16(),
                message,
            }
        }
    }
}

/// A 400 body may carry a field-error map, either bare or under `errors`.
fn parse_field_errors(body: &str) -> BTreeMap<String, String> {
    if let Ok(map) = serde_json::from_str::<BTreeMap<String, String>>(body) {
        return map;
    }
    #[derive(serde::Deserialize)]
    struct Wrapper {
        errors: BTreeMap<String, String>,
    }
    serde_json::from_str::<Wrapper>(body)
        .map(|w| w.errors)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay_ms, 1000);
        assert_eq!(policy.attempt_timeout, Duration::from_secs(10));
    }

    #[test]
    fn exponential_backoff() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay_ms: 1000,
            attempt_timeout: Duration::from_secs(10),
        };
        assert_eq!(policy.delay_for_attempt(1), 1000);
        assert_eq!(policy.delay_for_attempt(2), 2000);
        assert_eq!(policy.delay_for_attempt(3), 4000);
        assert_eq!(policy.delay_for_attempt(4), 8000);
    }

    #[test]
    fn field_errors_bare_map() {
        let parsed = parse_field_errors(r#"{"studentId":"required","shift":"required"}"#);
        assert_eq!(parsed.get("studentId").unwrap(), "required");
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn field_errors_wrapped_map() {
        let parsed = parse_field_errors(r#"{"errors":{"academicYear":"must not be blank"}}"#);
        assert_eq!(parsed.get("academicYear").unwrap(), "must not be blank");
    }

    #[test]
    fn field_errors_garbage_body_is_empty() {
        assert!(parse_field_errors("<html>Bad Request</html>").is_empty());
    }
}
