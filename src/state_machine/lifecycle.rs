//! Drives enrollment status transitions against the enrollment service.
//!
//! Each named operation issues one idempotent-intent `PUT
//! /enrollments/{id}/status` call. No local optimistic mutation happens here:
//! the record echoed by the server, run through the boundary normalizer, is
//! the new source of truth. A 404 means the remote record vanished; the
//! caller must prune its stale local copy instead of retrying forever.

use crate::api::{ApiError, EnrollmentApi};
use crate::model::Enrollment;

use super::transition::LifecycleAction;

/// Result of applying a lifecycle action.
#[derive(Debug)]
pub enum TransitionOutcome {
    /// The server applied the transition; this record replaces local state.
    Applied(Enrollment),
    /// The record no longer exists upstream; drop the stale local copy.
    Pruned,
}

impl TransitionOutcome {
    pub fn applied(self) -> Option<Enrollment> {
        match self {
            TransitionOutcome::Applied(e) => Some(e),
            TransitionOutcome::Pruned => None,
        }
    }
}

pub struct EnrollmentLifecycle {
    api: EnrollmentApi,
}

impl EnrollmentLifecycle {
    pub fn new(api: EnrollmentApi) -> Self {
        Self { api }
    }

    /// PENDING → ACTIVE.
    pub async fn activate(&self, id: &str) -> Result<TransitionOutcome, ApiError> {
        self.apply(id, LifecycleAction::Activate).await
    }

    /// {PENDING, ACTIVE} → CANCELLED.
    pub async fn cancel(&self, id: &str) -> Result<TransitionOutcome, ApiError> {
        self.apply(id, LifecycleAction::Cancel).await
    }

    /// CANCELLED → PENDING.
    pub async fn restore(&self, id: &str) -> Result<TransitionOutcome, ApiError> {
        self.apply(id, LifecycleAction::Restore).await
    }

    /// any → INACTIVE. Not reachable from any modeled UI flow.
    pub async fn deactivate(&self, id: &str) -> Result<TransitionOutcome, ApiError> {
        self.apply(id, LifecycleAction::Deactivate).await
    }

    /// Apply an action without re-checking the source state; the server is
    /// authoritative and rejects transitions from a wrong state.
    pub async fn apply(
        &self,
        id: &str,
        action: LifecycleAction,
    ) -> Result<TransitionOutcome, ApiError> {
        match self.api.set_status(id, action.target()).await {
            Ok(enrollment) => {
                tracing::info!(enrollment_id = id, %action, status = %action.target(), "transition applied");
                Ok(TransitionOutcome::Applied(enrollment))
            }
            Err(ApiError::NotFound { .. }) => {
                tracing::warn!(enrollment_id = id, %action, "record vanished upstream, pruning");
                Ok(TransitionOutcome::Pruned)
            }
            Err(e) => Err(e),
        }
    }
}
