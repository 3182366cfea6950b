use serde::{Deserialize, Serialize};

use crate::model::EnrollmentStatus;

/// The named lifecycle operations over an enrollment.
///
/// Each action maps to exactly one remote status-change call. `Deactivate`
/// is defined but not invoked by any modeled UI flow; it stays available for
/// administrative callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleAction {
    Activate,
    Cancel,
    Restore,
    Deactivate,
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleAction::Activate => write!(f, "ACTIVATE"),
            LifecycleAction::Cancel => write!(f, "CANCEL"),
            LifecycleAction::Restore => write!(f, "RESTORE"),
            LifecycleAction::Deactivate => write!(f, "DEACTIVATE"),
        }
    }
}

impl LifecycleAction {
    /// The status the server is asked to set.
    pub fn target(&self) -> EnrollmentStatus {
        match self {
            LifecycleAction::Activate => EnrollmentStatus::Active,
            LifecycleAction::Cancel => EnrollmentStatus::Cancelled,
            LifecycleAction::Restore => EnrollmentStatus::Pending,
            LifecycleAction::Deactivate => EnrollmentStatus::Inactive,
        }
    }

    /// Whether the action is offered from the given status.
    ///
    /// This is the UI-affordance table, not a guard: the lifecycle driver
    /// trusts the transition request and lets the server reject a wrong
    /// source state.
    pub fn allowed_from(&self, from: EnrollmentStatus) -> bool {
        match self {
            LifecycleAction::Activate => from == EnrollmentStatus::Pending,
            LifecycleAction::Cancel => {
                matches!(from, EnrollmentStatus::Pending | EnrollmentStatus::Active)
            }
            LifecycleAction::Restore => from == EnrollmentStatus::Cancelled,
            LifecycleAction::Deactivate => true,
        }
    }

    /// All actions offered from a status, in display order.
    pub fn available_from(from: EnrollmentStatus) -> Vec<LifecycleAction> {
        [
            LifecycleAction::Activate,
            LifecycleAction::Cancel,
            LifecycleAction::Restore,
            LifecycleAction::Deactivate,
        ]
        .into_iter()
        .filter(|a| a.allowed_from(from))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_only_from_pending() {
        assert!(LifecycleAction::Activate.allowed_from(EnrollmentStatus::Pending));
        assert!(!LifecycleAction::Activate.allowed_from(EnrollmentStatus::Active));
        assert!(!LifecycleAction::Activate.allowed_from(EnrollmentStatus::Cancelled));
        assert!(!LifecycleAction::Activate.allowed_from(EnrollmentStatus::Inactive));
    }

    #[test]
    fn cancel_from_pending_and_active() {
        assert!(LifecycleAction::Cancel.allowed_from(EnrollmentStatus::Pending));
        assert!(LifecycleAction::Cancel.allowed_from(EnrollmentStatus::Active));
        assert!(!LifecycleAction::Cancel.allowed_from(EnrollmentStatus::Cancelled));
    }

    #[test]
    fn restore_only_from_cancelled_and_targets_pending() {
        assert!(LifecycleAction::Restore.allowed_from(EnrollmentStatus::Cancelled));
        assert!(!LifecycleAction::Restore.allowed_from(EnrollmentStatus::Active));
        // Restore lands on PENDING, never ACTIVE.
        assert_eq!(LifecycleAction::Restore.target(), EnrollmentStatus::Pending);
    }

    #[test]
    fn deactivate_from_anywhere() {
        for from in [
            EnrollmentStatus::Active,
            EnrollmentStatus::Inactive,
            EnrollmentStatus::Pending,
            EnrollmentStatus::Cancelled,
        ] {
            assert!(LifecycleAction::Deactivate.allowed_from(from));
        }
        assert_eq!(
            LifecycleAction::Deactivate.target(),
            EnrollmentStatus::Inactive
        );
    }

    #[test]
    fn targets_cover_all_statuses() {
        assert_eq!(LifecycleAction::Activate.target(), EnrollmentStatus::Active);
        assert_eq!(LifecycleAction::Cancel.target(), EnrollmentStatus::Cancelled);
    }

    #[test]
    fn affordances_from_pending() {
        let actions = LifecycleAction::available_from(EnrollmentStatus::Pending);
        assert_eq!(
            actions,
            vec![
                LifecycleAction::Activate,
                LifecycleAction::Cancel,
                LifecycleAction::Deactivate
            ]
        );
    }

    #[test]
    fn action_display() {
        assert_eq!(LifecycleAction::Activate.to_string(), "ACTIVATE");
        assert_eq!(LifecycleAction::Deactivate.to_string(), "DEACTIVATE");
    }
}
