//! Academic-period time-window rules.
//!
//! Pure date-window logic evaluated against an injected `now` so callers and
//! tests control the clock. Nothing here performs I/O or fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AcademicPeriod, PeriodStatus};

/// Where `now` falls relative to a period's matriculation window.
///
/// A four-way state rather than a boolean "open": the UI and the validation
/// gate give different guidance for "not yet open", "closed" and the late
/// grace window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentWindow {
    NotStarted,
    Open,
    Late,
    Closed,
}

impl std::fmt::Display for EnrollmentWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentWindow::NotStarted => write!(f, "NOT_STARTED"),
            EnrollmentWindow::Open => write!(f, "OPEN"),
            EnrollmentWindow::Late => write!(f, "LATE"),
            EnrollmentWindow::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Whether the period is currently in its instructional window.
pub fn is_period_active(period: &AcademicPeriod, now: DateTime<Utc>) -> bool {
    period.status == PeriodStatus::Active && period.start_date <= now && now <= period.end_date
}

/// Where `now` falls in the matriculation window.
///
/// The late branch only applies when `allow_late_enrollment` is set and a
/// late end date is present; a period without the flag can never be `Late`.
pub fn enrollment_window(period: &AcademicPeriod, now: DateTime<Utc>) -> EnrollmentWindow {
    if now < period.enrollment_period_start {
        return EnrollmentWindow::NotStarted;
    }
    if now <= period.enrollment_period_end {
        return EnrollmentWindow::Open;
    }
    if period.allow_late_enrollment
        && let Some(late_end) = period.late_enrollment_end_date
        && now <= late_end
    {
        return EnrollmentWindow::Late;
    }
    EnrollmentWindow::Closed
}
