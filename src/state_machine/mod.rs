mod lifecycle;
mod transition;

pub use lifecycle::{EnrollmentLifecycle, TransitionOutcome};
pub use transition::LifecycleAction;
