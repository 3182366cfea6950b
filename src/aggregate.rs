//! Cross-service fan-out with a settle-all join.
//!
//! The composite "enrollment detail" view pulls from three independent
//! services. Each leg's outcome is captured on its own: one unavailable
//! service must never hide the data the other two returned. Consumers render
//! each slot as resolved, not found, or error-loading.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::hash::Hash;

use futures::future::join_all;

use crate::api::{ApiError, InstitutionApi, StudentApi};
use crate::model::{Classroom, Enrollment, InstitutionDetail, StudentData};

/// Why a leg failed, as consumers present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// The referenced record does not exist ("not found").
    NotFound,
    /// The leg errored out ("error loading").
    Load(String),
}

impl std::fmt::Display for SlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotError::NotFound => write!(f, "not found"),
            SlotError::Load(msg) => write!(f, "error loading: {msg}"),
        }
    }
}

/// One leg of an aggregation: present, or absent with its own reason.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Resolved(T),
    Failed(SlotError),
}

impl<T> Slot<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Slot::Resolved(value),
            Err(ApiError::NotFound { .. }) => Slot::Failed(SlotError::NotFound),
            Err(e) => Slot::Failed(SlotError::Load(e.to_string())),
        }
    }

    pub fn as_resolved(&self) -> Option<&T> {
        match self {
            Slot::Resolved(v) => Some(v),
            Slot::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Slot::Failed(_))
    }
}

/// The composite detail view for one enrollment.
#[derive(Debug)]
pub struct EnrollmentDetail {
    pub enrollment: Enrollment,
    pub student: Slot<StudentData>,
    pub institution: Slot<InstitutionDetail>,
    pub classroom: Slot<Classroom>,
}

/// Join-independently-failable combinator: runs one fetch per unique key
/// concurrently and settles every outcome. Deterministic merge — each key
/// maps to exactly one slot regardless of completion order, and duplicate
/// keys cost a single request.
pub async fn settle_all<K, T, F, Fut>(keys: impl IntoIterator<Item = K>, fetch: F) -> HashMap<K, Slot<T>>
where
    K: Eq + Hash + Clone,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut seen = HashSet::new();
    let unique: Vec<K> = keys.into_iter().filter(|k| seen.insert(k.clone())).collect();

    let legs = unique.into_iter().map(|key| {
        let fut = fetch(key.clone());
        async move { (key, Slot::from_result(fut.await)) }
    });

    join_all(legs).await.into_iter().collect()
}

/// Fans out to the student and institution services for detail views.
pub struct DetailAggregator {
    students: StudentApi,
    institutions: InstitutionApi,
}

impl DetailAggregator {
    pub fn new(students: StudentApi, institutions: InstitutionApi) -> Self {
        Self {
            students,
            institutions,
        }
    }

    /// Resolve the three legs for one enrollment concurrently, settle-all.
    pub async fn fetch_detail(&self, enrollment: Enrollment) -> EnrollmentDetail {
        let (student, institution, classroom) = tokio::join!(
            self.students.get(&enrollment.student_id),
            self.institutions.get(&enrollment.institution_id),
            self.institutions.get_classroom(&enrollment.classroom_id),
        );
        EnrollmentDetail {
            enrollment,
            student: Slot::from_result(student),
            institution: Slot::from_result(institution),
            classroom: Slot::from_result(classroom),
        }
    }

    /// Resolve every distinct student referenced by a working set of
    /// enrollments. A student appearing in several enrollments is fetched
    /// once.
    pub async fn resolve_students<'a>(
        &self,
        enrollments: impl IntoIterator<Item = &'a Enrollment>,
    ) -> HashMap<String, Slot<StudentData>> {
        let ids = enrollments.into_iter().map(|e| e.student_id.clone());
        settle_all(ids, |id| async move { self.students.get(&id).await }).await
    }

    /// Resolve every distinct institution referenced by a working set.
    pub async fn resolve_institutions<'a>(
        &self,
        enrollments: impl IntoIterator<Item = &'a Enrollment>,
    ) -> HashMap<String, Slot<InstitutionDetail>> {
        let ids = enrollments.into_iter().map(|e| e.institution_id.clone());
        settle_all(ids, |id| async move { self.institutions.get(&id).await }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn settle_all_captures_each_outcome_independently() {
        let outcome = settle_all(vec!["a", "b", "c"], |key| async move {
            if key == "b" {
                Err(ApiError::NotFound {
                    path: format!("/x/{key}"),
                })
            } else {
                Ok(format!("value-{key}"))
            }
        })
        .await;

        assert_eq!(outcome.len(), 3);
        assert_eq!(
            outcome["a"].as_resolved(),
            Some(&"value-a".to_string())
        );
        assert_eq!(outcome["b"], Slot::Failed(SlotError::NotFound));
        assert_eq!(
            outcome["c"].as_resolved(),
            Some(&"value-c".to_string())
        );
    }

    #[tokio::test]
    async fn settle_all_deduplicates_keys() {
        use std::sync::atomic::{AtomicU32, Ordering};
        let calls = AtomicU32::new(0);

        let outcome = settle_all(vec!["s1", "s2", "s1", "s1"], |key| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, ApiError>(key.to_uppercase()) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome["s1"].as_resolved(), Some(&"S1".to_string()));
    }

    #[tokio::test]
    async fn settle_all_of_nothing_is_empty() {
        let outcome: HashMap<String, Slot<u8>> =
            settle_all(Vec::<String>::new(), |_| async { Ok(1) }).await;
        assert!(outcome.is_empty());
    }

    #[test]
    fn slot_from_result_classification() {
        let resolved = Slot::from_result(Ok(7u32));
        assert_eq!(resolved.as_resolved(), Some(&7));

        let not_found = Slot::<u32>::from_result(Err(ApiError::NotFound {
            path: "/integration/students/9".into(),
        }));
        assert_eq!(not_found, Slot::Failed(SlotError::NotFound));

        let load = Slot::<u32>::from_result(Err(ApiError::Server {
            status: 502,
            message: "bad gateway".into(),
        }));
        assert!(matches!(load, Slot::Failed(SlotError::Load(_))));
        assert!(load.is_failed());
    }

    #[test]
    fn slot_error_display() {
        assert_eq!(SlotError::NotFound.to_string(), "not found");
        assert_eq!(
            SlotError::Load("timeout".into()).to_string(),
            "error loading: timeout"
        );
    }
}
