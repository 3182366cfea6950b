//! Validation gate over HTTP: the duplicate probe short-circuits creates
//! locally, and a probe that cannot reach the service defers to the server.

use std::time::Duration;

use matricula::api::{AcademicPeriodApi, EnrollmentApi, RetryPolicy};
use matricula::model::{AgeGroup, AgeGroupField, Enrollment};
use matricula::validation::{GateError, ValidationGate};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gate(server: &MockServer) -> ValidationGate {
    let policy = RetryPolicy {
        max_attempts: 1,
        base_delay_ms: 10,
        attempt_timeout: Duration::from_millis(500),
    };
    ValidationGate::new(
        EnrollmentApi::new(server.uri(), policy.clone()),
        AcademicPeriodApi::new(server.uri(), policy),
    )
}

fn draft() -> Enrollment {
    let mut draft = Enrollment::draft();
    draft.student_id = "s-1".into();
    draft.institution_id = "i-1".into();
    draft.classroom_id = "c-1".into();
    draft.academic_year = "2025".into();
    draft.academic_period_id = "p-1".into();
    draft.age_group = AgeGroupField::Known(AgeGroup::Age4);
    draft.shift = "MATUTINA".into();
    draft.modality = "PRESENCIAL".into();
    draft
}

fn existing(period_id: &str, year: &str, status: &str) -> serde_json::Value {
    json!({
        "id": "e-old",
        "studentId": "s-1",
        "academicPeriodId": period_id,
        "academicYear": year,
        "status": status,
        "ageGroup": "AGE_4"
    })
}

fn created_body() -> serde_json::Value {
    json!({
        "id": "e-new",
        "studentId": "s-1",
        "institutionId": "i-1",
        "classroomId": "c-1",
        "academicYear": "2025",
        "academicPeriodId": "p-1",
        "enrollmentDate": "2025-03-10T14:00:00Z",
        "status": "PENDING",
        "type": "NEW",
        "ageGroup": "AGE_4",
        "shift": "MATUTINA",
        "modality": "PRESENCIAL"
    })
}

#[tokio::test]
async fn duplicate_is_rejected_before_any_create_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/enrollments/student/s-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([existing("p-1", "2025", "PENDING")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/enrollments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_body()))
        .expect(0)
        .mount(&server)
        .await;

    let err = gate(&server).create_enrollment(&draft()).await.unwrap_err();
    match err {
        GateError::Duplicate {
            academic_period_id,
            academic_year,
        } => {
            assert_eq!(academic_period_id, "p-1");
            assert_eq!(academic_year, "2025");
        }
        other => panic!("expected Duplicate, got {other:?}"),
    }
}

#[tokio::test]
async fn different_period_is_not_a_duplicate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/enrollments/student/s-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([existing("p-2", "2025", "PENDING")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/enrollments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_body()))
        .expect(1)
        .mount(&server)
        .await;

    let created = gate(&server).create_enrollment(&draft()).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("e-new"));
    assert!(created.enrollment_date.is_some());
}

#[tokio::test]
async fn cancelled_existing_enrollment_does_not_block() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/enrollments/student/s-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([existing("p-1", "2025", "CANCELLED")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/enrollments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_body()))
        .expect(1)
        .mount(&server)
        .await;

    assert!(gate(&server).create_enrollment(&draft()).await.is_ok());
}

#[tokio::test]
async fn probe_failure_falls_through_to_the_server_constraint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/enrollments/student/s-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("probe down"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/enrollments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_body()))
        .expect(1)
        .mount(&server)
        .await;

    // The probe error is swallowed; the create still goes out.
    assert!(gate(&server).create_enrollment(&draft()).await.is_ok());
}

#[tokio::test]
async fn server_side_conflict_reads_as_duplicate_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/enrollments/student/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/enrollments"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("duplicate key value violates unique constraint"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = gate(&server).create_enrollment(&draft()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        matricula::DUPLICATE_ENROLLMENT_MESSAGE
    );
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/enrollments/student/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut bad = draft();
    bad.shift.clear();
    bad.age_group = AgeGroupField::Unknown("kinder".into());

    let err = gate(&server).create_enrollment(&bad).await.unwrap_err();
    match err {
        GateError::Invalid(fields) => {
            assert!(fields.contains_key("shift"));
            assert!(fields.contains_key("ageGroup"));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}
