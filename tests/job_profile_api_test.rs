mod common;

use axum::http::{Method, StatusCode};
use common::{create_employer, create_job, create_student, send};
use placement_hub::services::status_workflow::TransitionPolicy;
use serde_json::json;

#[tokio::test]
async fn health_reports_ok() {
    let app = common::app(TransitionPolicy::Strict);
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn job_requires_existing_employer() {
    let app = common::app(TransitionPolicy::Strict);
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/jobs",
        Some(json!({
            "employerId": uuid::Uuid::new_v4(),
            "title": "Ghost role",
            "description": "Nobody posted this",
            "location": "Nowhere"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Employer not found");
}

#[tokio::test]
async fn job_defaults_and_view_counting() {
    let app = common::app(TransitionPolicy::Strict);
    let employer = create_employer(&app).await;
    let job = create_job(&app, &employer).await;

    let (_, first) = send(&app, Method::GET, &format!("/api/jobs/{job}"), None).await;
    assert_eq!(first["isActive"], true);
    assert_eq!(first["views"], 1);

    let (_, second) = send(&app, Method::GET, &format!("/api/jobs/{job}"), None).await;
    assert_eq!(second["views"], 2);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/jobs/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn job_list_filters_on_active_flag() {
    let app = common::app(TransitionPolicy::Strict);
    let employer = create_employer(&app).await;
    let open = create_job(&app, &employer).await;
    let closed = create_job(&app, &employer).await;

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/jobs/{closed}"),
        Some(json!({ "isActive": false, "title": "Embedded Systems Trainee (filled)" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Embedded Systems Trainee (filled)");
    assert_eq!(updated["location"], "Hyderabad");

    let (_, all) = send(&app, Method::GET, "/api/jobs", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, active) = send(&app, Method::GET, "/api/jobs?active=true", None).await;
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["id"], open.as_str());
}

#[tokio::test]
async fn job_payload_is_validated() {
    let app = common::app(TransitionPolicy::Strict);
    let employer = create_employer(&app).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/jobs",
        Some(json!({
            "employerId": employer,
            "title": "",
            "description": "Empty title",
            "location": "Chennai"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
}

#[tokio::test]
async fn student_round_trip_and_duplicate_email() {
    let app = common::app(TransitionPolicy::Strict);
    let id = create_student(&app, "Nila.Raman@Students.Example").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/students/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "nila.raman@students.example");
    assert_eq!(body["skills"], json!(["rust", "sql"]));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/students",
        Some(json!({
            "firstName": "Nila",
            "lastName": "Raman",
            "email": "nila.raman@students.example"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "A student with this email address already exists"
    );

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/students/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn student_payload_is_validated() {
    let app = common::app(TransitionPolicy::Strict);
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/students",
        Some(json!({
            "firstName": "Arun",
            "lastName": "Das",
            "email": "not-an-email",
            "gpa": 12.5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn employer_round_trip() {
    let app = common::app(TransitionPolicy::Strict);
    let id = create_employer(&app).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/employers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["companyName"], "Contoso Labs");
    assert_eq!(body["contactEmail"], "hiring@contoso.example");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/employers/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Employer not found");
}

#[tokio::test]
async fn bad_active_filter_is_a_json_bad_request() {
    let app = common::app(TransitionPolicy::Strict);
    let (status, body) = send(&app, Method::GET, "/api/jobs?active=sometimes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .expect("json message")
        .starts_with("Invalid query string"));
}
