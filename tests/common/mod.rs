#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use placement_hub::{
    routes, services::status_workflow::TransitionPolicy, store::MemoryStore, AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub fn app(policy: TransitionPolicy) -> Router {
    routes::router(AppState::new(MemoryStore::new(), policy))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

pub async fn create_employer(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/employers",
        Some(json!({
            "companyName": "Contoso Labs",
            "industry": "Consulting",
            "location": "Bengaluru",
            "contactEmail": "hiring@contoso.example"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().expect("employer id").to_string()
}

pub async fn create_student(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/students",
        Some(json!({
            "firstName": "Meera",
            "lastName": "Iyer",
            "email": email,
            "department": "Electronics",
            "gpa": 8.2,
            "graduationYear": 2027,
            "skills": ["rust", "sql"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().expect("student id").to_string()
}

pub async fn create_job(app: &Router, employer_id: &str) -> String {
    let deadline = Utc::now() + Duration::days(14);
    let (status, body) = send(
        app,
        Method::POST,
        "/api/jobs",
        Some(json!({
            "employerId": employer_id,
            "title": "Embedded Systems Trainee",
            "description": "Firmware work on sensor boards",
            "location": "Hyderabad",
            "department": "Electronics",
            "jobType": "full_time",
            "applicationDeadline": deadline.to_rfc3339()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().expect("job id").to_string()
}

/// Employer, one job and one student.
pub async fn seed(app: &Router) -> (String, String) {
    let employer = create_employer(app).await;
    let job = create_job(app, &employer).await;
    let student = create_student(app, "meera.iyer@students.example").await;
    (job, student)
}

pub async fn apply(app: &Router, job_id: &str, student_id: &str) -> (StatusCode, JsonValue) {
    send(
        app,
        Method::POST,
        "/api/applications",
        Some(json!({
            "jobId": job_id,
            "studentId": student_id,
            "coverLetter": "I have built two RTOS projects.",
            "resumeId": "resume-42"
        })),
    )
    .await
}

pub fn history(body: &JsonValue) -> &Vec<JsonValue> {
    body["statusHistory"].as_array().expect("statusHistory")
}

/// The last history entry always mirrors the current status.
pub fn assert_history_consistent(body: &JsonValue) {
    let entries = history(body);
    assert!(!entries.is_empty());
    assert_eq!(entries.last().unwrap()["status"], body["status"]);
}
