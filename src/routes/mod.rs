pub mod application;
pub mod extract;
pub mod health;
pub mod job;
pub mod profile;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{store::PlacementStore, AppState};

/// Every PlacementHub route, with state applied. Cross-cutting layers
/// (tracing, CORS, body limit) are added by the binary.
pub fn router<S: PlacementStore>(state: AppState<S>) -> Router {
    let application_api = Router::new()
        .route("/api/applications", post(application::apply::<S>))
        .route(
            "/api/applications/student/:student_id",
            get(application::list_for_student::<S>),
        )
        .route(
            "/api/applications/job/:job_id",
            get(application::list_for_job::<S>),
        )
        .route(
            "/api/applications/:id",
            get(application::get_application::<S>).delete(application::withdraw::<S>),
        )
        .route(
            "/api/applications/:id/status",
            put(application::update_status::<S>),
        )
        .route(
            "/api/applications/:id/interview",
            put(application::schedule_interview::<S>),
        )
        .route(
            "/api/applications/:id/purge",
            delete(application::purge::<S>),
        );

    let job_api = Router::new()
        .route(
            "/api/jobs",
            get(job::list_jobs::<S>).post(job::create_job::<S>),
        )
        .route(
            "/api/jobs/:id",
            get(job::get_job::<S>).patch(job::update_job::<S>),
        );

    let profile_api = Router::new()
        .route("/api/students", post(profile::create_student::<S>))
        .route("/api/students/:id", get(profile::get_student::<S>))
        .route("/api/employers", post(profile::create_employer::<S>))
        .route("/api/employers/:id", get(profile::get_employer::<S>));

    Router::new()
        .route("/health", get(health::health))
        .merge(application_api)
        .merge(job_api)
        .merge(profile_api)
        .with_state(state)
}
