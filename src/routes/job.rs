use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload},
    error::Result,
    routes::extract::{JsonBody, PathParam, QueryParams},
    store::PlacementStore,
    AppState,
};

pub async fn create_job<S: PlacementStore>(
    State(state): State<AppState<S>>,
    JsonBody(payload): JsonBody<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn list_jobs<S: PlacementStore>(
    State(state): State<AppState<S>>,
    QueryParams(query): QueryParams<JobListQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list(query.active).await?;
    Ok(Json(jobs))
}

pub async fn get_job<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get(id).await?;
    Ok(Json(job))
}

pub async fn update_job<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.update(id, payload.into()).await?;
    Ok(Json(job))
}
