use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApplicationListQuery, ApplyPayload, MessageResponse, ScheduleInterviewPayload,
        UpdateStatusPayload,
    },
    error::Result,
    routes::extract::{JsonBody, PathParam, QueryParams},
    store::PlacementStore,
    AppState,
};

pub async fn apply<S: PlacementStore>(
    State(state): State<AppState<S>>,
    JsonBody(payload): JsonBody<ApplyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let request = payload.into_request()?;
    let application = state.application_service.apply(request).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn list_for_student<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(student_id): PathParam<Uuid>,
    QueryParams(query): QueryParams<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let status = query.parsed_status()?;
    let applications = state
        .application_service
        .list_for_student(student_id, status)
        .await?;
    Ok(Json(applications))
}

pub async fn list_for_job<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(job_id): PathParam<Uuid>,
    QueryParams(query): QueryParams<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let status = query.parsed_status()?;
    let applications = state
        .application_service
        .list_for_job(job_id, status)
        .await?;
    Ok(Json(applications))
}

pub async fn get_application<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get(id).await?;
    Ok(Json(application))
}

pub async fn update_status<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let status = payload.parsed_status()?;
    let application = state
        .application_service
        .update_status(id, status, payload.note, payload.feedback)
        .await?;
    Ok(Json(application))
}

pub async fn schedule_interview<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<ScheduleInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let details = payload.into_details()?;
    let application = state
        .application_service
        .schedule_interview(id, details)
        .await?;
    Ok(Json(application))
}

pub async fn withdraw<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse> {
    state.application_service.withdraw(id).await?;
    Ok(Json(MessageResponse::new("Application withdrawn successfully")))
}

pub async fn purge<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse> {
    state.application_service.purge(id).await?;
    Ok(Json(MessageResponse::new("Application deleted")))
}
