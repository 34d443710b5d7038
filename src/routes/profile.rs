use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::profile_dto::{CreateEmployerPayload, CreateStudentPayload},
    error::Result,
    routes::extract::{JsonBody, PathParam},
    store::PlacementStore,
    AppState,
};

pub async fn create_student<S: PlacementStore>(
    State(state): State<AppState<S>>,
    JsonBody(payload): JsonBody<CreateStudentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let student = state.profile_service.create_student(payload).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn get_student<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse> {
    let student = state.profile_service.get_student(id).await?;
    Ok(Json(student))
}

pub async fn create_employer<S: PlacementStore>(
    State(state): State<AppState<S>>,
    JsonBody(payload): JsonBody<CreateEmployerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let employer = state.profile_service.create_employer(payload).await?;
    Ok((StatusCode::CREATED, Json(employer)))
}

pub async fn get_employer<S: PlacementStore>(
    State(state): State<AppState<S>>,
    PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse> {
    let employer = state.profile_service.get_employer(id).await?;
    Ok(Json(employer))
}
