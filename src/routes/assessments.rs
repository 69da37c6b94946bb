use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::assessment_dto::{CreateAssessmentPayload, UpdateAssessmentPayload},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_assessments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.assessment_service.list().await))
}

#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.get_by_id(&id).await?;
    Ok(Json(assessment))
}

#[axum::debug_handler]
pub async fn create_assessment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let assessment = state.assessment_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

#[axum::debug_handler]
pub async fn update_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let assessment = state.assessment_service.update(&id, payload).await?;
    Ok(Json(assessment))
}

#[axum::debug_handler]
pub async fn delete_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.assessment_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
