use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::content_dto::{CreateContentPayload, UpdateContentPayload},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_contents(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.content_service.list().await))
}

#[axum::debug_handler]
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let content = state.content_service.get_by_id(&id).await?;
    Ok(Json(content))
}

#[axum::debug_handler]
pub async fn create_content(
    State(state): State<AppState>,
    Json(payload): Json<CreateContentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let content = state.content_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(content)))
}

#[axum::debug_handler]
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateContentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let content = state.content_service.update(&id, payload).await?;
    Ok(Json(content))
}

#[axum::debug_handler]
pub async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.content_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
