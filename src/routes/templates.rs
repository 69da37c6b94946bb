use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::{
    dto::template_dto::{CreateTemplatePayload, ImportTemplatesResponse, UpdateTemplatePayload},
    error::{Error, Result},
    models::template::QuestionTemplate,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/templates",
    responses(
        (status = 200, description = "List of templates", body = Json<Vec<QuestionTemplate>>)
    )
)]
#[axum::debug_handler]
pub async fn list_templates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.template_service.list().await))
}

#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    params(
        ("id" = String, Path, description = "Template ID")
    ),
    responses(
        (status = 200, description = "Template found", body = Json<QuestionTemplate>),
        (status = 404, description = "Template not found")
    )
)]
#[axum::debug_handler]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let template = state.template_service.get_by_id(&id).await?;
    Ok(Json(template))
}

#[utoipa::path(
    post,
    path = "/api/templates",
    request_body = CreateTemplatePayload,
    responses(
        (status = 201, description = "Template created successfully", body = Json<QuestionTemplate>),
        (status = 400, description = "Invalid payload or failed validation rules")
    )
)]
#[axum::debug_handler]
pub async fn create_template(
    State(state): State<AppState>,
    Json(payload): Json<CreateTemplatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let template = state.template_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

#[utoipa::path(
    put,
    path = "/api/templates/{id}",
    params(
        ("id" = String, Path, description = "Template ID")
    ),
    request_body = UpdateTemplatePayload,
    responses(
        (status = 200, description = "Template updated successfully", body = Json<QuestionTemplate>),
        (status = 400, description = "Invalid payload or failed validation rules"),
        (status = 404, description = "Template not found")
    )
)]
#[axum::debug_handler]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTemplatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let template = state.template_service.update(&id, payload).await?;
    Ok(Json(template))
}

#[utoipa::path(
    delete,
    path = "/api/templates/{id}",
    params(
        ("id" = String, Path, description = "Template ID")
    ),
    responses(
        (status = 204, description = "Template deleted successfully"),
        (status = 404, description = "Template not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.template_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn example_templates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.template_service.examples()))
}

/// Download the whole template list as a date-stamped JSON attachment.
#[axum::debug_handler]
pub async fn export_templates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let (filename, templates) = state.template_service.export().await;
    let body = serde_json::to_vec_pretty(&templates)?;
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

#[axum::debug_handler]
pub async fn import_templates(
    State(state): State<AppState>,
    Json(body): Json<JsonValue>,
) -> Result<impl IntoResponse> {
    if !body.is_array() {
        return Err(Error::BadRequest("Invalid template format".to_string()));
    }
    let entries: Vec<CreateTemplatePayload> = serde_json::from_value(body)?;
    for entry in &entries {
        entry.validate()?;
    }
    let count = state.template_service.import(entries).await?;
    Ok(Json(ImportTemplatesResponse {
        message: "Templates imported successfully".to_string(),
        count,
    }))
}
