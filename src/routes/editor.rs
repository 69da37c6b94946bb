use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::editor_dto::{
        DraftDetailsPayload, DraftResponse, ImageSlot, JsonTestCasesPayload,
        JsonTestCasesResponse, OpenDraftPayload, OptionEdit, SetTypePayload, TestCaseEdit,
        ValidateDraftResponse,
    },
    error::{Error, Result},
    AppState,
};

#[axum::debug_handler]
pub async fn open_draft(
    State(state): State<AppState>,
    Json(payload): Json<OpenDraftPayload>,
) -> Result<impl IntoResponse> {
    let (id, draft) = state.draft_service.open(payload.question).await;
    Ok((StatusCode::CREATED, Json(DraftResponse::new(id, draft))))
}

#[axum::debug_handler]
pub async fn get_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let draft = state.draft_service.get(id).await?;
    Ok(Json(DraftResponse::new(id, draft)))
}

#[axum::debug_handler]
pub async fn discard_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.draft_service.discard(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn set_draft_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetTypePayload>,
) -> Result<impl IntoResponse> {
    let draft = state
        .draft_service
        .set_question_type(id, payload.question_type)
        .await?;
    Ok(Json(DraftResponse::new(id, draft)))
}

#[axum::debug_handler]
pub async fn update_draft_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DraftDetailsPayload>,
) -> Result<impl IntoResponse> {
    let draft = state.draft_service.update_details(id, payload).await?;
    Ok(Json(DraftResponse::new(id, draft)))
}

#[axum::debug_handler]
pub async fn add_test_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let draft = state.draft_service.add_test_case(id).await?;
    Ok((StatusCode::CREATED, Json(DraftResponse::new(id, draft))))
}

#[axum::debug_handler]
pub async fn edit_test_case(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(edit): Json<TestCaseEdit>,
) -> Result<impl IntoResponse> {
    let draft = state.draft_service.edit_test_case(id, index, edit).await?;
    Ok(Json(DraftResponse::new(id, draft)))
}

#[axum::debug_handler]
pub async fn delete_test_case(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<impl IntoResponse> {
    let draft = state.draft_service.delete_test_case(id, index).await?;
    Ok(Json(DraftResponse::new(id, draft)))
}

/// JSON-mode editing: replace the whole test-case list from one document.
/// A document that does not parse is reported, not applied.
#[axum::debug_handler]
pub async fn replace_test_cases(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<JsonTestCasesPayload>,
) -> Result<impl IntoResponse> {
    let (applied, draft) = state
        .draft_service
        .replace_test_cases_json(id, &payload.source)
        .await?;
    Ok(Json(JsonTestCasesResponse {
        applied,
        draft_id: id,
        question: draft.question,
        selected_test_case: draft.selected_test_case,
    }))
}

#[axum::debug_handler]
pub async fn add_option(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let draft = state.draft_service.add_option(id).await?;
    Ok((StatusCode::CREATED, Json(DraftResponse::new(id, draft))))
}

#[axum::debug_handler]
pub async fn edit_option(
    State(state): State<AppState>,
    Path((id, option_id)): Path<(Uuid, String)>,
    Json(edit): Json<OptionEdit>,
) -> Result<impl IntoResponse> {
    let draft = state.draft_service.edit_option(id, &option_id, edit).await?;
    Ok(Json(DraftResponse::new(id, draft)))
}

#[axum::debug_handler]
pub async fn remove_option(
    State(state): State<AppState>,
    Path((id, option_id)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse> {
    let draft = state.draft_service.remove_option(id, &option_id).await?;
    Ok(Json(DraftResponse::new(id, draft)))
}

/// Multipart upload of one image into the question or explanation slot.
#[axum::debug_handler]
pub async fn upload_image(
    State(state): State<AppState>,
    Path((id, slot)): Path<(Uuid, ImageSlot)>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await?;
        let draft = state
            .draft_service
            .attach_image(id, slot, &content_type, &data)
            .await?;
        return Ok((StatusCode::CREATED, Json(DraftResponse::new(id, draft))));
    }
    Err(Error::BadRequest("Missing file field".to_string()))
}

#[axum::debug_handler]
pub async fn remove_image(
    State(state): State<AppState>,
    Path((id, slot, index)): Path<(Uuid, ImageSlot, usize)>,
) -> Result<impl IntoResponse> {
    let draft = state.draft_service.remove_image(id, slot, index).await?;
    Ok(Json(DraftResponse::new(id, draft)))
}

#[axum::debug_handler]
pub async fn validate_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let errors = state.draft_service.validate(id).await?;
    Ok(Json(ValidateDraftResponse { errors }))
}

/// Validate and close the draft; the committed question is the response.
#[axum::debug_handler]
pub async fn commit_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let question = state.draft_service.commit(id).await?;
    Ok(Json(question))
}
