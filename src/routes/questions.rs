use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::{
    dto::question_dto::{GenerateQuestionsPayload, SaveQuestionsResponse},
    error::{Error, Result},
    models::question::Question,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/questions/generate",
    request_body = GenerateQuestionsPayload,
    responses(
        (status = 200, description = "Generated question batch", body = Json<Vec<Question>>),
        (status = 400, description = "Missing topic or count outside [10, 30]")
    )
)]
#[axum::debug_handler]
pub async fn generate_questions(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuestionsPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let questions = state.generation_service.generate(&payload);
    Ok(Json(questions))
}

#[utoipa::path(
    post,
    path = "/api/questions",
    responses(
        (status = 200, description = "Questions stored", body = Json<SaveQuestionsResponse>),
        (status = 400, description = "Body is not an array of questions")
    )
)]
#[axum::debug_handler]
pub async fn save_questions(
    State(state): State<AppState>,
    Json(body): Json<JsonValue>,
) -> Result<impl IntoResponse> {
    if !body.is_array() {
        return Err(Error::BadRequest(
            "Invalid input: expected an array of questions".to_string(),
        ));
    }
    let questions: Vec<Question> = serde_json::from_value(body)?;
    let count = state.question_service.save_all(questions).await;
    Ok(Json(SaveQuestionsResponse {
        message: "Questions saved successfully".to_string(),
        count,
    }))
}

#[axum::debug_handler]
pub async fn list_saved_questions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.question_service.list_saved().await))
}
