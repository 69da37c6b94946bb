use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::QuestionType;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuestionsPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "Topic is required"))]
    pub topic: String,
    #[serde(default)]
    pub subtopic: Option<String>,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(rename = "numberOfQuestions", default)]
    #[validate(range(
        min = 10,
        max = 30,
        message = "Number of questions must be between 10 and 30"
    ))]
    pub number_of_questions: u32,
    #[serde(rename = "type", default = "default_question_type")]
    pub question_type: QuestionType,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_question_type() -> QuestionType {
    QuestionType::Coding
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveQuestionsResponse {
    pub message: String,
    pub count: usize,
}
