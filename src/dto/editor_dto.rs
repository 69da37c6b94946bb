use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::question::{Question, QuestionType};
use crate::services::draft_service::QuestionDraft;

#[derive(Debug, Clone, Deserialize)]
pub struct OpenDraftPayload {
    pub question: Question,
}

#[derive(Debug, Clone, Serialize)]
pub struct DraftResponse {
    pub draft_id: Uuid,
    pub question: Question,
    pub selected_test_case: Option<usize>,
}

impl DraftResponse {
    pub fn new(draft_id: Uuid, draft: QuestionDraft) -> Self {
        Self {
            draft_id,
            question: draft.question,
            selected_test_case: draft.selected_test_case,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetTypePayload {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

/// Patch for the common (non-variant) fields of a draft. `correct_option` and
/// `code_snippet` are accepted only while the variant carries them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftDetailsPayload {
    pub question_text: Option<String>,
    pub starter_code: Option<String>,
    pub difficulty_level: Option<String>,
    pub topic: Option<String>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub correct_option: Option<bool>,
    pub code_snippet: Option<String>,
}

/// A single-field edit of one test case. Input and expected-output edits carry
/// the raw cell text; parse-or-fallback happens on apply.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum TestCaseEdit {
    Description(String),
    Input(String),
    ExpectedOutput(String),
    IsDefault(bool),
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonTestCasesPayload {
    /// The whole test-case list as one JSON document.
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonTestCasesResponse {
    /// False when the document did not parse; the previous state is retained.
    pub applied: bool,
    pub draft_id: Uuid,
    pub question: Question,
    pub selected_test_case: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum OptionEdit {
    Text(String),
    IsCorrect(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    Question,
    Explanation,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateDraftResponse {
    pub errors: BTreeMap<String, String>,
}
