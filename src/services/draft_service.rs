use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dto::editor_dto::{DraftDetailsPayload, ImageSlot, OptionEdit, TestCaseEdit};
use crate::error::{Error, Result};
use crate::models::question::{
    ChoiceOption, Question, QuestionType, QuestionVariant, TestCase, TestValue,
};
use crate::utils::validation::validate_question;

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// One open editing session: the in-memory question plus the selected
/// test-case row. Nothing is persisted until commit.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDraft {
    pub question: Question,
    pub selected_test_case: Option<usize>,
}

#[derive(Clone)]
pub struct DraftService {
    sessions: Arc<RwLock<HashMap<Uuid, QuestionDraft>>>,
}

impl Default for DraftService {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftService {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn open(&self, question: Question) -> (Uuid, QuestionDraft) {
        let draft = QuestionDraft {
            question,
            selected_test_case: None,
        };
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, draft.clone());
        (id, draft)
    }

    pub async fn get(&self, id: Uuid) -> Result<QuestionDraft> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Draft not found".to_string()))
    }

    pub async fn discard(&self, id: Uuid) -> Result<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound("Draft not found".to_string()))
    }

    async fn update<F, R>(&self, id: Uuid, apply: F) -> Result<(R, QuestionDraft)>
    where
        F: FnOnce(&mut QuestionDraft) -> Result<R>,
    {
        let mut sessions = self.sessions.write().await;
        let draft = sessions
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Draft not found".to_string()))?;
        let out = apply(draft)?;
        Ok((out, draft.clone()))
    }

    pub async fn set_question_type(
        &self,
        id: Uuid,
        question_type: QuestionType,
    ) -> Result<QuestionDraft> {
        let (_, draft) = self
            .update(id, |draft| {
                draft.question.set_question_type(question_type);
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    pub async fn update_details(
        &self,
        id: Uuid,
        payload: DraftDetailsPayload,
    ) -> Result<QuestionDraft> {
        let (_, draft) = self
            .update(id, |draft| {
                let question = &mut draft.question;
                if let Some(text) = payload.question_text {
                    question.question_text.text = text;
                }
                if let Some(starter_code) = payload.starter_code {
                    question.question_text.starter_code = Some(starter_code);
                }
                if let Some(level) = payload.difficulty_level {
                    question.difficulty_level = level;
                }
                if let Some(topic) = payload.topic {
                    question.topic = topic;
                }
                if let Some(answer) = payload.correct_answer {
                    question.correct_answer = answer;
                }
                if let Some(explanation) = payload.explanation {
                    question.explanation.text = explanation;
                }
                if let Some(value) = payload.correct_option {
                    match &mut question.variant {
                        QuestionVariant::TrueFalse { correct_option } => *correct_option = value,
                        _ => {
                            return Err(Error::BadRequest(
                                "Question type has no true/false answer".to_string(),
                            ))
                        }
                    }
                }
                if let Some(snippet) = payload.code_snippet {
                    match &mut question.variant {
                        QuestionVariant::CodeOutputMcq { code_snippet, .. } => {
                            *code_snippet = snippet
                        }
                        _ => {
                            return Err(Error::BadRequest(
                                "Question type has no code snippet".to_string(),
                            ))
                        }
                    }
                }
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    /// Append a blank test case and select it.
    pub async fn add_test_case(&self, id: Uuid) -> Result<QuestionDraft> {
        let (_, draft) = self
            .update(id, |draft| {
                draft.question.test_cases.push(TestCase::blank());
                draft.selected_test_case = Some(draft.question.test_cases.len() - 1);
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    pub async fn edit_test_case(
        &self,
        id: Uuid,
        index: usize,
        edit: TestCaseEdit,
    ) -> Result<QuestionDraft> {
        let (_, draft) = self
            .update(id, |draft| {
                let case = draft
                    .question
                    .test_cases
                    .get_mut(index)
                    .ok_or_else(|| Error::NotFound("Test case not found".to_string()))?;
                match edit {
                    TestCaseEdit::Description(text) => case.description = text,
                    TestCaseEdit::Input(raw) => case.input = TestValue::from_raw(&raw),
                    TestCaseEdit::ExpectedOutput(raw) => {
                        case.expected_output = TestValue::from_raw(&raw)
                    }
                    TestCaseEdit::IsDefault(flag) => case.is_default = flag,
                }
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    /// Delete by index and clear the selection.
    pub async fn delete_test_case(&self, id: Uuid, index: usize) -> Result<QuestionDraft> {
        let (_, draft) = self
            .update(id, |draft| {
                if index >= draft.question.test_cases.len() {
                    return Err(Error::NotFound("Test case not found".to_string()));
                }
                draft.question.test_cases.remove(index);
                draft.selected_test_case = None;
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    /// JSON-mode bulk replacement. A document that fails to parse leaves the
    /// last valid list in place and reports `false`; no error surfaces.
    pub async fn replace_test_cases_json(
        &self,
        id: Uuid,
        source: &str,
    ) -> Result<(bool, QuestionDraft)> {
        self.update(id, |draft| {
            match serde_json::from_str::<Vec<TestCase>>(source) {
                Ok(cases) => {
                    draft.question.test_cases = cases;
                    if draft
                        .selected_test_case
                        .is_some_and(|i| i >= draft.question.test_cases.len())
                    {
                        draft.selected_test_case = None;
                    }
                    Ok(true)
                }
                Err(_) => Ok(false),
            }
        })
        .await
    }

    pub async fn add_option(&self, id: Uuid) -> Result<QuestionDraft> {
        let (_, draft) = self
            .update(id, |draft| {
                let options = Self::options_of(&mut draft.question)?;
                options.push(ChoiceOption::blank());
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    pub async fn edit_option(
        &self,
        id: Uuid,
        option_id: &str,
        edit: OptionEdit,
    ) -> Result<QuestionDraft> {
        let (_, draft) = self
            .update(id, |draft| {
                let options = Self::options_of(&mut draft.question)?;
                let option = options
                    .iter_mut()
                    .find(|option| option.id == option_id)
                    .ok_or_else(|| Error::NotFound("Option not found".to_string()))?;
                match edit {
                    OptionEdit::Text(text) => option.text = text,
                    OptionEdit::IsCorrect(flag) => option.is_correct = flag,
                }
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    pub async fn remove_option(&self, id: Uuid, option_id: &str) -> Result<QuestionDraft> {
        let (_, draft) = self
            .update(id, |draft| {
                let options = Self::options_of(&mut draft.question)?;
                let before = options.len();
                options.retain(|option| option.id != option_id);
                if options.len() == before {
                    return Err(Error::NotFound("Option not found".to_string()));
                }
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    fn options_of(question: &mut Question) -> Result<&mut Vec<ChoiceOption>> {
        question
            .variant
            .options_mut()
            .ok_or_else(|| Error::BadRequest("Question type has no answer options".to_string()))
    }

    /// Validate and store an uploaded image as a self-contained data URI.
    pub async fn attach_image(
        &self,
        id: Uuid,
        slot: ImageSlot,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<QuestionDraft> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(Error::BadRequest(
                "Image size should be less than 5MB".to_string(),
            ));
        }
        if !content_type.starts_with("image/") {
            return Err(Error::BadRequest("Please upload an image file".to_string()));
        }
        let data_uri = format!("data:{};base64,{}", content_type, BASE64.encode(bytes));
        let (_, draft) = self
            .update(id, |draft| {
                Self::images_of(&mut draft.question, slot).push(data_uri);
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    pub async fn remove_image(&self, id: Uuid, slot: ImageSlot, index: usize) -> Result<QuestionDraft> {
        let (_, draft) = self
            .update(id, |draft| {
                let images = Self::images_of(&mut draft.question, slot);
                if index >= images.len() {
                    return Err(Error::NotFound("Image not found".to_string()));
                }
                images.remove(index);
                Ok(())
            })
            .await?;
        Ok(draft)
    }

    fn images_of(question: &mut Question, slot: ImageSlot) -> &mut Vec<String> {
        match slot {
            ImageSlot::Question => &mut question.images.question,
            ImageSlot::Explanation => &mut question.images.explanation,
        }
    }

    pub async fn validate(&self, id: Uuid) -> Result<BTreeMap<String, String>> {
        let draft = self.get(id).await?;
        Ok(validate_question(&draft.question))
    }

    /// Validate and close the session. On failure the draft stays open so the
    /// author can fix the named fields.
    pub async fn commit(&self, id: Uuid) -> Result<Question> {
        let mut sessions = self.sessions.write().await;
        let draft = sessions
            .remove(&id)
            .ok_or_else(|| Error::NotFound("Draft not found".to_string()))?;
        let errors = validate_question(&draft.question);
        if !errors.is_empty() {
            sessions.insert(id, draft);
            return Err(Error::QuestionInvalid(errors));
        }
        Ok(draft.question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Explanation, ImageSet, QuestionText};
    use serde_json::json;

    fn coding_question() -> Question {
        Question {
            id: "q-1".into(),
            difficulty_level: "medium".into(),
            question_text: QuestionText {
                text: "Sum a list.".into(),
                starter_code: None,
            },
            correct_answer: "sum".into(),
            topic: "arrays".into(),
            explanation: Explanation {
                text: String::new(),
            },
            images: ImageSet::default(),
            test_cases: vec![],
            variant: QuestionVariant::Coding,
        }
    }

    #[tokio::test]
    async fn adding_a_test_case_selects_it_and_deleting_clears_selection() {
        let service = DraftService::new();
        let (id, _) = service.open(coding_question()).await;

        let draft = service.add_test_case(id).await.unwrap();
        assert_eq!(draft.question.test_cases.len(), 1);
        assert_eq!(draft.selected_test_case, Some(0));

        let draft = service.add_test_case(id).await.unwrap();
        assert_eq!(draft.selected_test_case, Some(1));

        let draft = service.delete_test_case(id, 0).await.unwrap();
        assert_eq!(draft.question.test_cases.len(), 1);
        assert_eq!(draft.selected_test_case, None);
    }

    #[tokio::test]
    async fn form_mode_edits_parse_or_fall_back() {
        let service = DraftService::new();
        let (id, _) = service.open(coding_question()).await;
        service.add_test_case(id).await.unwrap();

        let draft = service
            .edit_test_case(id, 0, TestCaseEdit::Input("[1,2,3]".into()))
            .await
            .unwrap();
        assert_eq!(
            draft.question.test_cases[0].input,
            TestValue::Structured(json!([1, 2, 3]))
        );

        let draft = service
            .edit_test_case(id, 0, TestCaseEdit::Input("abc".into()))
            .await
            .unwrap();
        assert_eq!(
            draft.question.test_cases[0].input,
            TestValue::Literal("abc".into())
        );
    }

    #[tokio::test]
    async fn json_mode_keeps_last_valid_state_on_parse_failure() {
        let service = DraftService::new();
        let (id, _) = service.open(coding_question()).await;

        let source = json!([
            {"input": "a", "expected_output": "b", "description": "one", "is_default": true}
        ])
        .to_string();
        let (applied, draft) = service.replace_test_cases_json(id, &source).await.unwrap();
        assert!(applied);
        assert_eq!(draft.question.test_cases.len(), 1);

        let (applied, draft) = service
            .replace_test_cases_json(id, "[{\"input\": ")
            .await
            .unwrap();
        assert!(!applied);
        assert_eq!(draft.question.test_cases.len(), 1);
        assert_eq!(draft.question.test_cases[0].description, "one");
    }

    #[tokio::test]
    async fn option_edits_require_a_choice_variant() {
        let service = DraftService::new();
        let (id, _) = service.open(coding_question()).await;
        let err = service.add_option(id).await.unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        service
            .set_question_type(id, QuestionType::Mcq)
            .await
            .unwrap();
        let draft = service.add_option(id).await.unwrap();
        let option_id = match &draft.question.variant {
            QuestionVariant::Mcq { options } => options[0].id.clone(),
            other => panic!("unexpected variant: {:?}", other),
        };

        let draft = service
            .edit_option(id, &option_id, OptionEdit::IsCorrect(true))
            .await
            .unwrap();
        match &draft.question.variant {
            QuestionVariant::Mcq { options } => assert!(options[0].is_correct),
            other => panic!("unexpected variant: {:?}", other),
        }

        let draft = service.remove_option(id, &option_id).await.unwrap();
        match &draft.question.variant {
            QuestionVariant::Mcq { options } => assert!(options.is_empty()),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[tokio::test]
    async fn oversized_or_non_image_uploads_leave_images_untouched() {
        let service = DraftService::new();
        let (id, _) = service.open(coding_question()).await;

        let oversized = vec![0u8; MAX_IMAGE_BYTES + 1];
        let err = service
            .attach_image(id, ImageSlot::Question, "image/png", &oversized)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        let err = service
            .attach_image(id, ImageSlot::Question, "text/plain", b"hello")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        let draft = service.get(id).await.unwrap();
        assert!(draft.question.images.question.is_empty());

        let draft = service
            .attach_image(id, ImageSlot::Question, "image/png", &[0u8; 1024])
            .await
            .unwrap();
        assert_eq!(draft.question.images.question.len(), 1);
        assert!(draft.question.images.question[0].starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn commit_blocks_on_validation_errors_and_closes_on_success() {
        let service = DraftService::new();
        let mut question = coding_question();
        question.topic = String::new();
        let (id, _) = service.open(question).await;
        service.add_test_case(id).await.unwrap();

        let err = service.commit(id).await.unwrap_err();
        match err {
            Error::QuestionInvalid(fields) => {
                assert!(fields.contains_key("topic"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // Draft survives a failed commit.
        assert!(service.get(id).await.is_ok());

        service
            .update_details(
                id,
                DraftDetailsPayload {
                    topic: Some("arrays".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let question = service.commit(id).await.unwrap();
        assert_eq!(question.topic, "arrays");
        assert!(service.get(id).await.is_err());
    }
}
