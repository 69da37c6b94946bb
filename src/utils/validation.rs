use std::collections::BTreeMap;

use crate::models::question::Question;

/// Field-level checks run before a draft may be committed. Returns a map of
/// editor field name to message; an empty map means the question is valid.
///
/// The rules are the same for every question type: correct_answer and
/// test_cases are required even for mcq/true-false variants.
pub fn validate_question(question: &Question) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    if question.question_text.text.trim().is_empty() {
        errors.insert(
            "questionText".to_string(),
            "Question text is required".to_string(),
        );
    }
    if question.topic.trim().is_empty() {
        errors.insert("topic".to_string(), "Topic is required".to_string());
    }
    if question.correct_answer.trim().is_empty() {
        errors.insert(
            "correctAnswer".to_string(),
            "Correct answer is required".to_string(),
        );
    }
    if question.test_cases.is_empty() {
        errors.insert(
            "testCases".to_string(),
            "At least one test case is required".to_string(),
        );
    }
    errors
}
