use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;
use uuid::Uuid;

use crate::dto::question_dto::GenerateQuestionsPayload;
use crate::models::question::{
    ChoiceOption, Explanation, ImageSet, Question, QuestionText, QuestionType, QuestionVariant,
    TestCase, TestValue,
};

const STARTER_CODE: &str = "def solution():\n    # Your code here\n    pass";
const SAMPLE_SOLUTION: &str = "def solution():\n    # Sample solution\n    return True";
const CODE_SNIPPET: &str = "print(\"Hello, World!\")\nfor i in range(3):\n    print(i)";

const EASY_PREFIXES: &[&str] = &["Explain", "Describe", "List", "Define", "Identify"];
const MEDIUM_PREFIXES: &[&str] = &["Compare", "Analyze", "Differentiate", "Evaluate", "Discuss"];
const HARD_PREFIXES: &[&str] = &["Critique", "Synthesize", "Assess", "Propose", "Design"];

/// Stand-in for the real question generator: produces a deterministic-shaped
/// batch of mock questions for the requested topic and type.
#[derive(Clone, Default)]
pub struct GenerationService;

impl GenerationService {
    pub fn new() -> Self {
        Self
    }

    /// Build exactly `number_of_questions` mock questions. Input bounds are
    /// checked by the caller before any work happens.
    pub fn generate(&self, payload: &GenerateQuestionsPayload) -> Vec<Question> {
        let mut rng = rand::thread_rng();
        (0..payload.number_of_questions)
            .map(|_| self.build_question(payload, &mut rng))
            .collect()
    }

    fn build_question(
        &self,
        payload: &GenerateQuestionsPayload,
        rng: &mut impl Rng,
    ) -> Question {
        let question_type = payload.question_type;
        let is_coding = question_type == QuestionType::Coding;

        Question {
            id: Uuid::new_v4().to_string(),
            difficulty_level: payload.difficulty.clone(),
            question_text: QuestionText {
                text: question_text(payload, rng),
                starter_code: is_coding.then(|| STARTER_CODE.to_string()),
            },
            correct_answer: if is_coding {
                SAMPLE_SOLUTION.to_string()
            } else {
                String::new()
            },
            topic: payload.topic.clone(),
            explanation: Explanation {
                text: format!(
                    "This question tests {} implementation skills at {} level.",
                    payload.topic, payload.difficulty
                ),
            },
            images: ImageSet::default(),
            test_cases: if is_coding { default_test_cases() } else { vec![] },
            variant: variant_payload(question_type, rng),
        }
    }
}

fn question_text(payload: &GenerateQuestionsPayload, rng: &mut impl Rng) -> String {
    let prefixes = match payload.difficulty.as_str() {
        "easy" => EASY_PREFIXES,
        "hard" => HARD_PREFIXES,
        _ => MEDIUM_PREFIXES,
    };
    let prefix = prefixes.choose(rng).unwrap_or(&MEDIUM_PREFIXES[0]);
    match payload.subtopic.as_deref().filter(|s| !s.is_empty()) {
        Some(subtopic) => format!("{} the {} in context of {}.", prefix, subtopic, payload.topic),
        None => format!("{} the {}.", prefix, payload.topic),
    }
}

fn default_test_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            input: TestValue::Literal("example_input".to_string()),
            expected_output: TestValue::Literal("example_output".to_string()),
            description: "Default example test case".to_string(),
            is_default: true,
        },
        TestCase {
            input: TestValue::Structured(json!({"data": [1, 2, 3], "operation": "sum"})),
            expected_output: TestValue::Structured(json!(6)),
            description: "Basic operation test".to_string(),
            is_default: false,
        },
    ]
}

fn variant_payload(question_type: QuestionType, rng: &mut impl Rng) -> QuestionVariant {
    match question_type {
        QuestionType::Coding => QuestionVariant::Coding,
        QuestionType::Mcq => QuestionVariant::Mcq {
            options: choice_options(&["Option A", "Option B", "Option C", "Option D"]),
        },
        QuestionType::TrueFalse => QuestionVariant::TrueFalse {
            correct_option: rng.gen_bool(0.5),
        },
        QuestionType::CodeOutputMcq => QuestionVariant::CodeOutputMcq {
            code_snippet: CODE_SNIPPET.to_string(),
            output_options: choice_options(&[
                "Hello, World!\n0\n1\n2",
                "Hello, World!\n1\n2\n3",
                "Hello\n0\n1\n2",
                "Error",
            ]),
        },
    }
}

/// The first option is the correct one, mirroring the mock data source.
fn choice_options(texts: &[&str]) -> Vec<ChoiceOption> {
    texts
        .iter()
        .enumerate()
        .map(|(idx, text)| ChoiceOption {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            is_correct: idx == 0,
        })
        .collect()
}
