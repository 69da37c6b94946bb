use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Coding,
    Mcq,
    TrueFalse,
    CodeOutputMcq,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub question: Vec<String>,
    #[serde(default)]
    pub explanation: Vec<String>,
}

/// A test-case cell holds either the literal text the author typed or, when
/// that text parsed as JSON, the parsed value. The wire form is untagged so
/// both sides look exactly like the loosely-typed originals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestValue {
    Literal(String),
    Structured(JsonValue),
}

impl TestValue {
    /// Parse-or-fallback: valid JSON is stored structured, anything else is
    /// kept as the literal text. A JSON string literal collapses back to
    /// `Literal` since the two are indistinguishable on the wire.
    pub fn from_raw(raw: &str) -> Self {
        match serde_json::from_str::<JsonValue>(raw) {
            Ok(JsonValue::String(s)) => TestValue::Literal(s),
            Ok(value) => TestValue::Structured(value),
            Err(_) => TestValue::Literal(raw.to_string()),
        }
    }

    /// Text form shown in the form-mode cell.
    pub fn render(&self) -> String {
        match self {
            TestValue::Literal(s) => s.clone(),
            TestValue::Structured(v) => serde_json::to_string_pretty(v).unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TestValue::Literal(s) if s.is_empty())
    }
}

impl Default for TestValue {
    fn default() -> Self {
        TestValue::Literal(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub input: TestValue,
    #[serde(default)]
    pub expected_output: TestValue,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
}

impl TestCase {
    pub fn blank() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl ChoiceOption {
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: String::new(),
            is_correct: false,
        }
    }
}

/// Variant payload, discriminated by the `type` field on the wire. Exactly one
/// payload exists at a time, so switching type cannot leave stale fields
/// behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionVariant {
    Coding,
    Mcq {
        #[serde(default)]
        options: Vec<ChoiceOption>,
    },
    TrueFalse {
        correct_option: bool,
    },
    CodeOutputMcq {
        code_snippet: String,
        output_options: Vec<ChoiceOption>,
    },
}

impl QuestionVariant {
    pub fn fresh(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Coding => QuestionVariant::Coding,
            QuestionType::Mcq => QuestionVariant::Mcq { options: vec![] },
            QuestionType::TrueFalse => QuestionVariant::TrueFalse {
                correct_option: false,
            },
            QuestionType::CodeOutputMcq => QuestionVariant::CodeOutputMcq {
                code_snippet: String::new(),
                output_options: vec![],
            },
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionVariant::Coding => QuestionType::Coding,
            QuestionVariant::Mcq { .. } => QuestionType::Mcq,
            QuestionVariant::TrueFalse { .. } => QuestionType::TrueFalse,
            QuestionVariant::CodeOutputMcq { .. } => QuestionType::CodeOutputMcq,
        }
    }

    /// The option list for choice-bearing variants.
    pub fn options_mut(&mut self) -> Option<&mut Vec<ChoiceOption>> {
        match self {
            QuestionVariant::Mcq { options } => Some(options),
            QuestionVariant::CodeOutputMcq { output_options, .. } => Some(output_options),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub difficulty_level: String,
    pub question_text: QuestionText,
    pub correct_answer: String,
    pub topic: String,
    pub explanation: Explanation,
    #[serde(default)]
    pub images: ImageSet,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(flatten)]
    pub variant: QuestionVariant,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        self.variant.question_type()
    }

    /// Switching type discards the previous variant's payload entirely;
    /// common fields (text, topic, test cases, images) are untouched.
    pub fn set_question_type(&mut self, question_type: QuestionType) {
        if self.question_type() != question_type {
            self.variant = QuestionVariant::fresh(question_type);
        }
    }
}
