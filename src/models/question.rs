// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A compiled-in question as exposed by a subject provider.
#[derive(Debug, Clone, Copy)]
pub struct BaseQuestion {
    pub question: &'static str,
    pub options: [&'static str; OPTION_COUNT],
    pub answer: usize,
    pub explanation: &'static str,
}

/// The question body shared by base and custom questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,

    /// Zero-based index into `options`.
    pub answer: usize,

    #[serde(default)]
    pub explanation: String,
}

impl From<&BaseQuestion> for Question {
    fn from(base: &BaseQuestion) -> Self {
        Self {
            question: base.question.to_string(),
            options: base.options.iter().map(|o| o.to_string()).collect(),
            answer: base.answer,
            explanation: base.explanation.to_string(),
        }
    }
}

/// An admin-added question as persisted in the override document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomQuestion {
    #[serde(rename = "_qid")]
    pub qid: String,
    #[serde(flatten)]
    pub body: Question,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    Base,
    Custom,
}

impl QuestionSource {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "base" => Some(QuestionSource::Base),
            "custom" => Some(QuestionSource::Custom),
            _ => None,
        }
    }
}

/// A question as served to quiz takers, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedQuestion {
    #[serde(rename = "_qid")]
    pub qid: String,
    #[serde(rename = "_source")]
    pub source: QuestionSource,
    #[serde(flatten)]
    pub body: Question,
}

/// Admin form for adding a custom question.
#[derive(Debug, Deserialize, Validate)]
pub struct AddQuestionForm {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Question text is too long."))]
    pub question: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Option text is too long."))]
    pub option_a: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Option text is too long."))]
    pub option_b: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Option text is too long."))]
    pub option_c: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Option text is too long."))]
    pub option_d: String,
    /// Kept as text: a non-numeric value is reported as an invalid option.
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Explanation is too long."))]
    pub explanation: String,
}

impl AddQuestionForm {
    pub fn options(&self) -> [&str; OPTION_COUNT] {
        [&self.option_a, &self.option_b, &self.option_c, &self.option_d]
    }

    /// Parsed answer index; `-1` when the field is not an integer.
    pub fn answer_index(&self) -> i64 {
        self.answer.trim().parse().unwrap_or(-1)
    }
}

/// Admin form for deleting a base or custom question.
#[derive(Debug, Deserialize)]
pub struct DeleteQuestionForm {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub qid: String,
    #[serde(default)]
    pub source: String,
}
