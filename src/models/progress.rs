// src/models/progress.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::subject::Subject;

/// One self-service quiz submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: String,
    pub subject: Subject,
    pub subject_title: String,
    pub score: i64,
    pub total_questions: i64,
    pub percentage: f64,
    pub attempted_at: DateTime<Utc>,
}

/// Running summary for one subject, updated on every attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub attempts: u32,
    pub best: f64,
    pub latest: f64,
}

/// Per-user progress record nested in the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Oldest first; trimmed from the front.
    pub attempts: Vec<Attempt>,
    pub by_subject: BTreeMap<Subject, SubjectProgress>,
}

/// JSON body of `POST /api/quiz/progress`.
///
/// Score fields are kept loose: numbers, numeric strings and missing values
/// are all accepted and coerced by [`QuizProgressRequest::score`] and
/// [`QuizProgressRequest::total_questions`].
#[derive(Debug, Default, Deserialize)]
pub struct QuizProgressRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub score: Value,
    #[serde(default)]
    pub total_questions: Value,
}

impl QuizProgressRequest {
    pub fn score(&self) -> Option<i64> {
        loose_int(&self.score)
    }

    pub fn total_questions(&self) -> Option<i64> {
        loose_int(&self.total_questions)
    }
}

/// Coerces a JSON value to an integer. Missing values count as zero.
fn loose_int(value: &Value) -> Option<i64> {
    match value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}
