// src/models/mark.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One administrator-recorded exam result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkEntry {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    pub exam_name: String,

    /// Free text; `General` when left blank.
    pub subject: String,
    pub score: f64,
    pub total: f64,
    pub percentage: f64,
    #[serde(default)]
    pub remarks: String,

    /// Exam date when one was supplied, otherwise the upload time.
    pub recorded_at: DateTime<Utc>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Persisted marks document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarksDocument {
    /// Newest last.
    #[serde(default)]
    pub entries: Vec<MarkEntry>,
}

/// Admin marks upload form. Numbers arrive as text.
#[derive(Debug, Deserialize, Validate)]
pub struct MarkUploadForm {
    #[serde(default)]
    pub student_email: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Exam name is too long."))]
    pub exam_name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Subject is too long."))]
    pub subject: String,
    #[serde(default)]
    pub exam_date: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Remarks are too long."))]
    pub remarks: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub total: String,
}
