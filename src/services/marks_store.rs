// src/services/marks_store.rs

use std::path::Path;

use chrono::Utc;

use crate::{
    config::MARKS_STORE_CAP,
    error::{AppError, AppResult},
    models::{
        mark::{MarkEntry, MarksDocument},
        user::User,
    },
    repositories::UserRepository,
    utils::{
        json_file::{Document, JsonFile},
        time::parse_exam_date,
    },
};

pub const MARKS_FILE: &str = "marks_store.json";

impl Document for MarksDocument {}

/// Rounds to one decimal place, ties to even on the exact binary value
/// (`6.25` gives `6.2`, `6.35` gives `6.3` since it is stored just below).
pub fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// `round(100 * score / total, 1)`, or 0 when `total <= 0`.
pub fn percentage_from_marks(score: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    round1(score / total * 100.0)
}

/// Appends `item` and drops the oldest items beyond `cap`.
pub fn append_capped<T>(items: &mut Vec<T>, item: T, cap: usize) {
    items.push(item);
    if items.len() > cap {
        let excess = items.len() - cap;
        items.drain(..excess);
    }
}

/// An exam result submitted by an admin, before validation.
#[derive(Debug, Clone, Default)]
pub struct MarkRequest {
    pub student_email: String,
    pub exam_name: String,
    pub subject: String,
    pub score: f64,
    pub total: f64,
    pub remarks: String,
    pub exam_date: Option<String>,
}

impl MarkRequest {
    /// Checks the request fields that do not depend on the student lookup.
    pub fn validate_fields(&self) -> AppResult<()> {
        if !self.score.is_finite() || !self.total.is_finite() {
            return Err(AppError::Validation(
                "Score and total must be numeric.".to_string(),
            ));
        }
        if self.student_email.trim().is_empty()
            || self.exam_name.trim().is_empty()
            || self.total <= 0.0
        {
            return Err(AppError::Validation(
                "Student email, exam name, and total marks are required.".to_string(),
            ));
        }
        if self.score < 0.0 || self.score > self.total {
            return Err(AppError::Validation(
                "Score must be between 0 and total marks.".to_string(),
            ));
        }
        Ok(())
    }

    fn into_entry(self, student: &User, uploaded_by: &str) -> MarkEntry {
        let now = Utc::now();
        let recorded_at = self
            .exam_date
            .as_deref()
            .and_then(parse_exam_date)
            .unwrap_or(now);
        let subject = match self.subject.trim() {
            "" => "General".to_string(),
            s => s.to_string(),
        };
        let hex = uuid::Uuid::new_v4().simple().to_string();

        MarkEntry {
            id: format!("mark-{}", &hex[..12]),
            student_id: student.id.clone(),
            student_name: student.username.clone(),
            student_email: student.email.clone(),
            exam_name: self.exam_name.trim().to_string(),
            subject,
            score: round1(self.score),
            total: round1(self.total),
            percentage: percentage_from_marks(self.score, self.total),
            remarks: self.remarks.trim().to_string(),
            recorded_at,
            uploaded_by: uploaded_by.to_string(),
            uploaded_at: now,
        }
    }
}

/// Bounded log of admin-recorded exam marks, persisted as one JSON document.
#[derive(Debug)]
pub struct MarksStore {
    file: JsonFile,
}

impl MarksStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: JsonFile::new(data_dir.join(MARKS_FILE)),
        }
    }

    /// All entries, oldest first.
    pub async fn entries(&self) -> AppResult<Vec<MarkEntry>> {
        let doc: MarksDocument = self.file.load().await?;
        Ok(doc.entries)
    }

    /// Entries recorded for one student, newest `recorded_at` first.
    pub async fn marks_for_user(&self, user_id: &str) -> AppResult<Vec<MarkEntry>> {
        let mut entries: Vec<MarkEntry> = self
            .entries()
            .await?
            .into_iter()
            .filter(|e| e.student_id == user_id)
            .collect();
        entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(entries)
    }

    /// Validates and appends a mark entry for a student account.
    pub async fn record_mark(
        &self,
        users: &dyn UserRepository,
        request: MarkRequest,
        uploaded_by: &str,
    ) -> AppResult<MarkEntry> {
        request.validate_fields()?;

        let student = users
            .find_by_email(&request.student_email)
            .await
            .ok_or_else(|| AppError::NotFound("Student not found for provided email.".to_string()))?;

        if student.is_admin {
            return Err(AppError::Validation(
                "Marks can only be uploaded for student accounts.".to_string(),
            ));
        }

        let entry = request.into_entry(&student, uploaded_by);
        self.append(entry.clone()).await?;

        tracing::info!(
            "Recorded mark {} for student {} ({}%)",
            entry.id,
            entry.student_id,
            entry.percentage
        );
        Ok(entry)
    }

    /// Appends an already-built entry, evicting the oldest past the cap.
    pub async fn append(&self, entry: MarkEntry) -> AppResult<()> {
        self.file
            .update(|doc: &mut MarksDocument| {
                append_capped(&mut doc.entries, entry, MARKS_STORE_CAP);
                Ok(((), true))
            })
            .await
    }
}
