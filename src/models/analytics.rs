// src/models/analytics.rs
//
// Response shapes of the analytics engine. All percentages are rounded to one
// decimal place; empty inputs produce the `Default` value of each struct.

use serde::Serialize;

use crate::models::{mark::MarkEntry, progress::Attempt};

/// Per-subject rollup of a student's own quiz attempts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectPerformance {
    /// Display title, e.g. "Mathematics".
    pub subject: String,
    pub attempts: u32,
    pub average: f64,
    pub best: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentAttempt {
    #[serde(flatten)]
    pub attempt: Attempt,
    pub attempted_at_display: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentAnalytics {
    pub total_quizzes: usize,
    pub total_questions: i64,
    pub total_correct: i64,
    pub avg_score: f64,
    pub overall_accuracy: f64,
    pub recent_attempts: Vec<RecentAttempt>,
    pub subject_performance: Vec<SubjectPerformance>,
}

/// Per-subject rollup of a student's recorded exam marks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSubjectSummary {
    pub subject: String,
    pub attempts: u32,
    pub average_percentage: f64,
    pub best_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentMark {
    #[serde(flatten)]
    pub entry: MarkEntry,
    pub recorded_at_display: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentResults {
    pub total_records: usize,
    pub average_percentage: f64,
    pub best_percentage: f64,
    pub total_scored: f64,
    pub total_possible: f64,
    pub subject_summary: Vec<StudentSubjectSummary>,
    pub recent_results: Vec<RecentMark>,
}

/// Per-subject rollup across every student's marks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminSubjectSummary {
    pub subject: String,
    pub records: u32,
    pub average_percentage: f64,
    pub best_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdminAnalytics {
    pub total_records: usize,
    pub unique_students: usize,
    pub overall_average: f64,
    pub subject_summary: Vec<AdminSubjectSummary>,
    pub recent_entries: Vec<RecentMark>,
}
