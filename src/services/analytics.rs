// src/services/analytics.rs

//! Aggregate statistics over quiz attempts and exam marks.
//!
//! Everything is recomputed per request; nothing here is cached.

use std::collections::HashSet;

use crate::{
    config::{ADMIN_RECENT_LIMIT, STUDENT_RECENT_LIMIT},
    models::{
        analytics::{
            AdminAnalytics, AdminSubjectSummary, RecentAttempt, RecentMark, StudentAnalytics,
            StudentResults, StudentSubjectSummary, SubjectPerformance,
        },
        mark::MarkEntry,
        progress::Attempt,
        user::User,
    },
    services::marks_store::round1,
    utils::time::display_timestamp,
};

/// Running totals for one subject, in first-seen order.
struct Rollup {
    subject: String,
    count: u32,
    total: f64,
    best: f64,
}

impl Rollup {
    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            round1(self.total / self.count as f64)
        }
    }
}

fn rollup<'a>(rows: impl Iterator<Item = (&'a str, f64)>) -> Vec<Rollup> {
    let mut out: Vec<Rollup> = Vec::new();
    for (subject, pct) in rows {
        let index = match out.iter().position(|r| r.subject == subject) {
            Some(i) => i,
            None => {
                out.push(Rollup {
                    subject: subject.to_string(),
                    count: 0,
                    total: 0.0,
                    best: 0.0,
                });
                out.len() - 1
            }
        };
        let row = &mut out[index];
        row.count += 1;
        row.total += pct;
        row.best = row.best.max(pct);
    }
    out
}

/// Stable sort, highest value first.
fn sort_desc_by<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { round1(sum / n as f64) }
}

/// Summary of a student's own quiz attempts.
pub fn student_analytics(user: &User) -> StudentAnalytics {
    let mut attempts: Vec<&Attempt> = user.progress.attempts.iter().collect();
    if attempts.is_empty() {
        return StudentAnalytics::default();
    }
    attempts.sort_by(|a, b| b.attempted_at.cmp(&a.attempted_at));

    let total_questions: i64 = attempts.iter().map(|a| a.total_questions).sum();
    let total_correct: i64 = attempts.iter().map(|a| a.score).sum();
    let overall_accuracy = if total_questions > 0 {
        round1(total_correct as f64 / total_questions as f64 * 100.0)
    } else {
        0.0
    };

    let mut subject_performance: Vec<SubjectPerformance> =
        rollup(attempts.iter().map(|a| (a.subject.title(), a.percentage)))
            .into_iter()
            .map(|r| SubjectPerformance {
                average: r.average(),
                best: round1(r.best),
                attempts: r.count,
                subject: r.subject,
            })
            .collect();
    sort_desc_by(&mut subject_performance, |s| s.average);

    let recent_attempts = attempts
        .iter()
        .take(STUDENT_RECENT_LIMIT)
        .map(|a| RecentAttempt {
            attempted_at_display: display_timestamp(&a.attempted_at),
            attempt: (*a).clone(),
        })
        .collect();

    StudentAnalytics {
        total_quizzes: attempts.len(),
        total_questions,
        total_correct,
        avg_score: mean(attempts.iter().map(|a| a.percentage)),
        overall_accuracy,
        recent_attempts,
        subject_performance,
    }
}

/// Summary of the exam marks recorded for one student.
///
/// `entries` must already be filtered to the student.
pub fn student_results(entries: &[MarkEntry]) -> StudentResults {
    if entries.is_empty() {
        return StudentResults::default();
    }
    let mut entries: Vec<&MarkEntry> = entries.iter().collect();
    entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

    let best = entries
        .iter()
        .map(|e| e.percentage)
        .fold(f64::MIN, f64::max);

    let mut subject_summary: Vec<StudentSubjectSummary> =
        rollup(entries.iter().map(|e| (e.subject.as_str(), e.percentage)))
            .into_iter()
            .map(|r| StudentSubjectSummary {
                average_percentage: r.average(),
                best_percentage: round1(r.best),
                attempts: r.count,
                subject: r.subject,
            })
            .collect();
    sort_desc_by(&mut subject_summary, |s| s.average_percentage);

    StudentResults {
        total_records: entries.len(),
        average_percentage: mean(entries.iter().map(|e| e.percentage)),
        best_percentage: round1(best),
        total_scored: round1(entries.iter().map(|e| e.score).sum()),
        total_possible: round1(entries.iter().map(|e| e.total).sum()),
        subject_summary,
        recent_results: recent_marks(&entries, STUDENT_RECENT_LIMIT),
    }
}

/// Global summary across every recorded mark.
pub fn admin_analytics(entries: &[MarkEntry]) -> AdminAnalytics {
    if entries.is_empty() {
        return AdminAnalytics::default();
    }
    let mut entries: Vec<&MarkEntry> = entries.iter().collect();
    entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

    let unique_students = entries
        .iter()
        .map(|e| e.student_id.as_str())
        .filter(|id| !id.is_empty())
        .collect::<HashSet<_>>()
        .len();

    let mut subject_summary: Vec<AdminSubjectSummary> =
        rollup(entries.iter().map(|e| (e.subject.as_str(), e.percentage)))
            .into_iter()
            .map(|r| AdminSubjectSummary {
                average_percentage: r.average(),
                best_percentage: round1(r.best),
                records: r.count,
                subject: r.subject,
            })
            .collect();
    sort_desc_by(&mut subject_summary, |s| s.average_percentage);

    AdminAnalytics {
        total_records: entries.len(),
        unique_students,
        overall_average: mean(entries.iter().map(|e| e.percentage)),
        subject_summary,
        recent_entries: recent_marks(&entries, ADMIN_RECENT_LIMIT),
    }
}

fn recent_marks(entries: &[&MarkEntry], limit: usize) -> Vec<RecentMark> {
    entries
        .iter()
        .take(limit)
        .map(|e| RecentMark {
            recorded_at_display: display_timestamp(&e.recorded_at),
            entry: (*e).clone(),
        })
        .collect()
}
