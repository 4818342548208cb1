// src/services/progress.rs

use chrono::Utc;

use crate::{
    config::ATTEMPTS_PER_USER_CAP,
    error::{AppError, AppResult},
    models::{
        progress::{Attempt, Progress},
        subject::Subject,
        user::User,
    },
    repositories::UserRepository,
    services::marks_store::{append_capped, round1},
};

/// Builds an attempt record. The score is clamped into `[0, total_questions]`.
pub fn new_attempt(subject: Subject, score: i64, total_questions: i64) -> AppResult<Attempt> {
    if total_questions <= 0 {
        return Err(AppError::Validation(
            "total_questions must be greater than 0".to_string(),
        ));
    }

    let score = score.clamp(0, total_questions);
    let hex = uuid::Uuid::new_v4().simple().to_string();

    Ok(Attempt {
        id: format!("attempt-{}", &hex[..12]),
        subject,
        subject_title: subject.title().to_string(),
        score,
        total_questions,
        percentage: round1(score as f64 / total_questions as f64 * 100.0),
        attempted_at: Utc::now(),
    })
}

/// Appends an attempt and refreshes the subject summary.
pub fn apply_attempt(progress: &mut Progress, attempt: Attempt) {
    let summary = progress.by_subject.entry(attempt.subject).or_default();
    summary.attempts += 1;
    summary.best = summary.best.max(attempt.percentage);
    summary.latest = attempt.percentage;

    append_capped(&mut progress.attempts, attempt, ATTEMPTS_PER_USER_CAP);
}

/// Records a self-service quiz submission on the user's progress.
pub async fn record_attempt(
    users: &dyn UserRepository,
    user: &User,
    subject: Subject,
    score: i64,
    total_questions: i64,
) -> AppResult<Attempt> {
    let attempt = new_attempt(subject, score, total_questions)?;

    let stored = attempt.clone();
    users
        .update(&user.id, Box::new(move |u: &mut User| apply_attempt(&mut u.progress, stored)))
        .await?;

    tracing::info!(
        "User {} scored {}/{} in {}",
        user.id,
        attempt.score,
        attempt.total_questions,
        subject
    );
    Ok(attempt)
}
