// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::AppError,
    models::{progress::QuizProgressRequest, subject::Subject},
    services::progress::record_attempt,
    state::AppState,
    utils::{
        flash::{Flash, flash_redirect},
        session::CurrentUser,
    },
};

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    /// Return a random sample of at most this many questions. Kept as text so
    /// a malformed value is answered with the usual JSON error body.
    pub count: Option<String>,
}

impl QuestionsQuery {
    fn sample_size(&self) -> Result<Option<usize>, AppError> {
        match self.count.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                AppError::Validation("count must be a non-negative integer".to_string())
            }),
        }
    }
}

/// Serves the merged question list for a subject.
///
/// Unknown subjects and malformed `count` values get 400, disabled subjects
/// 403. Storage failures are reported with their message rather than masked.
pub async fn get_questions(
    State(state): State<AppState>,
    Path(subject): Path<String>,
    Query(query): Query<QuestionsQuery>,
) -> Response {
    let Some(subject) = Subject::parse(&subject) else {
        return AppError::Validation("Invalid subject".to_string()).into_response();
    };

    if !state.quiz_gate.quiz_enabled(subject).await {
        return AppError::Authorization("This quiz is disabled by admin".to_string())
            .into_response();
    }

    let sample_size = match query.sample_size() {
        Ok(size) => size,
        Err(e) => return e.into_response(),
    };

    let questions = match sample_size {
        Some(count) => state.questions.sample_questions(subject, count).await,
        None => state.questions.merged_questions(subject).await,
    };

    match questions {
        Ok(questions) => Json(questions).into_response(),
        Err(e) => {
            tracing::error!("Failed to load {} questions: {}", subject, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.message() })),
            )
                .into_response()
        }
    }
}

/// Quiz page for one subject. Unknown subjects are 404; disabled ones send
/// the visitor back to the landing page.
pub async fn quiz_page(State(state): State<AppState>, Path(subject): Path<String>) -> Response {
    let Some(subject) = Subject::parse(&subject) else {
        return AppError::NotFound("Invalid subject".to_string()).into_response();
    };

    if !state.quiz_gate.quiz_enabled(subject).await {
        return flash_redirect(
            &state.config,
            "/",
            Flash::error("This quiz is currently disabled by admin."),
        );
    }

    Json(json!({
        "subject": subject.key(),
        "subject_title": subject.title(),
    }))
    .into_response()
}

/// Records a finished quiz for the signed-in user.
///
/// The body is read leniently: anything that is not a JSON object is treated
/// as an empty payload and fails subject validation.
pub async fn save_quiz_progress(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let payload: QuizProgressRequest = serde_json::from_slice(&body).unwrap_or_default();

    let subject = Subject::parse(&payload.subject)
        .ok_or_else(|| AppError::Validation("Invalid subject".to_string()))?;

    let (Some(score), Some(total_questions)) = (payload.score(), payload.total_questions()) else {
        return Err(AppError::Validation("Invalid score payload".to_string()));
    };

    let attempt = record_attempt(state.users.as_ref(), &user, subject, score, total_questions).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Quiz progress saved",
            "attempt": attempt,
        })),
    ))
}
