// src/handlers/admin.rs

use std::sync::Arc;

use axum::{
    Extension, Form, Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use validator::Validate;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        mark::MarkUploadForm,
        question::{AddQuestionForm, DeleteQuestionForm, QuestionSource},
        subject::Subject,
        user::{User, UserSummary},
    },
    services::{MarksStore, analytics::admin_analytics, marks_store::MarkRequest},
    state::AppState,
    utils::{
        flash::{Flash, flash_outcome, flash_redirect, take_flash},
        session::CurrentUser,
    },
};

const DASHBOARD: &str = "/admin";

fn dashboard_for(subject: Subject) -> String {
    format!("{}?subject={}", DASHBOARD, subject.key())
}

/// Refuses dashboard changes while the admin dashboard is read-only.
fn ensure_writable(config: &Config) -> AppResult<()> {
    if config.admin_view_only {
        return Err(AppError::Authorization(
            "Admin dashboard is in view-only mode.".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub subject: Option<String>,
}

/// Admin dashboard: users, question banks, quiz status and results.
///
/// `?subject=` picks the bank listed for editing; unknown or missing values
/// fall back to math.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let selected = query
        .subject
        .as_deref()
        .and_then(Subject::parse)
        .unwrap_or(Subject::Math);

    let users: Vec<UserSummary> = state
        .users
        .find_all()
        .await
        .iter()
        .map(UserSummary::from)
        .collect();

    let counts = state.questions.question_counts().await?;
    let total_questions: usize = counts.iter().map(|(_, n)| n).sum();
    let quiz_counts: Vec<Value> = counts
        .into_iter()
        .map(|(subject, count)| {
            json!({ "subject": subject.key(), "title": subject.title(), "count": count })
        })
        .collect();

    let quiz_status: Map<String, Value> = state
        .quiz_gate
        .statuses()
        .await
        .into_iter()
        .map(|(subject, enabled)| (subject.key().to_string(), Value::Bool(enabled)))
        .collect();

    let subjects: Vec<Value> = Subject::ALL
        .iter()
        .map(|s| json!({ "key": s.key(), "title": s.title() }))
        .collect();

    let selected_questions = state.questions.merged_questions(selected).await?;
    let entries = state.marks.entries().await?;
    let (flash, clear_flash) = take_flash(&state.config, &headers);

    Ok((
        clear_flash,
        Json(json!({
            "users": users,
            "quiz_counts": quiz_counts,
            "total_questions": total_questions,
            "quiz_status": quiz_status,
            "view_only": state.config.admin_view_only,
            "subjects": subjects,
            "selected_subject": selected.key(),
            "selected_subject_questions": selected_questions,
            "result_analytics": admin_analytics(&entries),
            "flash": flash,
        })),
    ))
}

/// Results summary across all students, as JSON.
pub async fn get_admin_analytics(
    State(marks): State<Arc<MarksStore>>,
) -> Result<impl IntoResponse, AppError> {
    let entries = marks.entries().await?;
    Ok(Json(admin_analytics(&entries)))
}

/// Numeric form fields arrive as text; anything unparseable is NaN and
/// rejected by the mark validation.
fn parse_number(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

async fn record_uploaded_mark(
    state: &AppState,
    admin: &User,
    form: MarkUploadForm,
) -> AppResult<String> {
    form.validate()?;

    let exam_date = form.exam_date.trim();
    let request = MarkRequest {
        student_email: form.student_email.trim().to_lowercase(),
        score: parse_number(&form.score),
        total: parse_number(&form.total),
        exam_date: (!exam_date.is_empty()).then(|| exam_date.to_string()),
        exam_name: form.exam_name,
        subject: form.subject,
        remarks: form.remarks,
    };

    state
        .marks
        .record_mark(state.users.as_ref(), request, &admin.email)
        .await?;
    Ok("Marks uploaded successfully.".to_string())
}

/// Records an exam mark for a student account.
pub async fn upload_marks(
    State(state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Form(form): Form<MarkUploadForm>,
) -> Response {
    let outcome = record_uploaded_mark(&state, &admin, form).await;
    flash_outcome(&state.config, DASHBOARD, outcome)
}

async fn remove_user(state: &AppState, admin: &User, user_id: &str) -> AppResult<String> {
    ensure_writable(&state.config)?;

    if user_id == admin.id {
        return Err(AppError::Authorization(
            "You cannot delete your own admin account.".to_string(),
        ));
    }

    state.users.delete(user_id).await?;
    tracing::info!("Admin {} deleted user {}", admin.id, user_id);
    Ok("User deleted.".to_string())
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(user_id): Path<String>,
) -> Response {
    let outcome = remove_user(&state, &admin, &user_id).await;
    flash_outcome(&state.config, DASHBOARD, outcome)
}

async fn flip_admin_role(state: &AppState, admin: &User, user_id: &str) -> AppResult<String> {
    ensure_writable(&state.config)?;

    let target = state
        .users
        .find_by_id(user_id)
        .await
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    if target.id == admin.id {
        return Err(AppError::Authorization(
            "You cannot change your own admin role.".to_string(),
        ));
    }

    let updated = state
        .users
        .update(&target.id, Box::new(|u: &mut User| u.is_admin = !u.is_admin))
        .await?;
    tracing::info!(
        "Admin {} changed user {} to {}",
        admin.id,
        updated.id,
        updated.role()
    );
    Ok("User role updated.".to_string())
}

/// Promotes a student or demotes an admin. Admins cannot change themselves.
pub async fn toggle_admin(
    State(state): State<AppState>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(user_id): Path<String>,
) -> Response {
    let outcome = flip_admin_role(&state, &admin, &user_id).await;
    flash_outcome(&state.config, DASHBOARD, outcome)
}

#[derive(Debug, Deserialize)]
pub struct ToggleQuizForm {
    /// `"1"` enables the quiz; any other value disables it.
    #[serde(default)]
    pub enabled: String,
}

async fn set_quiz_status(state: &AppState, subject: &str, enabled: bool) -> AppResult<String> {
    ensure_writable(&state.config)?;

    let subject = Subject::parse(subject)
        .ok_or_else(|| AppError::Validation("Invalid subject.".to_string()))?;
    state.quiz_gate.set_quiz_enabled(subject, enabled).await;
    Ok(format!("Quiz status for {} updated.", subject.title()))
}

pub async fn toggle_quiz(
    State(state): State<AppState>,
    Path(subject): Path<String>,
    Form(form): Form<ToggleQuizForm>,
) -> Response {
    let outcome = set_quiz_status(&state, &subject, form.enabled.trim() == "1").await;
    flash_outcome(&state.config, DASHBOARD, outcome)
}

async fn create_question(
    state: &AppState,
    subject: Subject,
    form: &AddQuestionForm,
) -> AppResult<String> {
    form.validate()?;
    state
        .questions
        .add_custom_question(
            subject,
            &form.question,
            form.options(),
            form.answer_index(),
            &form.explanation,
        )
        .await?;
    Ok("Question added successfully.".to_string())
}

/// Adds a custom question to a subject's bank.
pub async fn add_question(
    State(state): State<AppState>,
    Form(form): Form<AddQuestionForm>,
) -> Response {
    let Some(subject) = Subject::parse(&form.subject) else {
        return flash_redirect(&state.config, DASHBOARD, Flash::error("Invalid subject."));
    };

    let outcome = create_question(&state, subject, &form).await;
    flash_outcome(&state.config, &dashboard_for(subject), outcome)
}

/// Removes a custom question or hides a base one.
pub async fn delete_question(
    State(state): State<AppState>,
    Form(form): Form<DeleteQuestionForm>,
) -> Response {
    let subject = Subject::parse(&form.subject);
    let source = QuestionSource::parse(&form.source);
    let qid = form.qid.trim();

    let (Some(subject), Some(source)) = (subject, source) else {
        return flash_redirect(&state.config, DASHBOARD, Flash::error("Invalid request."));
    };
    if qid.is_empty() {
        return flash_redirect(&state.config, DASHBOARD, Flash::error("Invalid request."));
    }

    let outcome = state
        .questions
        .delete_question(subject, qid, source)
        .await
        .map(|()| "Question deleted successfully.".to_string());
    flash_outcome(&state.config, &dashboard_for(subject), outcome)
}
