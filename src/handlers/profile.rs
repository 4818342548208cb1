// src/handlers/profile.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    error::AppError,
    models::user::UserSummary,
    services::{
        MarksStore,
        analytics::{student_analytics, student_results},
    },
    state::AppState,
    utils::{flash::take_flash, session::CurrentUser},
};

/// Student dashboard: account details, quiz analytics and exam results.
pub async fn profile(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let marks = state.marks.marks_for_user(&user.id).await?;
    let (flash, clear_flash) = take_flash(&state.config, &headers);

    Ok((
        clear_flash,
        Json(json!({
            "user": UserSummary::from(&user),
            "analytics": student_analytics(&user),
            "result_analytics": student_results(&marks),
            "flash": flash,
        })),
    ))
}

/// Quiz attempt analytics for the signed-in user.
pub async fn get_student_analytics(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> impl IntoResponse {
    Json(student_analytics(&user))
}

/// Exam marks summary for the signed-in user.
pub async fn get_student_results(
    State(marks): State<Arc<MarksStore>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let entries = marks.marks_for_user(&user.id).await?;
    Ok(Json(student_results(&entries)))
}
