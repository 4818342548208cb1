// src/handlers/pages.rs

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    models::user::UserSummary,
    state::AppState,
    utils::{flash::take_flash, session::resolve_user},
};

/// Landing page: the subject catalogue with each quiz's status.
///
/// Public; the signed-in user, if any, is included for the navigation bar.
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let (flash, clear_flash) = take_flash(&state.config, &headers);
    let user = resolve_user(&state, &headers).await;

    let subjects: Vec<_> = state
        .quiz_gate
        .statuses()
        .await
        .into_iter()
        .map(|(subject, enabled)| {
            json!({
                "key": subject.key(),
                "title": subject.title(),
                "enabled": enabled,
            })
        })
        .collect();

    (
        clear_flash,
        Json(json!({
            "subjects": subjects,
            "user": user.as_ref().map(UserSummary::from),
            "flash": flash,
        })),
    )
}
