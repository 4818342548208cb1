// src/handlers/auth.rs

use axum::{
    Extension, Form, Json,
    extract::State,
    http::{HeaderMap, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginForm, RegisterForm, User},
    services::accounts::{self, LoginMode},
    state::AppState,
    utils::{
        flash::{Flash, flash_response, take_flash},
        session::{CurrentUser, SESSION_COOKIE, expired_cookie, session_cookie, sign_session},
    },
};

fn login_view(mode: LoginMode) -> Value {
    let login_mode = match mode {
        LoginMode::Student => "student",
        LoginMode::Admin => "admin",
    };
    json!({ "page": "login", "login_mode": login_mode })
}

fn register_view() -> Value {
    json!({ "page": "register" })
}

/// Renders a form page again with the error as its flash, under the error's
/// status code.
fn rejected(err: AppError, mut view: Value) -> Response {
    if matches!(err, AppError::InternalServerError(_)) {
        return err.into_response();
    }
    view["flash"] = json!(Flash::from(&err));
    (err.status(), Json(view)).into_response()
}

fn page(config: &Config, headers: &HeaderMap, mut view: Value) -> Response {
    let (flash, clear_flash) = take_flash(config, headers);
    view["flash"] = json!(flash);
    (clear_flash, Json(view)).into_response()
}

/// Signs a session for `user` and redirects to `to` with a success flash.
fn signed_in(config: &Config, user: &User, to: &str, message: &str) -> Response {
    let token = match sign_session(user, &config.session_secret, config.session_ttl_secs) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };
    let cookie = session_cookie(&token, config.session_ttl_secs);

    flash_response(
        config,
        Flash::success(message),
        (
            AppendHeaders([(header::SET_COOKIE, cookie)]),
            Redirect::to(to),
        ),
    )
}

async fn login(state: &AppState, form: LoginForm, mode: LoginMode) -> Response {
    let email = form.email.trim();
    match accounts::authenticate(state.users.as_ref(), email, &form.password, mode).await {
        Ok(user) => {
            tracing::info!("User {} logged in as {}", user.id, user.role());
            match mode {
                LoginMode::Student => {
                    signed_in(&state.config, &user, "/profile", "Logged in successfully.")
                }
                LoginMode::Admin => {
                    signed_in(&state.config, &user, "/admin", "Admin login successful.")
                }
            }
        }
        Err(e) => {
            tracing::warn!("Rejected {:?} login for {}: {}", mode, email, e.message());
            rejected(e, login_view(mode))
        }
    }
}

/// Student login page. Also served at `/login`.
pub async fn student_login_page(State(config): State<Config>, headers: HeaderMap) -> Response {
    page(&config, &headers, login_view(LoginMode::Student))
}

pub async fn admin_login_page(State(config): State<Config>, headers: HeaderMap) -> Response {
    page(&config, &headers, login_view(LoginMode::Admin))
}

/// Authenticates through the student form.
///
/// Admin accounts are refused here with 403 and pointed at the admin form.
pub async fn student_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    login(&state, form, LoginMode::Student).await
}

/// Authenticates through the admin form. Student accounts get 403.
pub async fn admin_login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    login(&state, form, LoginMode::Admin).await
}

pub async fn register_page(State(config): State<Config>, headers: HeaderMap) -> Response {
    page(&config, &headers, register_view())
}

/// Registers a new account and signs it in.
///
/// Returns 400 for missing fields or mismatched passwords and 409 when the
/// email is taken.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    match accounts::register(state.users.as_ref(), &state.config, &form).await {
        Ok(user) => signed_in(&state.config, &user, "/profile", "Registration successful."),
        Err(e) => rejected(e, register_view()),
    }
}

/// Ends the session and returns to the landing page.
pub async fn logout(
    State(config): State<Config>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Response {
    tracing::info!("User {} logged out", user.id);
    flash_response(
        &config,
        Flash::success("You have been logged out."),
        (
            AppendHeaders([(header::SET_COOKIE, expired_cookie(SESSION_COOKIE))]),
            Redirect::to("/"),
        ),
    )
}
