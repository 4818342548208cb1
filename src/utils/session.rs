// src/utils/session.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Request, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::user::User,
    state::AppState,
    utils::flash::{Flash, flash_redirect},
};

pub const SESSION_COOKIE: &str = "session";

/// Session token claims.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID.
    pub sub: String,
    /// Role at login time. Informational only: access checks always reload
    /// the user.
    pub role: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// The authenticated user, reloaded from the repository on every request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub fn now_unix() -> Result<u64, AppError> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs())
}

/// Signs a session token for the user.
pub fn sign_session(user: &User, secret: &str, ttl_secs: u64) -> Result<String, AppError> {
    let claims = Claims {
        sub: user.id.clone(),
        role: user.role().to_owned(),
        exp: (now_unix()? + ttl_secs) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a session token.
pub fn verify_session(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Authentication("Invalid session".to_string()))?;

    Ok(token_data.claims)
}

/// `Set-Cookie` value that stores the session token.
pub fn session_cookie(token: &str, ttl_secs: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, ttl_secs
    )
}

/// `Set-Cookie` value that removes a cookie.
pub fn expired_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

/// Reads a cookie value from the request headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Session token from the cookie, or from an `Authorization: Bearer` header.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    read_cookie(headers, SESSION_COOKIE).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
    })
}

/// Resolves the signed-in user, if any. Deleted users resolve to `None`.
pub async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Option<User> {
    let token = session_token(headers)?;
    let claims = verify_session(token, &state.config.session_secret).ok()?;
    state.users.find_by_id(&claims.sub).await
}

fn is_api_path(path: &str) -> bool {
    path.starts_with("/api/")
}

/// Axum Middleware: Authentication.
///
/// Resolves the session and injects `CurrentUser` into the request
/// extensions. Without a valid session, API paths get 401 JSON and pages are
/// redirected to the student login.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match resolve_user(&state, req.headers()).await {
        Some(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        None if is_api_path(req.uri().path()) => {
            AppError::Authentication("Authentication required".to_string()).into_response()
        }
        None => {
            let mut response = Redirect::to("/student-login").into_response();
            if let Ok(value) = HeaderValue::from_str(&expired_cookie(SESSION_COOKIE)) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            response
        }
    }
}

/// Axum Middleware: Admin Authorization.
///
/// Must be used AFTER `auth_middleware`. Checks the stored admin flag of the
/// reloaded user, so a demoted admin loses access on the next request.
pub async fn admin_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let is_admin = req
        .extensions()
        .get::<CurrentUser>()
        .is_some_and(|CurrentUser(user)| user.is_admin);

    if is_admin {
        return next.run(req).await;
    }

    if is_api_path(req.uri().path()) {
        return AppError::Authorization("Admin access only.".to_string()).into_response();
    }

    flash_redirect(&state.config, "/", Flash::error("Admin access only."))
}
