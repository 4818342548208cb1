// src/utils/flash.rs

//! One-shot status messages carried across a redirect.
//!
//! The message travels in a short-lived signed cookie and is consumed by the
//! next page view.

use axum::{
    http::{HeaderMap, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    utils::session::{expired_cookie, now_unix, read_cookie},
};

pub const FLASH_COOKIE: &str = "flash";

/// Flash cookies expire after this many seconds if never displayed.
const FLASH_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
struct FlashClaims {
    level: FlashLevel,
    message: String,
    exp: usize,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value carrying this message.
    pub fn to_cookie(&self, secret: &str) -> Result<String, AppError> {
        let claims = FlashClaims {
            level: self.level,
            message: self.message.clone(),
            exp: (now_unix()? + FLASH_TTL_SECS) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        Ok(format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            FLASH_COOKIE, token, FLASH_TTL_SECS
        ))
    }

    /// Reads the pending message, if any. Tampered or expired cookies are
    /// ignored.
    pub fn from_headers(headers: &HeaderMap, secret: &str) -> Option<Self> {
        let token = read_cookie(headers, FLASH_COOKIE)?;
        let data = decode::<FlashClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .ok()?;
        Some(Self {
            level: data.claims.level,
            message: data.claims.message,
        })
    }
}

/// Internal error details stay in the log; the visitor sees a generic line.
impl From<&AppError> for Flash {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::InternalServerError(_) => Flash::error("Something went wrong."),
            _ => Flash::error(err.message()),
        }
    }
}

/// Redirects to `to`, leaving `flash` for the next page.
pub fn flash_redirect(config: &Config, to: &str, flash: Flash) -> Response {
    flash_response(config, flash, Redirect::to(to))
}

/// Attaches `flash` to an arbitrary response.
pub fn flash_response(config: &Config, flash: Flash, inner: impl IntoResponse) -> Response {
    match flash.to_cookie(&config.session_secret) {
        Ok(cookie) => (AppendHeaders([(header::SET_COOKIE, cookie)]), inner).into_response(),
        Err(e) => {
            tracing::error!("Failed to encode flash message: {}", e);
            inner.into_response()
        }
    }
}

/// Redirects to `to` with a success flash carrying the returned message, or
/// an error flash carrying the error's message.
pub fn flash_outcome(config: &Config, to: &str, outcome: AppResult<String>) -> Response {
    let flash = match outcome {
        Ok(message) => Flash::success(message),
        Err(e) => {
            if matches!(e, AppError::InternalServerError(_)) {
                tracing::error!("Form action failed: {}", e);
            }
            Flash::from(&e)
        }
    };
    flash_redirect(config, to, flash)
}

/// Header that clears the flash cookie.
pub type ClearFlash = AppendHeaders<[(header::HeaderName, String); 1]>;

/// Consumes the pending message: returns it together with the header that
/// clears the cookie.
pub fn take_flash(config: &Config, headers: &HeaderMap) -> (Option<Flash>, ClearFlash) {
    let flash = Flash::from_headers(headers, &config.session_secret);
    (
        flash,
        AppendHeaders([(header::SET_COOKIE, expired_cookie(FLASH_COOKIE))]),
    )
}
