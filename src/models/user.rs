// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::progress::Progress;

/// A student or admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    /// Display name entered at registration.
    pub username: String,

    /// Unique, stored lowercased.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password_hash: String,

    pub is_admin: bool,
    pub grade: String,
    pub school: String,
    pub joined_at: DateTime<Utc>,

    #[serde(default)]
    pub progress: Progress,
}

impl User {
    pub fn role(&self) -> &'static str {
        if self.is_admin { "admin" } else { "student" }
    }
}

/// Public projection of a user for dashboards and listings.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: &'static str,
    pub is_admin: bool,
    pub grade: String,
    pub school: String,
    pub joined_at: DateTime<Utc>,
    pub quiz_attempts: usize,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role(),
            is_admin: user.is_admin,
            grade: user.grade.clone(),
            school: user.school.clone(),
            joined_at: user.joined_at,
            quiz_attempts: user.progress.attempts.len(),
        }
    }
}

/// Registration form. Field names follow the HTML form.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default, rename = "fullName")]
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub full_name: String,
    #[serde(default)]
    #[validate(length(max = 254, message = "Email is too long."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub grade: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub school: String,
    #[serde(default)]
    #[validate(length(max = 128, message = "Password must be at most 128 characters."))]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Login form, shared by the student and admin login pages.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
