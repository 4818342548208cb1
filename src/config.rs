// src/config.rs

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

/// Number of mark entries kept in the marks document.
pub const MARKS_STORE_CAP: usize = 2000;

/// Number of quiz attempts kept per user.
pub const ATTEMPTS_PER_USER_CAP: usize = 200;

/// Recent rows shown on the student dashboards.
pub const STUDENT_RECENT_LIMIT: usize = 8;

/// Recent rows shown on the admin dashboard.
pub const ADMIN_RECENT_LIMIT: usize = 12;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted JSON documents.
    pub data_dir: PathBuf,
    pub session_secret: String,
    pub session_ttl_secs: u64,
    pub rust_log: String,
    pub log_dir: String,
    pub bind_addr: String,

    /// Emails that receive the admin role when they register.
    pub admin_emails: HashSet<String>,

    pub default_admin_email: String,
    pub default_admin_password: String,

    /// Optional demo student seeded at startup.
    pub demo_user_email: Option<String>,
    pub demo_user_password: Option<String>,

    /// Refuses user and quiz-gate changes from the admin dashboard.
    pub admin_view_only: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let session_secret = env::var("SESSION_SECRET")
            .expect("SESSION_SECRET must be set");

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("instance"));

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let admin_emails = env::var("ADMIN_EMAILS")
            .map(|raw| parse_email_list(&raw))
            .unwrap_or_default();

        let default_admin_email = env::var("DEFAULT_ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@schoollearn.com".to_string())
            .to_lowercase();
        let default_admin_password =
            env::var("DEFAULT_ADMIN_PASSWORD").unwrap_or_else(|_| "Admin@123".to_string());

        Self {
            data_dir,
            session_secret,
            session_ttl_secs,
            rust_log,
            log_dir,
            bind_addr,
            admin_emails,
            default_admin_email,
            default_admin_password,
            demo_user_email: env::var("DEMO_USER_EMAIL").ok().map(|e| e.to_lowercase()),
            demo_user_password: env::var("DEMO_USER_PASSWORD").ok(),
            admin_view_only: env::var("ADMIN_VIEW_ONLY")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Whether a (lowercased) email is on the admin allow-list.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.contains(email)
    }
}

/// Splits a comma-separated list of emails, normalized to lowercase.
pub fn parse_email_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}
