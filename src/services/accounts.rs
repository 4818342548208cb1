// src/services/accounts.rs

use validator::Validate;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::user::{RegisterForm, User},
    repositories::{NewUser, UserRepository},
    utils::password::{hash_password, verify_password},
};

/// Which login form the credentials were submitted through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    Student,
    Admin,
}

/// Checks credentials and that the account matches the login form.
pub async fn authenticate(
    users: &dyn UserRepository,
    email: &str,
    password: &str,
    mode: LoginMode,
) -> AppResult<User> {
    let user = users
        .find_by_email(email)
        .await
        .filter(|user| verify_password(password, &user.password_hash))
        .ok_or_else(|| AppError::Authentication("Invalid email or password.".to_string()))?;

    match (mode, user.is_admin) {
        (LoginMode::Student, true) => Err(AppError::Authorization(
            "This account is admin. Use Admin Login.".to_string(),
        )),
        (LoginMode::Admin, false) => {
            Err(AppError::Authorization("Admin account required.".to_string()))
        }
        _ => Ok(user),
    }
}

/// Creates a student account, or an admin one when the email is on the
/// configured allow-list.
pub async fn register(
    users: &dyn UserRepository,
    config: &Config,
    form: &RegisterForm,
) -> AppResult<User> {
    form.validate()?;

    let username = form.full_name.trim();
    let email = form.email.trim().to_lowercase();

    if username.is_empty() || email.is_empty() || form.password.is_empty() {
        return Err(AppError::Validation(
            "Name, email, and password are required.".to_string(),
        ));
    }
    if form.password != form.confirm_password {
        return Err(AppError::Validation("Passwords do not match.".to_string()));
    }
    if users.find_by_email(&email).await.is_some() {
        return Err(AppError::Conflict(
            "An account with this email already exists.".to_string(),
        ));
    }

    let user = users
        .create(NewUser {
            username: username.to_string(),
            is_admin: config.is_admin_email(&email),
            email,
            password_hash: hash_password(&form.password)?,
            grade: form.grade.trim().to_string(),
            school: form.school.trim().to_string(),
        })
        .await?;

    tracing::info!("Registered {} account {}", user.role(), user.id);
    Ok(user)
}

/// Ensures the default admin exists and, when configured, the demo student.
///
/// An existing demo account is forced back to a student with the configured
/// password.
pub async fn seed_defaults(users: &dyn UserRepository, config: &Config) -> AppResult<()> {
    if users.find_by_email(&config.default_admin_email).await.is_none() {
        tracing::info!("Seeding admin user: {}", config.default_admin_email);
        users
            .create(NewUser {
                username: "Admin".to_string(),
                email: config.default_admin_email.clone(),
                password_hash: hash_password(&config.default_admin_password)?,
                is_admin: true,
                grade: "N/A".to_string(),
                school: "SchoolLearn".to_string(),
            })
            .await?;
    }

    let (Some(email), Some(password)) = (&config.demo_user_email, &config.demo_user_password) else {
        return Ok(());
    };
    let password_hash = hash_password(password)?;

    match users.find_by_email(email).await {
        Some(existing) => {
            users
                .update(
                    &existing.id,
                    Box::new(move |u: &mut User| {
                        u.is_admin = false;
                        u.password_hash = password_hash;
                    }),
                )
                .await?;
        }
        None => {
            tracing::info!("Seeding demo student: {}", email);
            users
                .create(NewUser {
                    username: "Demo Student".to_string(),
                    email: email.clone(),
                    password_hash,
                    is_admin: false,
                    grade: "10th".to_string(),
                    school: "SchoolLearn".to_string(),
                })
                .await?;
        }
    }
    Ok(())
}
