// src/repositories/user_repository.rs

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::user::User,
};

/// Fields needed to create an account. The id and join time are assigned by
/// the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub grade: String,
    pub school: String,
}

/// In-place edit applied to a stored user.
pub type UserUpdate = Box<dyn FnOnce(&mut User) + Send>;

/// Identity storage keyed by id and by unique (case-insensitive) email.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> AppResult<User>;
    async fn find_by_id(&self, id: &str) -> Option<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    /// Newest accounts first.
    async fn find_all(&self) -> Vec<User>;
    /// Applies `apply` atomically and returns the updated user.
    async fn update(&self, id: &str, apply: UserUpdate) -> AppResult<User>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Process-local user directory. Contents are lost on restart.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
    next_id: AtomicU64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let email = new_user.email.trim().to_lowercase();
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == email) {
            return Err(AppError::Conflict(
                "An account with this email already exists.".to_string(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        let user = User {
            id: id.clone(),
            username: new_user.username,
            email,
            password_hash: new_user.password_hash,
            is_admin: new_user.is_admin,
            grade: new_user.grade,
            school: new_user.school,
            joined_at: Utc::now(),
            progress: Default::default(),
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = email.trim().to_lowercase();
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    async fn find_all(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.joined_at.cmp(&a.joined_at).then_with(|| b.id.cmp(&a.id)));
        users
    }

    async fn update(&self, id: &str, apply: UserUpdate) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
        apply(user);
        Ok(user.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))
    }
}
