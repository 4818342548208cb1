// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    repositories::{InMemoryUserRepository, UserRepository},
    services::{MarksStore, QuestionStore, QuizGate},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserRepository>,
    pub questions: Arc<QuestionStore>,
    pub marks: Arc<MarksStore>,
    pub quiz_gate: Arc<QuizGate>,
}

impl AppState {
    /// Wires the stores rooted at `config.data_dir` with the given user
    /// directory.
    pub fn with_users(config: Config, users: Arc<dyn UserRepository>) -> Self {
        Self {
            questions: Arc::new(QuestionStore::new(&config.data_dir)),
            marks: Arc::new(MarksStore::new(&config.data_dir)),
            quiz_gate: Arc::new(QuizGate::new()),
            users,
            config,
        }
    }

    /// State backed by the in-memory user directory.
    pub fn new(config: Config) -> Self {
        Self::with_users(config, Arc::new(InMemoryUserRepository::new()))
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserRepository> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for Arc<QuestionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.questions.clone()
    }
}

impl FromRef<AppState> for Arc<MarksStore> {
    fn from_ref(state: &AppState) -> Self {
        state.marks.clone()
    }
}

impl FromRef<AppState> for Arc<QuizGate> {
    fn from_ref(state: &AppState) -> Self {
        state.quiz_gate.clone()
    }
}
