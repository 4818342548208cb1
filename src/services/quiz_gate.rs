// src/services/quiz_gate.rs

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::models::subject::Subject;

/// Per-subject availability switch. Every subject starts enabled; state is
/// kept in memory only.
#[derive(Debug)]
pub struct QuizGate {
    enabled: RwLock<HashMap<Subject, bool>>,
}

impl Default for QuizGate {
    fn default() -> Self {
        Self {
            enabled: RwLock::new(Subject::ALL.iter().map(|s| (*s, true)).collect()),
        }
    }
}

impl QuizGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn quiz_enabled(&self, subject: Subject) -> bool {
        self.enabled
            .read()
            .await
            .get(&subject)
            .copied()
            .unwrap_or(true)
    }

    pub async fn set_quiz_enabled(&self, subject: Subject, enabled: bool) {
        self.enabled.write().await.insert(subject, enabled);
        tracing::info!("Quiz for {} is now {}", subject, if enabled { "enabled" } else { "disabled" });
    }

    /// Status of every subject, in catalogue order.
    pub async fn statuses(&self) -> Vec<(Subject, bool)> {
        let enabled = self.enabled.read().await;
        Subject::ALL
            .iter()
            .map(|s| (*s, enabled.get(s).copied().unwrap_or(true)))
            .collect()
    }
}
