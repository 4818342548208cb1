// src/services/mod.rs

pub mod accounts;
pub mod analytics;
pub mod marks_store;
pub mod progress;
pub mod question_store;
pub mod quiz_gate;

pub use marks_store::MarksStore;
pub use question_store::QuestionStore;
pub use quiz_gate::QuizGate;
