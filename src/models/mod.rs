// src/models/mod.rs

pub mod analytics;
pub mod mark;
pub mod progress;
pub mod question;
pub mod subject;
pub mod user;
