// src/questions/mod.rs

//! Static question providers, one per subject.

pub mod computer;
pub mod english;
pub mod gujarati;
pub mod math;
pub mod science;
pub mod social_science;

use crate::models::{question::BaseQuestion, subject::Subject};

/// All compiled-in questions for a subject, in their canonical order.
///
/// Base question ids are positional, so this order must stay stable.
pub fn base_questions(subject: Subject) -> &'static [BaseQuestion] {
    match subject {
        Subject::Computer => computer::QUESTIONS,
        Subject::Math => math::QUESTIONS,
        Subject::Science => science::QUESTIONS,
        Subject::English => english::QUESTIONS,
        Subject::Gujarati => gujarati::QUESTIONS,
        Subject::SocialScience => social_science::QUESTIONS,
    }
}
