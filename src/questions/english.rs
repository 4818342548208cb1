// src/questions/english.rs

//! English question bank.

use crate::models::question::BaseQuestion;

pub static QUESTIONS: &[BaseQuestion] = &[
    BaseQuestion {
        question: "Which of the following is a preposition?",
        options: [
            "Run",
            "Beautiful",
            "Under",
            "Quickly",
        ],
        answer: 2,
        explanation: "'Under' is a preposition that shows the relationship between a noun (or pronoun) and other words in a sentence.",
    },
    BaseQuestion {
        question: "What is the past tense of 'go'?",
        options: [
            "Goed",
            "Went",
            "Gone",
            "Going",
        ],
        answer: 1,
        explanation: "The past tense of 'go' is 'went'. 'Gone' is the past participle.",
    },
];
