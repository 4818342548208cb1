// src/questions/science.rs

//! Science question bank.

use crate::models::question::BaseQuestion;

pub static QUESTIONS: &[BaseQuestion] = &[
    BaseQuestion {
        question: "Which planet is known as the Red Planet?",
        options: [
            "Venus",
            "Mars",
            "Jupiter",
            "Saturn",
        ],
        answer: 1,
        explanation: "Mars is often called the Red Planet because iron minerals in the Martian soil oxidize, or rust, causing the soil and atmosphere to look red.",
    },
    BaseQuestion {
        question: "What is the chemical symbol for gold?",
        options: [
            "Go",
            "Gd",
            "Au",
            "Ag",
        ],
        answer: 2,
        explanation: "The chemical symbol for gold is Au, from the Latin word 'aurum' meaning 'shining dawn'.",
    },
];
