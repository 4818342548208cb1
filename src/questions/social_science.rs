// src/questions/social_science.rs

//! Social science question bank.

use crate::models::question::BaseQuestion;

pub static QUESTIONS: &[BaseQuestion] = &[
    BaseQuestion {
        question: "Who was the first President of India?",
        options: [
            "Jawaharlal Nehru",
            "Rajendra Prasad",
            "S. Radhakrishnan",
            "Zakir Husain",
        ],
        answer: 1,
        explanation: "Dr. Rajendra Prasad was the first President of India, serving from 1950 to 1962.",
    },
    BaseQuestion {
        question: "Which is the largest democracy in the world?",
        options: [
            "United States",
            "China",
            "India",
            "Brazil",
        ],
        answer: 2,
        explanation: "India is the world's largest democracy with over 900 million eligible voters.",
    },
];
