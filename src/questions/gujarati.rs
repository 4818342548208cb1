// src/questions/gujarati.rs

//! Gujarati question bank.

use crate::models::question::BaseQuestion;

pub static QUESTIONS: &[BaseQuestion] = &[
    BaseQuestion {
        question: "ગુજરાતી ભાષામાં 'સૂર્ય' નો અર્થ શું છે?",
        options: [
            "Moon",
            "Sun",
            "Star",
            "Planet",
        ],
        answer: 1,
        explanation: "ગુજરાતી ભાષામાં 'સૂર્ય' નો અર્થ 'Sun' (સૂરજ) થાય છે.",
    },
    BaseQuestion {
        question: "'અમદાવાદ' નગર કઈ નદીના કિનારે વસેલું છે?",
        options: [
            "નર્મદા",
            "સાબરમતી",
            "તાપી",
            "મહી",
        ],
        answer: 1,
        explanation: "અમદાવાદ શહેર સાબરમતી નદીના કિનારે વસેલું છે.",
    },
];
