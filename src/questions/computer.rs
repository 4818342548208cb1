// src/questions/computer.rs

//! Computer question bank.

use crate::models::question::BaseQuestion;

pub static QUESTIONS: &[BaseQuestion] = &[
    BaseQuestion {
        question: "What does CPU stand for?",
        options: [
            "Contral Processing Unit",
            "Computer Processing Unit",
            "Central Process Unit",
            "Computer Process Unit",
        ],
        answer: 0,
        explanation: "CPU stands for Central Processing Unit, which is the primary component of a computer that performs most processing tasks.",
    },
    BaseQuestion {
        question: "Which programming language is known as the 'mother of all languages'?",
        options: [
            "C",
            "Java",
            "Assembly",
            "Fortran",
        ],
        answer: 2,
        explanation: "Assembly language is often considered the 'mother of all languages' as it's a low-level programming language that's closely related to machine code.",
    },
    BaseQuestion {
        question: "What is the time complexity of binary search?",
        options: [
            "O(1)",
            "O(log n)",
            "O(n)",
            "O(n²)",
        ],
        answer: 1,
        explanation: "Binary search has a time complexity of O(log n) as it divides the search interval in half each time.",
    },
    BaseQuestion {
        question: "Which data structure uses LIFO (Last In First Out) principle?",
        options: [
            "Queue",
            "Stack",
            "Array",
            "Linked List",
        ],
        answer: 1,
        explanation: "A Stack follows the LIFO principle where the last element added is the first one to be removed.",
    },
    BaseQuestion {
        question: "What does HTML stand for?",
        options: [
            "Hyper Text Markup Language",
            "High Tech Modern Language",
            "Hyperlink and Text Markup Language",
            "Home Tool Markup Language",
        ],
        answer: 0,
        explanation: "HTML stands for Hyper Text Markup Language, which is the standard markup language for creating web pages.",
    },
    BaseQuestion {
        question: "Which of the following is not a programming language?",
        options: [
            "HTML",
            "Python",
            "Java",
            "C++",
        ],
        answer: 0,
        explanation: "HTML is a markup language, not a programming language. It's used for creating the structure of web pages.",
    },
    BaseQuestion {
        question: "What is the output of 'print(2 + '2')' in Python?",
        options: [
            "4",
            "22",
            "TypeError",
            "'4'",
        ],
        answer: 2,
        explanation: "This will raise a TypeError because you can't add an integer and a string directly in Python.",
    },
    BaseQuestion {
        question: "Which of these is a NoSQL database?",
        options: [
            "MySQL",
            "PostgreSQL",
            "MongoDB",
            "SQLite",
        ],
        answer: 2,
        explanation: "MongoDB is a popular NoSQL database that stores data in flexible, JSON-like documents.",
    },
    BaseQuestion {
        question: "What does API stand for?",
        options: [
            "Application Programming Interface",
            "Advanced Programming Interface",
            "Application Process Integration",
            "Automated Programming Interface",
        ],
        answer: 0,
        explanation: "API stands for Application Programming Interface, which is a set of rules and protocols for building and interacting with software applications.",
    },
    BaseQuestion {
        question: "Which sorting algorithm has the worst-case time complexity of O(n²)?",
        options: [
            "Merge Sort",
            "Quick Sort",
            "Bubble Sort",
            "Heap Sort",
        ],
        answer: 2,
        explanation: "Bubble Sort has a worst-case time complexity of O(n²) when the array is sorted in reverse order.",
    },
    BaseQuestion {
        question: "What is the full form of URL?",
        options: [
            "Uniform Resource Locator",
            "Universal Resource Locator",
            "Uniform Resource Link",
            "Universal Reference Link",
        ],
        answer: 0,
        explanation: "URL stands for Uniform Resource Locator, which is the address of a resource on the internet.",
    },
    BaseQuestion {
        question: "Which of these is not a JavaScript framework?",
        options: [
            "React",
            "Angular",
            "Django",
            "Vue",
        ],
        answer: 2,
        explanation: "Django is a Python web framework, not a JavaScript framework.",
    },
    BaseQuestion {
        question: "What is the binary representation of the decimal number 10?",
        options: [
            "1001",
            "1010",
            "1100",
            "1111",
        ],
        answer: 1,
        explanation: "The binary representation of decimal 10 is 1010.",
    },
    BaseQuestion {
        question: "Which protocol is used to send email?",
        options: [
            "HTTP",
            "FTP",
            "SMTP",
            "SSH",
        ],
        answer: 2,
        explanation: "SMTP (Simple Mail Transfer Protocol) is used for sending emails.",
    },
    BaseQuestion {
        question: "What is the maximum value that can be stored in a byte?",
        options: [
            "128",
            "255",
            "256",
            "1024",
        ],
        answer: 1,
        explanation: "A byte consists of 8 bits, and 2^8 = 256 possible values (0-255).",
    },
    BaseQuestion {
        question: "Which of these is a compiled language?",
        options: [
            "Python",
            "JavaScript",
            "C",
            "PHP",
        ],
        answer: 2,
        explanation: "C is a compiled language, while the others are interpreted or use just-in-time compilation.",
    },
    BaseQuestion {
        question: "What does SQL stand for?",
        options: [
            "Structured Query Language",
            "Simple Query Language",
            "Standard Query Language",
            "System Query Language",
        ],
        answer: 0,
        explanation: "SQL stands for Structured Query Language, used for managing and manipulating relational databases.",
    },
    BaseQuestion {
        question: "Which data structure uses a hash function to map keys to values?",
        options: [
            "Array",
            "Linked List",
            "Hash Table",
            "Binary Tree",
        ],
        answer: 2,
        explanation: "A Hash Table uses a hash function to compute an index into an array of buckets or slots, from which the desired value can be found.",
    },
    BaseQuestion {
        question: "What is the time complexity of accessing an element in an array by index?",
        options: [
            "O(1)",
            "O(log n)",
            "O(n)",
            "O(n²)",
        ],
        answer: 0,
        explanation: "Accessing an element in an array by its index is a constant-time operation, O(1).",
    },
    BaseQuestion {
        question: "Which of these is not a valid variable name in Python?",
        options: [
            "my_variable",
            "_myvar",
            "my-var",
            "myVar",
        ],
        answer: 2,
        explanation: "Variable names in Python cannot contain hyphens (-). They can contain letters, numbers, and underscores, but cannot start with a number.",
    },
];
