// src/models/subject.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

/// One of the six quiz subjects.
///
/// The canonical key is what gets persisted and what appears in URLs.
/// Parsing is case-insensitive and accepts the `mathematics` and
/// `social_science` aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    Computer,
    Math,
    Science,
    English,
    Gujarati,
    SocialScience,
}

impl Subject {
    pub const ALL: [Subject; 6] = [
        Subject::Computer,
        Subject::Math,
        Subject::Science,
        Subject::English,
        Subject::Gujarati,
        Subject::SocialScience,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Subject::Computer => "computer",
            Subject::Math => "math",
            Subject::Science => "science",
            Subject::English => "english",
            Subject::Gujarati => "gujarati",
            Subject::SocialScience => "social-science",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Subject::Computer => "Computer",
            Subject::Math => "Mathematics",
            Subject::Science => "Science",
            Subject::English => "English",
            Subject::Gujarati => "Gujarati",
            Subject::SocialScience => "Social Science",
        }
    }

    /// Normalizes a user-supplied key. Returns `None` for unknown subjects.
    pub fn parse(raw: &str) -> Option<Self> {
        match canonical_key(raw).as_str() {
            "computer" => Some(Subject::Computer),
            "math" => Some(Subject::Math),
            "science" => Some(Subject::Science),
            "english" => Some(Subject::English),
            "gujarati" => Some(Subject::Gujarati),
            "social-science" => Some(Subject::SocialScience),
            _ => None,
        }
    }
}

/// Lowercases, trims and resolves aliases without validating the result.
pub fn canonical_key(raw: &str) -> String {
    let normalized = raw.trim().to_lowercase();
    match normalized.as_str() {
        "mathematics" => "math".to_string(),
        "social_science" => "social-science".to_string(),
        _ => normalized,
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Subject {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::parse(s).ok_or_else(|| AppError::Validation("Invalid subject".to_string()))
    }
}

impl Serialize for Subject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Subject::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown subject '{}'", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical_keys() {
        assert_eq!(Subject::parse("Mathematics"), Some(Subject::Math));
        assert_eq!(Subject::parse(" MATH "), Some(Subject::Math));
        assert_eq!(Subject::parse("social_science"), Some(Subject::SocialScience));
        assert_eq!(Subject::parse("Social-Science"), Some(Subject::SocialScience));
        assert_eq!(Subject::parse("history"), None);
    }

    #[test]
    fn keys_round_trip_through_parse() {
        for subject in Subject::ALL {
            assert_eq!(Subject::parse(subject.key()), Some(subject));
        }
    }

    #[test]
    fn serializes_as_canonical_key() {
        let json = serde_json::to_string(&Subject::SocialScience).unwrap();
        assert_eq!(json, "\"social-science\"");
        let parsed: Subject = serde_json::from_str("\"mathematics\"").unwrap();
        assert_eq!(parsed, Subject::Math);
    }
}
