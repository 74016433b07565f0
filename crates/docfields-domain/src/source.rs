//! Source module - which path produced an extraction result

use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of an extraction result
///
/// - Rule: the deterministic token heuristics
/// - Ai: the completion service answered with usable JSON
/// - Fallback: the AI path failed and the rule heuristics were used instead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Rule-based extraction
    Rule,

    /// AI-backed extraction
    Ai,

    /// Rule-based extraction substituted after an AI failure
    Fallback,
}

impl Source {
    /// Get the source name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Rule => "rule",
            Source::Ai => "ai",
            Source::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_as_str() {
        assert_eq!(Source::Rule.as_str(), "rule");
        assert_eq!(Source::Ai.as_str(), "ai");
        assert_eq!(Source::Fallback.as_str(), "fallback");
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(Source::Fallback.to_string(), "fallback");
        assert_eq!(format!("answered from {}", Source::Ai), "answered from ai");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Source::Fallback).unwrap();
        assert_eq!(json, "\"fallback\"");

        let parsed: Source = serde_json::from_str("\"ai\"").unwrap();
        assert_eq!(parsed, Source::Ai);
    }
}
