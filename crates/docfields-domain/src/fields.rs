//! Extracted fields and the result envelope returned by every extractor

use crate::source::Source;
use serde::{Deserialize, Serialize};

/// Fields pulled out of a block of free text
///
/// Every field is optional; a fresh value has all of them absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Person name
    pub name: Option<String>,

    /// Age in years
    pub age: Option<u32>,

    /// City of residence
    pub city: Option<String>,

    /// Field of study
    pub major: Option<String>,
}

impl ExtractedFields {
    /// Number of fields that are present
    pub fn present_count(&self) -> usize {
        [
            self.name.is_some(),
            self.age.is_some(),
            self.city.is_some(),
            self.major.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// True when no field was extracted
    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }
}

/// Outcome of one extraction call
///
/// Serialized flat, so the wire shape is
/// `{name, age, city, major, source, confidence}` with absent fields as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted fields
    #[serde(flatten)]
    pub fields: ExtractedFields,

    /// Which path produced the fields
    pub source: Source,

    /// Heuristic certainty in [0.0, 1.0], two decimals
    pub confidence: f64,
}

impl ExtractionResult {
    /// Create a result, rounding the confidence to two decimals
    pub fn new(fields: ExtractedFields, source: Source, confidence: f64) -> Self {
        Self {
            fields,
            source,
            confidence: round_confidence(confidence),
        }
    }

    /// Re-tag this result with a different source, keeping fields and confidence
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }
}

/// Round a confidence score to two decimal places
///
/// # Examples
///
/// ```
/// use docfields_domain::round_confidence;
///
/// assert_eq!(round_confidence(0.25 + 0.25 + 0.25), 0.75);
/// assert_eq!(round_confidence(0.799999), 0.8);
/// ```
pub fn round_confidence(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fields_are_absent() {
        let fields = ExtractedFields::default();
        assert!(fields.name.is_none());
        assert!(fields.age.is_none());
        assert!(fields.city.is_none());
        assert!(fields.major.is_none());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_present_count() {
        let fields = ExtractedFields {
            name: Some("Alice".to_string()),
            age: Some(30),
            ..Default::default()
        };
        assert_eq!(fields.present_count(), 2);
        assert!(!fields.is_empty());
    }

    #[test]
    fn test_new_rounds_confidence() {
        let result = ExtractionResult::new(ExtractedFields::default(), Source::Rule, 0.30000000000000004);
        assert_eq!(result.confidence, 0.3);
    }

    #[test]
    fn test_with_source_keeps_confidence() {
        let result = ExtractionResult::new(ExtractedFields::default(), Source::Rule, 0.5)
            .with_source(Source::Fallback);
        assert_eq!(result.source, Source::Fallback);
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_serializes_flat_with_nulls() {
        let result = ExtractionResult::new(
            ExtractedFields {
                name: Some("Bob".to_string()),
                ..Default::default()
            },
            Source::Rule,
            0.25,
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["name"], "Bob");
        assert!(value["age"].is_null());
        assert!(value["city"].is_null());
        assert!(value["major"].is_null());
        assert_eq!(value["source"], "rule");
        assert_eq!(value["confidence"], 0.25);
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn test_deserializes_flat_shape() {
        let json = r#"{"name":"Dan","age":22,"city":null,"major":null,"source":"ai","confidence":0.8}"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.fields.name.as_deref(), Some("Dan"));
        assert_eq!(result.fields.age, Some(22));
        assert_eq!(result.source, Source::Ai);
    }
}
