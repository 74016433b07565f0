//! Rule-based field extraction over whitespace tokens

use docfields_domain::{ExtractedFields, ExtractionResult, Source};

/// Confidence contributed by each rule that fires
pub const RULE_WEIGHT: f64 = 0.25;

/// The one city the rules recognise
pub const KNOWN_CITY: &str = "Beijing";

/// Token that marks the one major the rules recognise
pub const MAJOR_TOKEN: &str = "Software-Engineering";

/// Split text into tokens on whitespace and the ASCII separators FS, GS, RS, US
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(is_separator)
        .filter(|token| !token.is_empty())
        .collect()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Deterministic extractor built from four fixed heuristics
///
/// - name: the first token
/// - age: the first token made only of ASCII digits
/// - city: a token equal to `Beijing`
/// - major: a token equal to `Software-Engineering`, reported with a space
///
/// Each rule that fires adds [`RULE_WEIGHT`] to the confidence. Matching is
/// exact and case-sensitive against whole tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleExtractor;

impl RuleExtractor {
    /// Create a new rule extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract fields from text; never fails
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let tokens = tokenize(text);
        let mut fields = ExtractedFields::default();
        let mut confidence = 0.0;

        if let Some(first) = tokens.first() {
            fields.name = Some((*first).to_string());
            confidence += RULE_WEIGHT;
        }

        if let Some(age) = tokens.iter().find_map(|token| parse_age(token)) {
            fields.age = Some(age);
            confidence += RULE_WEIGHT;
        }

        if tokens.contains(&KNOWN_CITY) {
            fields.city = Some(KNOWN_CITY.to_string());
            confidence += RULE_WEIGHT;
        }

        if tokens.contains(&MAJOR_TOKEN) {
            fields.major = Some(MAJOR_TOKEN.replace('-', " "));
            confidence += RULE_WEIGHT;
        }

        ExtractionResult::new(fields, Source::Rule, confidence)
    }
}

/// Digits-only tokens are ages; values that overflow `u32` are skipped
fn parse_age(token: &str) -> Option<u32> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}
