//! Parse LLM output into extracted fields

use crate::error::AiFailure;
use docfields_domain::ExtractedFields;
use serde_json::{Map, Value};

/// Parse a completion into fields
///
/// The completion must be a JSON object. `name`, `city` and `major` must be
/// strings or null; `age` must be a non-negative integer, a digit string or
/// null. Other keys are ignored and missing keys stay absent.
pub fn parse_ai_fields(completion: &str) -> Result<ExtractedFields, AiFailure> {
    let json: Value = serde_json::from_str(completion)?;

    let obj = json.as_object().ok_or_else(|| {
        AiFailure::SchemaMismatch(format!("expected JSON object, got {}", kind_of(&json)))
    })?;

    Ok(ExtractedFields {
        name: string_field(obj, "name")?,
        age: age_field(obj)?,
        city: string_field(obj, "city")?,
        major: string_field(obj, "major")?,
    })
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, AiFailure> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(AiFailure::SchemaMismatch(format!(
            "'{}' should be a string, got {}",
            key,
            kind_of(other)
        ))),
    }
}

fn age_field(obj: &Map<String, Value>) -> Result<Option<u32>, AiFailure> {
    let mismatch = |detail: String| AiFailure::SchemaMismatch(format!("'age' {}", detail));

    match obj.get("age") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v)
                    .map(Some)
                    .map_err(|_| mismatch(format!("{} is out of range", v)));
            }
            // Integral floats such as 22.0 are accepted
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&f) => {
                    Ok(Some(f as u32))
                }
                _ => Err(mismatch(format!("{} is not a non-negative integer", n))),
            }
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
                trimmed
                    .parse()
                    .map(Some)
                    .map_err(|_| mismatch(format!("'{}' is out of range", trimmed)))
            } else {
                Err(mismatch(format!("'{}' is not a number", s)))
            }
        }
        Some(other) => Err(mismatch(format!("should be an integer, got {}", kind_of(other)))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
