//! Response parsing.
//!
//! Generation backends wrap their JSON in prose, markdown fences, or
//! thinking tags often enough that strict whole-body parsing would fail on
//! otherwise usable output. Extraction is greedy: everything from the first
//! `{` to the last `}` is treated as the candidate document. Malformed
//! interiors then fail JSON parsing rather than slipping through.

use serde_json::Value;

use retro_core::{Error, ParsedSynthesis, Result};

/// Parse a raw generation response into a [`ParsedSynthesis`].
///
/// The full key set of the decoded object is preserved so the shape
/// validator can reject unexpected keys instead of silently dropping them.
pub fn parse_synthesis(raw: &str) -> Result<ParsedSynthesis> {
    let open = raw
        .find('{')
        .ok_or_else(|| Error::Parse("response contains no JSON object".to_string()))?;
    let close = raw
        .rfind('}')
        .filter(|&close| close > open)
        .ok_or_else(|| Error::Parse("response contains no JSON object".to_string()))?;
    let candidate = &raw[open..=close];

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| Error::Parse(format!("response is not valid JSON: {}", e)))?;
    let object = value
        .as_object()
        .ok_or_else(|| Error::Parse("response JSON is not an object".to_string()))?;

    let summary = string_field(object, "summary")?;
    let focus = string_field(object, "focus")?;
    let keys = object.keys().cloned().collect();

    Ok(ParsedSynthesis {
        summary,
        focus,
        keys,
    })
}

fn string_field(object: &serde_json::Map<String, Value>, key: &str) -> Result<String> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(Error::Parse(format!(
            "field \"{}\" must be a string, got {}",
            key,
            json_type_name(other)
        ))),
        None => Err(Error::Parse(format!("missing field \"{}\"", key))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
