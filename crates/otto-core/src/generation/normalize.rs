//! Normalization of untrusted challenge payloads.

use serde_json::Value;

use crate::error::NormalizeError;
use crate::state::Challenge;

pub const DEFAULT_TITLE: &str = "Daily Challenge";
pub const DEFAULT_OBJECTIVE: &str = "Stay consistent today.";
pub const DEFAULT_DIFFICULTY: &str = "Moderate";
pub const DEFAULT_INSTRUCTION: &str = "Follow the prompt and listen to your body.";
pub const MAX_INSTRUCTIONS: usize = 6;

/// Coerce a decoded payload into a [`Challenge`].
///
/// Every field falls back to a default on its own. Only a payload that is
/// not a JSON object at all is rejected.
///
/// # Errors
/// Returns [`NormalizeError::NotAnObject`] for non-object payloads.
pub fn normalize_challenge(payload: &Value) -> Result<Challenge, NormalizeError> {
    let obj = payload.as_object().ok_or(NormalizeError::NotAnObject)?;

    let mut instructions: Vec<String> = match obj.get("instructions") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| clean_text(Some(item)))
            .take(MAX_INSTRUCTIONS)
            .collect(),
        _ => Vec::new(),
    };
    if instructions.is_empty() {
        instructions.push(DEFAULT_INSTRUCTION.to_string());
    }

    Ok(Challenge {
        title: text_or(obj.get("title"), DEFAULT_TITLE),
        objective: text_or(obj.get("objective"), DEFAULT_OBJECTIVE),
        est_time_min: obj.get("est_time_min").and_then(leading_integer),
        difficulty: text_or(obj.get("difficulty"), DEFAULT_DIFFICULTY),
        instructions,
    })
}

/// Trimmed non-blank string, if `value` is one.
fn clean_text(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn text_or(value: Option<&Value>, fallback: &str) -> String {
    clean_text(value).unwrap_or_else(|| fallback.to_string())
}

/// Lenient integer read: integers as-is, floats truncated, strings by their
/// leading integer (`"25 min"` is 25).
///
/// Values that do not fit in an `i64` (huge floats, digit runs longer than
/// 19 digits) are treated as unreadable and yield `None`.
fn leading_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?.trunc();
            (f.is_finite() && f.abs() < i64::MAX as f64).then_some(f as i64)
        }),
        Value::String(s) => {
            let s = s.trim_start();
            let (sign, digits) = match s.as_bytes().first() {
                Some(b'-') => (-1, &s[1..]),
                Some(b'+') => (1, &s[1..]),
                _ => (1, s),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().ok().map(|n| sign * n)
        }
        _ => None,
    }
}
