//! Classification of rejected create requests.
//!
//! The API reports duplicates as a plain validation error, so the only way
//! to tell "already exists" from any other 400 is to look inside the body.

use serde_json::Value;

/// Error codes that mean the object is already there
const CONFLICT_CODES: &[&str] = &["unique", "already_exists", "duplicate"];

/// Message fragments that mean the same when no code is present
const CONFLICT_PHRASES: &[&str] = &["already exists", "unique"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Resource with this name already exists in scope
    Conflict,
    /// Anything else: validation, permissions, server trouble
    Other,
}

/// Decide whether a 400 body reports a uniqueness violation.
///
/// Structured `code` fields are consulted first; the case-insensitive
/// substring match over every string in the body is the fallback.
pub fn classify_rejection(body: &Value) -> Rejection {
    if has_conflict_code(body) || has_conflict_phrase(body) {
        Rejection::Conflict
    } else {
        Rejection::Other
    }
}

fn has_conflict_code(body: &Value) -> bool {
    match body {
        Value::Object(map) => map.iter().any(|(key, value)| {
            let coded = key == "code"
                && value
                    .as_str()
                    .map(|code| CONFLICT_CODES.contains(&code.to_ascii_lowercase().as_str()))
                    .unwrap_or(false);
            coded || has_conflict_code(value)
        }),
        Value::Array(items) => items.iter().any(has_conflict_code),
        _ => false,
    }
}

fn has_conflict_phrase(body: &Value) -> bool {
    match body {
        Value::String(text) => {
            let lower = text.to_lowercase();
            CONFLICT_PHRASES.iter().any(|phrase| lower.contains(phrase))
        }
        Value::Object(map) => map.values().any(has_conflict_phrase),
        Value::Array(items) => items.iter().any(has_conflict_phrase),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_message_already_exists() {
        let body = json!({"name": ["Stock location with this Name already exists."]});
        assert_eq!(classify_rejection(&body), Rejection::Conflict);
    }

    #[test]
    fn phrase_match_ignores_case() {
        let body = json!({"non_field_errors": ["ALREADY EXISTS"]});
        assert_eq!(classify_rejection(&body), Rejection::Conflict);
    }

    #[test]
    fn unique_constraint_message() {
        let body = json!({"__all__": ["The fields name, parent must make a unique set."]});
        assert_eq!(classify_rejection(&body), Rejection::Conflict);
    }

    #[test]
    fn structured_code_wins_without_message() {
        let body = json!({"errors": [{"attr": "name", "code": "Unique", "detail": "Nope"}]});
        assert_eq!(classify_rejection(&body), Rejection::Conflict);
    }

    #[test]
    fn plain_text_body() {
        let body = json!("IntegrityError: duplicate key value violates unique constraint");
        assert_eq!(classify_rejection(&body), Rejection::Conflict);
    }

    #[test]
    fn validation_error_is_other() {
        let body = json!({"minimum_stock": ["A valid integer is required."]});
        assert_eq!(classify_rejection(&body), Rejection::Other);
        assert_eq!(classify_rejection(&Value::Null), Rejection::Other);
        assert_eq!(
            classify_rejection(&json!({"code": "invalid", "detail": "bad"})),
            Rejection::Other
        );
    }
}
