//! Utility functions shared by the composer, the gateway client and the adapter

use serde_json::Value;

/// Maximum length of a gateway response body kept in errors and logs
pub const MAX_BODY_LENGTH: usize = 4000;

/// Truncate a string for diagnostics, marking the cut
pub fn truncate_string(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        Some((end, _)) => format!("{}... [truncated]", &s[..end]),
        None => s.to_string(),
    }
}

/// Cut `s` down to at most `max_chars` characters in place. No marker is
/// appended. Returns whether anything was removed.
pub fn truncate_chars(s: &mut String, max_chars: usize) -> bool {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => {
            s.truncate(end);
            true
        }
        None => false,
    }
}

/// Redact values of keys that commonly hold secrets:
/// password, token, secret, api_key, credentials
pub fn redact_sensitive_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, val) in map {
                let key_lower = key.to_lowercase();
                let is_sensitive = key_lower.contains("password")
                    || key_lower.contains("token")
                    || key_lower.contains("secret")
                    || key_lower.contains("api_key")
                    || key_lower.contains("credentials");

                if is_sensitive && !val.is_null() {
                    redacted.insert(key.clone(), Value::String("***".to_string()));
                } else if val.is_object() || val.is_array() {
                    redacted.insert(key.clone(), redact_sensitive_json(val));
                } else {
                    redacted.insert(key.clone(), val.clone());
                }
            }
            Value::Object(redacted)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(redact_sensitive_json).collect()),
        _ => value.clone(),
    }
}
