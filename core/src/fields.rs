//! Heuristic field extraction from visual definition documents.
//!
//! PBIR visual documents reference data columns and measures under a handful
//! of well-known keys (`queryRef`, `displayName`, `measure`, ...), nested at
//! arbitrary depth. `extract_fields` walks the whole document and collects a
//! normalized token for every such reference.

use std::collections::BTreeSet;

use serde_json::Value;

/// Keys whose string values name a data column, measure, or display name.
/// Matched case-insensitively.
const FIELD_KEYS: [&str; 8] = [
    "queryref",
    "queryname",
    "field",
    "displayname",
    "name",
    "column",
    "expr",
    "measure",
];

/// Collects every field token referenced anywhere in `value`.
///
/// Tokens are trimmed and lower-cased; empty tokens are dropped. The result
/// is a set, so ordering and multiplicity of references do not matter.
pub fn extract_fields(value: &Value) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    collect(value, &mut found);
    found
}

fn collect(value: &Value, found: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if is_field_key(key) {
                    match child {
                        Value::String(s) => insert_token(found, s),
                        Value::Object(inner) => {
                            if let Some(expr) = inner.get("expression") {
                                insert_token(found, &scalar_text(expr));
                            }
                        }
                        _ => {}
                    }
                }
                if matches!(child, Value::Object(_) | Value::Array(_)) {
                    collect(child, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(s) => insert_token(found, s),
                    _ => collect(item, found),
                }
            }
        }
        _ => {}
    }
}

fn is_field_key(key: &str) -> bool {
    FIELD_KEYS
        .iter()
        .any(|candidate| key.eq_ignore_ascii_case(candidate))
}

/// Normalizes a raw reference into a field token. Empty after trimming means
/// no token.
pub(crate) fn insert_token(found: &mut BTreeSet<String>, raw: &str) {
    let token = raw.trim().to_lowercase();
    if !token.is_empty() {
        found.insert(token);
    }
}

/// String form of an `expression` value: strings pass through, anything else
/// uses its compact JSON rendering.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
