//! # Field Navigation
//!
//! Rules address nested settings by key path (`["ssl", "hsts_enabled"]`).
//! [`lookup`] walks mappings only: a missing key, or an intermediate value
//! that is not a mapping, both yield `None`. Whether `None` triggers a
//! rule is that rule's [`Absence`] policy.
//!
//! Documents are parsed as YAML 1.2, where `no`, `off` and friends are plain
//! strings. Operators write them as switches, so [`is_truthy`] reads the
//! YAML 1.1 boolean spellings as booleans.

use serde_json::Value;

/// How a rule treats a field that cannot be found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// A missing field counts as "not enabled" and triggers the rule.
    Triggers,
    /// A missing field leaves the rule untriggered.
    Ignored,
}

/// Follow `path` through nested mappings.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// A YAML 1.1 boolean spelling (`y|n|yes|no|on|off|true|false`, any case).
pub fn yaml11_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "y" | "yes" | "on" | "true" => Some(true),
        "n" | "no" | "off" | "false" => Some(false),
        _ => None,
    }
}

/// Truthiness of a document value.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are falsy, as is any string
/// [`yaml11_bool`] reads as `false`; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => yaml11_bool(s).unwrap_or(!s.is_empty()),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
