//! # Record Normalizer
//!
//! Turns one loosely typed capture record into a canonical [`Element`].
//!
//! Capture agents are sloppy about optional fields: numbers where strings are
//! expected, `null` for "no text", flags sent as `1` or `"yes"`. Those are
//! coerced, never rejected. Only the two fields that identify an element are
//! strict: `class` and the locator (`bounds` or `position`) must be JSON
//! strings, otherwise the record is invalid.
//!
//! Coercion mirrors the loose truthiness rules of the agents that produce the
//! records:
//!
//! | input            | string field        | flag  |
//! |------------------|---------------------|-------|
//! | absent / `null`  | `""`                | false |
//! | `false` / `true` | `""` / `"true"`     | false / true |
//! | `0` / `42`       | `""` / `"42"`       | false / true |
//! | `""` / `"x"`     | `""` / `"x"`        | false / true |
//! | array            | items joined by `,` | true  |
//! | object           | `"[object Object]"` | true  |

use crate::error::{Result, UispectError};
use crate::model::{Element, LocatorKind};
use serde_json::Value;

/// True when `raw` carries a string `class` and a string locator field.
pub fn is_valid(raw: &Value, kind: LocatorKind) -> bool {
    matches!(raw.get("class"), Some(Value::String(_)))
        && matches!(raw.get(kind.field_name()), Some(Value::String(_)))
}

/// Validates and coerces a single record. `index` is only used to label the
/// error when the record sits inside a batch.
pub fn normalize_at(raw: &Value, kind: LocatorKind, index: usize) -> Result<Element> {
    if !is_valid(raw, kind) {
        return Err(UispectError::Validation {
            index,
            field: kind.field_name(),
        });
    }

    Ok(Element {
        class: coerce_string(raw.get("class")),
        id: coerce_string(raw.get("id")),
        text: coerce_string(raw.get("text")),
        description: coerce_string(raw.get("description")),
        locator: kind.wrap(coerce_string(raw.get(kind.field_name()))),
        clickable: coerce_bool(raw.get("clickable")),
        editable: coerce_bool(raw.get("editable")),
        checkable: coerce_bool(raw.get("checkable")),
    })
}

pub fn normalize(raw: &Value, kind: LocatorKind) -> Result<Element> {
    normalize_at(raw, kind, 0)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_bool(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(v) => stringify(v),
        _ => String::new(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(format_float).unwrap_or_default()
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Shortest round-trip digits, switching to exponent form below 1e-6 and from
/// 1e21 up with an explicit `+` on positive exponents ("1e+21", "1.5e-7").
fn format_float(f: f64) -> String {
    let magnitude = f.abs();
    if f == 0.0 {
        "0".to_string()
    } else if magnitude < 1e-6 || magnitude >= 1e21 {
        let formatted = format!("{:e}", f);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        // Display already drops a zero fraction ("2" for 2.0)
        f.to_string()
    }
}
