// src/schema/value.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal spellings that mean "no value", compared case-insensitively.
const NULL_LITERALS: &[&str] = &["nan", "none", "null", "<na>"];

/// A single cell of a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Value {
    /// Text value, with every null-like spelling collapsed to `Null`.
    pub fn text(s: impl AsRef<str>) -> Self {
        let s = s.as_ref().trim();
        if is_null_like(s) {
            Value::Null
        } else {
            Value::Text(s.to_string())
        }
    }

    /// Finite numbers only; NaN and infinities are `Null`.
    pub fn number(n: f64) -> Self {
        if n.is_finite() {
            Value::Number(n)
        } else {
            Value::Null
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Collapse null-like text and non-finite numbers to `Null`.
    pub fn homogenized(self) -> Self {
        match self {
            Value::Text(s) => Value::text(s),
            Value::Number(n) => Value::number(n),
            other => other,
        }
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map(Value::number).unwrap_or(Value::Null)
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        v.map(Value::Integer).unwrap_or(Value::Null)
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        v.map(Value::text).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Empty, whitespace-only, or a literal null spelling in any case.
pub fn is_null_like(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || NULL_LITERALS.iter().any(|lit| t.eq_ignore_ascii_case(lit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_like_spellings_collapse() {
        for raw in ["", "   ", "nan", "NaN", "None", "NULL", "null", "<NA>", " \u{a0} "] {
            assert_eq!(Value::text(raw), Value::Null, "{:?}", raw);
        }
        assert_eq!(Value::text(" EUR "), Value::Text("EUR".into()));
        assert_eq!(Value::text("Nancy"), Value::Text("Nancy".into()));
    }

    #[test]
    fn non_finite_numbers_are_null() {
        assert_eq!(Value::number(f64::NAN), Value::Null);
        assert_eq!(Value::number(f64::INFINITY), Value::Null);
        assert_eq!(Value::number(1.5), Value::Number(1.5));
        assert_eq!(Value::Number(f64::NAN).homogenized(), Value::Null);
    }

    #[test]
    fn serializes_untagged() {
        let vals = vec![
            Value::Null,
            Value::Integer(2),
            Value::Number(5.25),
            Value::Text("EUR".into()),
        ];
        let json = serde_json::to_string(&vals).unwrap();
        assert_eq!(json, r#"[null,2,5.25,"EUR"]"#);
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vals);
    }
}
