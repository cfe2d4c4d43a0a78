//! String collation for filtering and sorting
//!
//! Only comparison strength is honoured: strength 1 and 2 compare strings
//! case-insensitively, 3 (the default) compares them exactly. The locale is
//! recorded but does not change ordering.

use std::cmp::Ordering;

use serde_json::Value;

use super::errors::{ExecutorError, ExecutorResult};

/// Default comparison strength: case and accents significant
pub const DEFAULT_STRENGTH: u64 = 3;

/// Collation settings of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collation {
    pub locale: Option<String>,
    pub strength: u64,
}

impl Default for Collation {
    fn default() -> Self {
        Self {
            locale: None,
            strength: DEFAULT_STRENGTH,
        }
    }
}

impl Collation {
    /// Parse a `{locale, strength}` object; absent means default
    pub fn parse(value: Option<&Value>) -> ExecutorResult<Self> {
        let obj = match value {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Object(obj)) => obj,
            Some(other) => {
                return Err(ExecutorError::invalid_filter(format!(
                    "collation must be an object, got {}",
                    other
                )))
            }
        };

        let locale = match obj.get("locale") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(ExecutorError::invalid_filter(format!(
                    "collation locale must be a string, got {}",
                    other
                )))
            }
        };

        let strength = match obj.get("strength") {
            None => DEFAULT_STRENGTH,
            Some(v) => match v.as_u64() {
                Some(s @ 1..=5) => s,
                _ => {
                    return Err(ExecutorError::invalid_filter(format!(
                        "collation strength must be 1-5, got {}",
                        v
                    )))
                }
            },
        };

        Ok(Self { locale, strength })
    }

    /// Returns true if letter case is ignored
    pub fn is_case_insensitive(&self) -> bool {
        self.strength <= 2
    }

    /// Compare two strings under this collation
    pub fn compare_str(&self, a: &str, b: &str) -> Ordering {
        if self.is_case_insensitive() {
            a.to_lowercase().cmp(&b.to_lowercase())
        } else {
            a.cmp(b)
        }
    }

    /// Compare two JSON values.
    ///
    /// Ordering rules:
    /// - missing < null < bool < number < string < array < object
    /// - same types use natural ordering
    /// - arrays and objects compare equal among themselves
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => {
                let a_type = type_order(a_val);
                let b_type = type_order(b_val);

                if a_type != b_type {
                    return a_type.cmp(&b_type);
                }

                match (a_val, b_val) {
                    (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                    (Value::Number(a_n), Value::Number(b_n)) => {
                        let a_f = a_n.as_f64().unwrap_or(0.0);
                        let b_f = b_n.as_f64().unwrap_or(0.0);
                        a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                    }
                    (Value::String(a_s), Value::String(b_s)) => self.compare_str(a_s, b_s),
                    _ => Ordering::Equal,
                }
            }
        }
    }

    /// Equality under this collation. Strings honour case folding; other
    /// values compare exactly, with no type coercion.
    pub fn values_equal(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::String(a_s), Value::String(b_s)) => {
                self.compare_str(a_s, b_s) == Ordering::Equal
            }
            (Value::Number(a_n), Value::Number(b_n)) => match (a_n.as_i64(), b_n.as_i64()) {
                (Some(ai), Some(bi)) => ai == bi,
                _ => a_n.as_f64() == b_n.as_f64(),
            },
            _ => a == b,
        }
    }
}

fn type_order(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
