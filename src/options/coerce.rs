//! Lenient integer coercion for pagination inputs
//!
//! Page, limit and offset arrive as arbitrary JSON. Whole non-negative
//! numbers and strings holding one are accepted; everything else yields
//! `None` and the caller substitutes a default.

use serde_json::Value;

/// Coerces a JSON value to a non-negative integer.
pub(crate) fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_whole_numbers() {
        assert_eq!(coerce_u64(&json!(0)), Some(0));
        assert_eq!(coerce_u64(&json!(25)), Some(25));
        assert_eq!(coerce_u64(&json!(3.0)), Some(3));
    }

    #[test]
    fn test_accepts_numeric_strings() {
        assert_eq!(coerce_u64(&json!("7")), Some(7));
        assert_eq!(coerce_u64(&json!(" 12 ")), Some(12));
    }

    #[test]
    fn test_rejects_everything_else() {
        for value in [
            json!(-5),
            json!(2.5),
            json!("-1"),
            json!("ten"),
            json!(""),
            json!(null),
            json!(true),
            json!([1]),
            json!({"n": 1}),
        ] {
            assert_eq!(coerce_u64(&value), None, "{}", value);
        }
    }
}
