//! Numeric fields whose JSON encoding varies between firmware versions
//!
//! iDRAC firmware reports some sizes (e.g. `TotalSystemMemoryGiB`) as an
//! integer on one release and as a float on the next. These fields are kept
//! as raw [`serde_json::Value`] in the response shapes and coerced here.

use serde_json::Value;

/// Outcome of a failed coercion: the JSON type that was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedJsonType(pub &'static str);

/// Coerce an integer or floating point JSON number into `u64`.
///
/// Floats are truncated toward zero. Negative numbers, floats too large for
/// `u64`, `null`, strings, booleans, arrays and objects are rejected.
pub fn coerce_u64(value: &Value) -> Result<u64, UnsupportedJsonType> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(u)
            } else if n.is_i64() {
                Err(UnsupportedJsonType("negative integer"))
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 && f < u64::MAX as f64 => {
                        Ok(f.trunc() as u64)
                    }
                    Some(f) if f >= 0.0 => Err(UnsupportedJsonType("out of range float")),
                    _ => Err(UnsupportedJsonType("negative float")),
                }
            }
        }
        Value::Null => Err(UnsupportedJsonType("null")),
        Value::Bool(_) => Err(UnsupportedJsonType("boolean")),
        Value::String(_) => Err(UnsupportedJsonType("string")),
        Value::Array(_) => Err(UnsupportedJsonType("array")),
        Value::Object(_) => Err(UnsupportedJsonType("object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_and_float_agree() {
        assert_eq!(coerce_u64(&json!(384)), Ok(384));
        assert_eq!(coerce_u64(&json!(384.0)), Ok(384));
    }

    #[test]
    fn test_float_is_truncated() {
        assert_eq!(coerce_u64(&json!(15.999)), Ok(15));
        assert_eq!(coerce_u64(&json!(0.5)), Ok(0));
    }

    #[test]
    fn test_float_beyond_u64_is_rejected() {
        assert_eq!(
            coerce_u64(&json!(1e30)),
            Err(UnsupportedJsonType("out of range float"))
        );
        assert_eq!(
            coerce_u64(&json!(18446744073709551616.0)),
            Err(UnsupportedJsonType("out of range float"))
        );
        assert_eq!(coerce_u64(&json!(9007199254740992.0)), Ok(9007199254740992));
    }

    #[test]
    fn test_rejected_types() {
        assert_eq!(coerce_u64(&json!("384")), Err(UnsupportedJsonType("string")));
        assert_eq!(coerce_u64(&Value::Null), Err(UnsupportedJsonType("null")));
        assert_eq!(coerce_u64(&json!(true)), Err(UnsupportedJsonType("boolean")));
        assert_eq!(coerce_u64(&json!([1])), Err(UnsupportedJsonType("array")));
        assert_eq!(coerce_u64(&json!({"GiB": 1})), Err(UnsupportedJsonType("object")));
        assert_eq!(
            coerce_u64(&json!(-4)),
            Err(UnsupportedJsonType("negative integer"))
        );
        assert_eq!(
            coerce_u64(&json!(-4.5)),
            Err(UnsupportedJsonType("negative float"))
        );
    }
}
