//! Conversion boundary — JSON interop and fallible value extraction.
//!
//! Kept out of `value` on purpose: the value model is pure data, everything
//! that can fail lives here. This is also the only part of the crate that
//! returns [`Error`] — the navigator getter surface never does.

use crate::coerce::Numeric;
use crate::navigator::Navigator;
use crate::value::Value;
use crate::{Error, Result};

// ============================================================================
// JSON → Value
// ============================================================================

/// JSON trees map losslessly into the value model: numbers become `I64`,
/// `U64`, or `F64` (narrowest that holds), containers become shared.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    Value::F64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::list(items.into_iter().map(Value::from).collect()),
            Json::Object(entries) => {
                Value::map(entries.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl Navigator {
    /// Build a navigator over a parsed JSON document.
    ///
    /// Only container-shaped documents are navigable; a scalar or null
    /// document yields `None`, mirroring [`Navigator::navigator`].
    pub fn from_json(json: serde_json::Value) -> Option<Navigator> {
        match Value::from(json) {
            Value::Map(m) => Some(Navigator::from_map(m)),
            Value::List(l) => Some(Navigator::from_list(l)),
            _ => None,
        }
    }
}

// ============================================================================
// Value → JSON
// ============================================================================

impl Value {
    /// Render as JSON.
    ///
    /// Fails for source capabilities (opaque) and non-finite floats (JSON
    /// has no representation for them). Bytes render as a number array,
    /// matching serde_json's own byte representation.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        use serde_json::Value as Json;
        Ok(match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::I8(v) => Json::from(*v),
            Value::I16(v) => Json::from(*v),
            Value::I32(v) => Json::from(*v),
            Value::I64(v) => Json::from(*v),
            Value::Isize(v) => Json::from(*v as i64),
            Value::U8(v) => Json::from(*v),
            Value::U16(v) => Json::from(*v),
            Value::U32(v) => Json::from(*v),
            Value::U64(v) => Json::from(*v),
            Value::Usize(v) => Json::from(*v as u64),
            Value::F32(v) => float_to_json(f64::from(*v), self.type_name())?,
            Value::F64(v) => float_to_json(*v, self.type_name())?,
            Value::String(s) => Json::String(s.clone()),
            Value::Bytes(b) => Json::Array(b.iter().map(|&x| Json::from(x)).collect()),
            Value::List(l) => {
                let items = l.read().clone();
                Json::Array(items.iter().map(Value::to_json).collect::<Result<_>>()?)
            }
            Value::Map(m) => {
                let entries = m.read().clone();
                let mut obj = serde_json::Map::with_capacity(entries.len());
                for (k, v) in &entries {
                    obj.insert(k.clone(), v.to_json()?);
                }
                Json::Object(obj)
            }
            Value::Source(_) => return Err(Error::Json { kind: self.type_name() }),
        })
    }
}

fn float_to_json(v: f64, kind: &'static str) -> Result<serde_json::Value> {
    serde_json::Number::from_f64(v)
        .map(serde_json::Value::Number)
        .ok_or(Error::Json { kind })
}

// ============================================================================
// Fallible extraction (TryFrom)
// ============================================================================

macro_rules! impl_try_from_numeric {
    ($($ty:ty),* $(,)?) => {$(
        /// Numeric extraction with the same coercion rule the navigator
        /// uses; fails only for non-numeric kinds.
        impl TryFrom<Value> for $ty {
            type Error = Error;

            fn try_from(value: Value) -> Result<Self> {
                <$ty as Numeric>::coerce(&value).ok_or(Error::Type {
                    expected: <$ty as Numeric>::KIND.type_name(),
                    got: value.type_name(),
                })
            }
        }
    )*};
}

impl_try_from_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::Type { expected: "STRING", got: other.type_name() }),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::Type { expected: "BOOLEAN", got: other.type_name() }),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(b) => Ok(b),
            other => Err(Error::Type { expected: "BYTES", got: other.type_name() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip() {
        let doc = json!({
            "name": "ada",
            "port": 8080,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "nested": { "on": true }
        });
        let value = Value::from(doc.clone());
        assert_eq!(value.to_json().unwrap(), doc);
    }

    #[test]
    fn test_json_number_widths() {
        assert_eq!(Value::from(json!(1)), Value::I64(1));
        assert_eq!(Value::from(json!(u64::MAX)), Value::U64(u64::MAX));
        assert_eq!(Value::from(json!(1.5)), Value::F64(1.5));
    }

    #[test]
    fn test_non_finite_float_is_unrepresentable() {
        assert!(Value::F64(f64::INFINITY).to_json().is_err());
        assert!(Value::F64(1.0).to_json().is_ok());
    }

    #[test]
    fn test_try_from_coerces_numerics() {
        assert_eq!(i64::try_from(Value::F64(3.9)).unwrap(), 3);
        assert_eq!(u8::try_from(Value::I64(-1)).unwrap(), 255);
        let err = i64::try_from(Value::from("3")).unwrap_err();
        assert_eq!(err.to_string(), "type error: expected INT64, got STRING");
    }

    #[test]
    fn test_try_from_exact_kinds() {
        assert_eq!(String::try_from(Value::from("x")).unwrap(), "x");
        assert!(String::try_from(Value::I64(1)).is_err());
        assert!(bool::try_from(Value::I64(1)).is_err());
        assert_eq!(Vec::<u8>::try_from(Value::bytes(vec![9])).unwrap(), vec![9]);
    }

    #[test]
    fn test_from_json_entry_point() {
        let nav = Navigator::from_json(json!({"a": {"b": 2}})).unwrap();
        assert_eq!(nav.i32(&crate::Qual::new("a.b"), None), 2);
        assert!(Navigator::from_json(json!(42)).is_none());
    }
}
