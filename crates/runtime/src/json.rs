//! JSON exchange for the value model
//!
//! Plorth values are JSON-compatible by design, so the natural exchange
//! representation for hosts is `serde_json::Value`. Conversion is total in
//! the JSON-to-value direction; in the other direction the code-carrying
//! tags (symbol, quote, word) and errors refuse, since code is not data.
//!
//! Note that [`crate::value::Value::to_source`] is not implemented on top
//! of this module: the source form escapes every codepoint outside
//! printable ASCII, which is stricter than serde_json's encoder.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::ser::{Error as _, Serialize, Serializer};

use crate::rope::Rope;
use crate::value::{Number, Value, ValueType};

/// Error converting a value into JSON.
#[derive(Debug, PartialEq)]
pub enum JsonError {
    /// The tag has no JSON representation.
    UnsupportedType(ValueType),
    /// NaN or infinity.
    NonFiniteNumber(f64),
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::UnsupportedType(value_type) => {
                write!(f, "{value_type} values cannot be represented as JSON")
            }
            JsonError::NonFiniteNumber(value) => {
                write!(f, "cannot represent non-finite number {value} as JSON")
            }
        }
    }
}

impl std::error::Error for JsonError {}

/// Converts a value into its JSON representation.
pub fn to_json(value: &Value) -> Result<serde_json::Value, JsonError> {
    match value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Boolean(value) => Ok(serde_json::Value::Bool(*value)),
        Value::Number(Number::Int(value)) => Ok(serde_json::Value::from(*value)),
        Value::Number(Number::Real(value)) => serde_json::Number::from_f64(*value)
            .map(serde_json::Value::Number)
            .ok_or(JsonError::NonFiniteNumber(*value)),
        Value::String(value) => Ok(serde_json::Value::String(value.flatten())),
        Value::Array(elements) => {
            let mut output = Vec::with_capacity(elements.len());

            for element in elements.iter() {
                output.push(to_json(element)?);
            }
            Ok(serde_json::Value::Array(output))
        }
        Value::Object(object) => {
            let mut output = serde_json::Map::with_capacity(object.properties().len());

            for (key, value) in object.properties() {
                output.insert(key.clone(), to_json(value)?);
            }
            Ok(serde_json::Value::Object(output))
        }
        other => Err(JsonError::UnsupportedType(other.value_type())),
    }
}

/// Builds a value from its JSON representation. Numbers become integers
/// when they fit one and reals otherwise.
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(value) => Value::Boolean(*value),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(value) => Value::Number(Number::Int(value)),
            None => Value::Number(Number::Real(number.as_f64().unwrap_or(f64::NAN))),
        },
        serde_json::Value::String(text) => Value::String(Rope::from_str(text)),
        serde_json::Value::Array(elements) => {
            Value::Array(Rc::from(elements.iter().map(from_json).collect::<Vec<_>>()))
        }
        serde_json::Value::Object(properties) => {
            let properties: HashMap<String, Value> = properties
                .iter()
                .map(|(key, value)| (key.clone(), from_json(value)))
                .collect();
            Value::Object(Rc::new(crate::object::Object::new(properties)))
        }
    }
}

// Lets hosts hand values straight to serde_json writers; code-carrying
// values fail with a serialization error instead of a panic.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json(self)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::Quote;
    use std::collections::HashMap;

    #[test]
    fn test_scalars_round_trip() {
        for value in [
            Value::Null,
            Value::Boolean(true),
            Value::Number(Number::Int(-3)),
            Value::Number(Number::Real(2.5)),
            Value::String(Rope::from_str("héllo")),
        ] {
            let json = to_json(&value).unwrap();
            assert!(from_json(&json).equals(&value));
        }
    }

    #[test]
    fn test_nested_structures() {
        let object = Value::Object(Rc::new(crate::object::Object::new(HashMap::from([(
            "xs".to_string(),
            Value::Array(Rc::from(vec![
                Value::Number(Number::Int(1)),
                Value::Null,
            ])),
        )]))));

        let json = to_json(&object).unwrap();
        assert_eq!(json, serde_json::json!({"xs": [1, null]}));
        assert!(from_json(&json).equals(&object));
    }

    #[test]
    fn test_rope_shape_is_invisible() {
        let tree = Value::String(Rope::concat(Rope::from_str("foo"), Rope::from_str("bar")));
        assert_eq!(to_json(&tree).unwrap(), serde_json::json!("foobar"));
    }

    #[test]
    fn test_quotes_refuse() {
        let quote = Value::Quote(Rc::new(Quote::Compiled(vec![])));
        assert_eq!(
            to_json(&quote),
            Err(JsonError::UnsupportedType(ValueType::Quote))
        );
    }

    #[test]
    fn test_non_finite_numbers_refuse() {
        let nan = Value::Number(Number::Real(f64::NAN));
        assert!(matches!(
            to_json(&nan),
            Err(JsonError::NonFiniteNumber(_))
        ));
    }

    #[test]
    fn test_serde_integration() {
        let value = Value::Array(Rc::from(vec![
            Value::Boolean(false),
            Value::String(Rope::from_str("x")),
        ]));
        assert_eq!(serde_json::to_string(&value).unwrap(), "[false,\"x\"]");
    }
}
