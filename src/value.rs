use std::collections::BTreeMap;

use derive_ex::derive_ex;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A positional JSON-RPC parameter.
///
/// Covers the JSON data model as a closed union. Unlike [`serde_json::Value`] it is
/// `Eq` and `Hash`, so call descriptors built from it can be used as cache keys.
/// Object entries are kept sorted by key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
#[derive_ex(Eq, PartialEq, Hash)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Only for integers above `i64::MAX`; smaller ones are always `Int`.
    UInt(u64),
    Float(#[eq(key = OrderedFloat($))] f64),
    String(String),
    Array(Vec<ParamValue>),
    Object(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(n) => Value::from(*n),
            Self::UInt(n) => Value::from(*n),
            // -0.0 == 0.0 under `OrderedFloat`, so they must convert to the same value.
            Self::Float(f) if *f == 0.0 => Value::from(0.0),
            Self::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Self::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(n) = n.as_i64() {
                    Self::Int(n)
                } else if let Some(n) = n.as_u64() {
                    Self::UInt(n)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}
impl From<ParamValue> for Value {
    fn from(value: ParamValue) -> Self {
        value.to_value()
    }
}
impl From<&ParamValue> for Value {
    fn from(value: &ParamValue) -> Self {
        value.to_value()
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    Self::Int(value.into())
                }
            }
        )*
    };
}
impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// `UInt` only holds values above `i64::MAX`, matching what deserialization produces.
impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Int)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}
impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
impl<T: Into<ParamValue>> From<BTreeMap<String, T>> for ParamValue {
    fn from(value: BTreeMap<String, T>) -> Self {
        Self::Object(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}
