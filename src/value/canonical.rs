//! Canonical value tree handed to query engines.

use super::value::{Number, Value};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical represents a query-engine compatible value.
///
/// Numeric leaves are restricted to the machine integer, the double-precision
/// float and the arbitrary-precision integer. Build one from a raw
/// [`Value`](super::Value) with [`normalize`](super::normalize).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Canonical {
    #[default]
    Null,
    Bool(bool),
    Int(isize),
    Float(f64),
    BigInt(BigInt),
    String(String),
    List(Vec<Canonical>),
    Map(BTreeMap<String, Canonical>),
}

impl Canonical {
    pub fn is_null(&self) -> bool {
        matches!(self, Canonical::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Canonical::Map(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Canonical::List(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Canonical::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<isize> {
        match self {
            Canonical::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Canonical::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Canonical>> {
        match self {
            Canonical::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Canonical>> {
        match self {
            Canonical::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Canonical> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl Serialize for Canonical {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Canonical::Null => serializer.serialize_unit(),
            Canonical::Bool(b) => serializer.serialize_bool(*b),
            Canonical::Int(i) => serializer.serialize_i64(*i as i64),
            Canonical::Float(f) => serializer.serialize_f64(*f),
            Canonical::BigInt(n) => match n.to_i128() {
                Some(i) => serializer.serialize_i128(i),
                None => serializer.serialize_str(&n.to_string()),
            },
            Canonical::String(s) => serializer.serialize_str(s),
            Canonical::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Canonical::Map(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for Canonical {
    /// Renders the value as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl From<bool> for Canonical {
    fn from(b: bool) -> Self {
        Canonical::Bool(b)
    }
}

impl From<isize> for Canonical {
    fn from(i: isize) -> Self {
        Canonical::Int(i)
    }
}

impl From<f64> for Canonical {
    fn from(f: f64) -> Self {
        Canonical::Float(f)
    }
}

impl From<&str> for Canonical {
    fn from(s: &str) -> Self {
        Canonical::String(s.to_string())
    }
}

impl From<String> for Canonical {
    fn from(s: String) -> Self {
        Canonical::String(s)
    }
}

impl From<Canonical> for Value {
    fn from(c: Canonical) -> Self {
        match c {
            Canonical::Null => Value::Null,
            Canonical::Bool(b) => Value::Bool(b),
            Canonical::Int(i) => Value::Number(Number::Isize(i)),
            Canonical::Float(f) => Value::Number(Number::F64(f)),
            Canonical::BigInt(n) => Value::Number(Number::BigInt(n)),
            Canonical::String(s) => Value::String(s),
            Canonical::List(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Canonical::Map(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Canonical> for serde_json::Value {
    fn from(c: Canonical) -> Self {
        match c {
            Canonical::Null => serde_json::Value::Null,
            Canonical::Bool(b) => serde_json::Value::Bool(b),
            Canonical::Int(i) => serde_json::Value::from(i as i64),
            Canonical::Float(f) => serde_json::Value::from(f),
            Canonical::BigInt(n) => {
                if let Some(i) = n.to_i64() {
                    serde_json::Value::from(i)
                } else if let Some(u) = n.to_u64() {
                    serde_json::Value::from(u)
                } else {
                    serde_json::Value::String(n.to_string())
                }
            }
            Canonical::String(s) => serde_json::Value::String(s),
            Canonical::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Canonical::Map(fields) => serde_json::Value::Object(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}
