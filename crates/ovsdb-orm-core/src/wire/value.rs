use super::Uuid;
use crate::{err, Result};

use serde::{ser::SerializeSeq, Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed 64-bit integer
    Integer(i64),

    /// Boolean value
    Boolean(bool),

    /// String value
    String(String),

    /// Reference to a row, by UUID or named UUID
    Uuid(Uuid),

    /// Explicit set container. Elements are atoms.
    Set(Vec<Value>),

    /// Untagged literal sequence of atoms, as produced by in-process row
    /// builders that did not wrap their values in a set.
    List(Vec<Value>),

    /// String to string map
    Map(BTreeMap<String, String>),
}

impl Value {
    pub fn uuid(id: impl Into<Uuid>) -> Self {
        Self::Uuid(id.into())
    }

    pub fn set_from_vec(items: Vec<Self>) -> Self {
        Self::Set(items)
    }

    /// An empty set, the wire form of "no value" for optional columns.
    pub fn empty_set() -> Self {
        Self::Set(vec![])
    }

    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            Self::Integer(_) | Self::Boolean(_) | Self::String(_) | Self::Uuid(_)
        )
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_) | Self::List(_))
    }

    /// Returns the elements of a set or list.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Self::Set(items) | Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the wire type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::String(_) => "string",
            Self::Uuid(_) => "uuid",
            Self::Set(_) => "set",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Parses a value from its RFC 7047 JSON notation.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;

        match json {
            Json::Array(mut items) if items.len() == 2 => {
                let payload = items.pop().unwrap_or_default();
                let tag = items.pop().unwrap_or_default();
                match tag.as_str() {
                    Some("set") => {
                        let Json::Array(elements) = payload else {
                            return Err(err!("`set` payload must be an array"));
                        };
                        elements
                            .into_iter()
                            .map(Self::atom_from_json)
                            .collect::<Result<Vec<_>>>()
                            .map(Self::Set)
                    }
                    Some("map") => {
                        let Json::Array(pairs) = payload else {
                            return Err(err!("`map` payload must be an array"));
                        };
                        let mut map = BTreeMap::new();
                        for pair in pairs {
                            let (key, value) = serde_json::from_value::<(String, String)>(pair)
                                .map_err(|e| err!("map entries must be string pairs: {e}"))?;
                            map.insert(key, value);
                        }
                        Ok(Self::Map(map))
                    }
                    Some("uuid" | "named-uuid") => {
                        Self::atom_from_json(Json::Array(vec![tag, payload]))
                    }
                    _ => Err(err!("unknown value notation {tag}")),
                }
            }
            other => Self::atom_from_json(other),
        }
    }

    fn atom_from_json(json: serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;

        match json {
            Json::Bool(v) => Ok(Self::Boolean(v)),
            Json::String(v) => Ok(Self::String(v)),
            Json::Number(n) => {
                if let Some(v) = n.as_i64() {
                    return Ok(Self::Integer(v));
                }
                // Integral values may arrive in floating point notation.
                // `i64::MAX as f64` rounds up to 2^63, which is out of range.
                match n.as_f64() {
                    Some(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
                        Ok(Self::Integer(v as i64))
                    }
                    _ => Err(err!("number {n} is not an exact integer")),
                }
            }
            json @ Json::Array(_) => serde_json::from_value::<Uuid>(json)
                .map(Self::Uuid)
                .map_err(|e| err!("invalid atom: {e}")),
            other => Err(err!("invalid atom {other}")),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<BTreeMap<String, String>> for Value {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self::Map(value)
    }
}

impl Serialize for Value {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Boolean(v) => serializer.serialize_bool(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Uuid(v) => v.serialize(serializer),
            Self::Set(items) | Self::List(items) => ("set", items).serialize(serializer),
            Self::Map(map) => ("map", Pairs(map)).serialize(serializer),
        }
    }
}

struct Pairs<'a>(&'a BTreeMap<String, String>);

impl Serialize for Pairs<'_> {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> core::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for pair in self.0 {
            seq.serialize_element(&pair)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Value::from_json(json).map_err(serde::de::Error::custom)
    }
}
