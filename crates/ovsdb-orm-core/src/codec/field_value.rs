use std::collections::BTreeMap;

/// A field value in the mapper's typed vocabulary.
///
/// This is what a model hands to the codec on encode and receives back on
/// decode. `Primitive` implementations convert between it and the field's
/// Rust type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Boolean(bool),
    String(String),
    Map(BTreeMap<String, String>),
    List(Vec<FieldValue>),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "integer",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::String(_) => "string",
            FieldValue::Map(_) => "map",
            FieldValue::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns `true` if the value carries no information for an equality
    /// lookup: an empty string, map or list.
    ///
    /// Integers and booleans have no such representation and are never
    /// unset.
    pub fn is_unset(&self) -> bool {
        match self {
            FieldValue::String(v) => v.is_empty(),
            FieldValue::Map(v) => v.is_empty(),
            FieldValue::List(v) => v.is_empty(),
            FieldValue::Integer(_) | FieldValue::Boolean(_) => false,
        }
    }

    /// Structural equality where lists compare as multisets.
    pub fn matches(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::List(lhs), FieldValue::List(rhs)) => {
                if lhs.len() != rhs.len() {
                    return false;
                }
                let mut used = vec![false; rhs.len()];
                lhs.iter().all(|item| {
                    let found = rhs
                        .iter()
                        .enumerate()
                        .find(|(i, candidate)| !used[*i] && item.matches(candidate));
                    match found {
                        Some((i, _)) => {
                            used[i] = true;
                            true
                        }
                        None => false,
                    }
                })
            }
            (lhs, rhs) => lhs == rhs,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}
