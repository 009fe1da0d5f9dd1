use serde::{Deserialize, Serialize};
use std::fmt;

/// A row identifier on the wire.
///
/// A string that parses as an RFC 4122 UUID refers to a persisted row. Any
/// other string is a *named* UUID, which only has meaning inside the
/// transaction whose insert declared it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uuid(String);

impl Uuid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` if this identifier is a transaction-local name rather
    /// than a database-assigned UUID.
    pub fn is_named(&self) -> bool {
        ::uuid::Uuid::parse_str(&self.0).is_err()
    }

    /// Returns `true` if this identifier can be declared as the `uuid-name`
    /// of an insert: an RFC 7047 `<id>`, made of ASCII letters, digits and
    /// underscores and not starting with a digit.
    pub fn is_declarable(&self) -> bool {
        let mut chars = self.0.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Produces a fresh named UUID: `row` followed by a random v4 UUID with
    /// dashes replaced by underscores, which keeps it a valid OVSDB `<id>`.
    pub fn generate_named() -> Self {
        let uuid = ::uuid::Uuid::new_v4().to_string().replace('-', "_");
        Self(format!("row{uuid}"))
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Uuid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Uuid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<Uuid> for String {
    fn from(value: Uuid) -> Self {
        value.0
    }
}

impl Serialize for Uuid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tag = if self.is_named() { "named-uuid" } else { "uuid" };
        (tag, &self.0).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Uuid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (tag, id) = <(String, String)>::deserialize(deserializer)?;
        match tag.as_str() {
            "uuid" | "named-uuid" => Ok(Self(id)),
            _ => Err(serde::de::Error::custom(format!(
                "expected `uuid` or `named-uuid`, found `{tag}`"
            ))),
        }
    }
}
