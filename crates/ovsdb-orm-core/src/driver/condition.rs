use crate::wire::{Row, Value, UUID_COLUMN};

use serde::{Serialize, Serializer};

/// An equality condition, `[column, "==", value]` on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub value: Value,
}

impl Condition {
    pub fn equal(column: impl Into<String>, value: impl Into<Value>) -> Condition {
        Condition {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Matches the row identified by `id`.
    pub fn uuid(id: impl Into<String>) -> Condition {
        Condition::equal(UUID_COLUMN, Value::uuid(id.into()))
    }

    /// Evaluates the condition against the row `id`.
    ///
    /// Sets compare without regard to element order.
    pub fn matches(&self, id: &str, row: &Row) -> bool {
        if self.column == UUID_COLUMN {
            return match &self.value {
                Value::Uuid(uuid) => uuid.as_str() == id,
                Value::String(v) => v == id,
                _ => false,
            };
        }

        match (row.get(&self.column), &self.value) {
            (Some(lhs), rhs) if lhs.is_set() && rhs.is_set() => {
                let (lhs, rhs) = (lhs.as_elements(), rhs.as_elements());
                match (lhs, rhs) {
                    (Some(lhs), Some(rhs)) => {
                        lhs.len() == rhs.len() && lhs.iter().all(|item| rhs.contains(item))
                    }
                    _ => false,
                }
            }
            (Some(lhs), rhs) => lhs == rhs,
            (None, _) => false,
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.column, "==", &self.value).serialize(serializer)
    }
}
