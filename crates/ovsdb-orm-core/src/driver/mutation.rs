use crate::wire::Value;

use serde::{Serialize, Serializer};

/// A set delta, `[column, mutator, value]` on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub column: String,
    pub mutator: Mutator,

    /// Elements to add or remove, as a set
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutator {
    Insert,
    Delete,
}

impl Mutator {
    pub fn as_str(self) -> &'static str {
        match self {
            Mutator::Insert => "insert",
            Mutator::Delete => "delete",
        }
    }
}

impl Mutation {
    /// Applies the delta to `value`, the current content of the column.
    ///
    /// Used by executors that evaluate mutations locally.
    pub fn apply_to(&self, value: Option<&Value>) -> Value {
        let mut elements: Vec<Value> = value
            .and_then(Value::as_elements)
            .map(<[Value]>::to_vec)
            .or_else(|| value.filter(|v| v.is_atom()).map(|v| vec![v.clone()]))
            .unwrap_or_default();

        let delta = self.value.as_elements().unwrap_or(std::slice::from_ref(&self.value));

        match self.mutator {
            Mutator::Insert => {
                for item in delta {
                    if !elements.contains(item) {
                        elements.push(item.clone());
                    }
                }
            }
            Mutator::Delete => elements.retain(|item| !delta.contains(item)),
        }

        Value::Set(elements)
    }
}

impl Serialize for Mutation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.column, self.mutator.as_str(), &self.value).serialize(serializer)
    }
}
