mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod mutate;
pub use mutate::Mutate;

mod update;
pub use update::Update;

use serde::Serialize;

/// One operation of a `transact` request.
///
/// Serializes to the RFC 7047 operation object, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    /// Insert a new row
    Insert(Insert),

    /// Delete the rows matching the conditions
    Delete(Delete),

    /// Apply set deltas to the rows matching the conditions
    Mutate(Mutate),

    /// Overwrite columns of the rows matching the conditions
    Update(Update),
}

impl Operation {
    pub fn table(&self) -> &str {
        match self {
            Operation::Insert(op) => &op.table,
            Operation::Delete(op) => &op.table,
            Operation::Mutate(op) => &op.table,
            Operation::Update(op) => &op.table,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Insert(_) => "insert",
            Operation::Delete(_) => "delete",
            Operation::Mutate(_) => "mutate",
            Operation::Update(_) => "update",
        }
    }
}
