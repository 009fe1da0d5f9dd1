use crate::wire::{Row, Uuid};

use serde::{Deserialize, Serialize};

/// The outcome of one operation, as returned in a `transact` reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Identifier of the inserted row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,

    /// Number of rows deleted, updated or mutated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl OperationResult {
    pub fn inserted(uuid: impl Into<Uuid>) -> OperationResult {
        OperationResult {
            uuid: Some(uuid.into()),
            ..Default::default()
        }
    }

    pub fn count(count: u64) -> OperationResult {
        OperationResult {
            count: Some(count),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
