use super::Operation;
use crate::driver::Condition;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delete {
    /// Which table to delete from
    pub table: String,

    /// Rows matching every condition are deleted
    #[serde(rename = "where")]
    pub conditions: Vec<Condition>,
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
