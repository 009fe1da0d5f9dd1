use super::Operation;
use crate::{driver::Condition, wire::Row};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Update {
    pub table: String,

    #[serde(rename = "where")]
    pub conditions: Vec<Condition>,

    /// Columns to overwrite. Columns not listed keep their value.
    pub row: Row,
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
