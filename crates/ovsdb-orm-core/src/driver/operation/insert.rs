use super::Operation;
use crate::wire::Row;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insert {
    /// Which table to insert into
    pub table: String,

    /// Column values of the new row
    pub row: Row,

    /// Name other operations of the same transaction use to reference the
    /// new row
    #[serde(rename = "uuid-name", skip_serializing_if = "Option::is_none")]
    pub uuid_name: Option<String>,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
