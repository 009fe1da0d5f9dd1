use crate::wire::Row;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A batch of row changes, as carried by an RFC 7047 `update` notification
/// (`{table: {uuid: {"old": row, "new": row}}}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableUpdates {
    tables: IndexMap<String, IndexMap<String, RowUpdate>>,
}

/// The change to one row. A missing `new` means the row was deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Row>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Row>,
}

impl TableUpdates {
    pub fn new() -> TableUpdates {
        TableUpdates::default()
    }

    pub fn push(&mut self, table: impl Into<String>, id: impl Into<String>, update: RowUpdate) {
        self.tables
            .entry(table.into())
            .or_default()
            .insert(id.into(), update);
    }

    pub fn insert(mut self, table: impl Into<String>, id: impl Into<String>, row: Row) -> Self {
        self.push(table, id, RowUpdate { old: None, new: Some(row) });
        self
    }

    pub fn modify(
        mut self,
        table: impl Into<String>,
        id: impl Into<String>,
        old: Row,
        new: Row,
    ) -> Self {
        self.push(table, id, RowUpdate { old: Some(old), new: Some(new) });
        self
    }

    pub fn delete(mut self, table: impl Into<String>, id: impl Into<String>, old: Row) -> Self {
        self.push(table, id, RowUpdate { old: Some(old), new: None });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(IndexMap::is_empty)
    }
}

impl IntoIterator for TableUpdates {
    type Item = (String, IndexMap<String, RowUpdate>);
    type IntoIter = indexmap::map::IntoIter<String, IndexMap<String, RowUpdate>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}
