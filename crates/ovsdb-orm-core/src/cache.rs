mod update;
pub use update::{RowUpdate, TableUpdates};

use crate::wire::Row;

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard},
};

type Table = HashMap<String, Row>;

/// Local mirror of the database, per table and row identifier.
///
/// One cache is created per session and shared as `Arc<Cache>` between the
/// sync subsystem, which is the only writer, and every reader. A batch of
/// updates is applied under a single write guard, so readers never observe
/// a partially applied batch.
#[derive(Debug, Default)]
pub struct Cache {
    tables: RwLock<HashMap<String, Table>>,
}

/// A consistent view of the cache, held for the duration of a read.
#[derive(Debug)]
pub struct CacheRead<'a> {
    tables: RwLockReadGuard<'a, HashMap<String, Table>>,
}

impl Cache {
    pub fn new() -> Cache {
        Cache::default()
    }

    /// Returns a copy of the row `id` of `table`.
    pub fn lookup(&self, table: &str, id: &str) -> Option<Row> {
        self.read().lookup(table, id).cloned()
    }

    /// Takes a shared guard over the whole cache.
    pub fn read(&self) -> CacheRead<'_> {
        CacheRead {
            tables: self.tables.read().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Applies one batch of row updates and returns the number of rows
    /// changed.
    pub fn apply(&self, updates: TableUpdates) -> usize {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let mut changed = 0;

        for (table, rows) in updates {
            let entries = tables.entry(table.clone()).or_default();

            for (id, update) in rows {
                match update.new {
                    Some(row) => {
                        tracing::trace!(table = %table, uuid = %id, "cache row replaced");
                        entries.insert(id, row);
                        changed += 1;
                    }
                    None => {
                        if entries.remove(&id).is_some() {
                            tracing::trace!(table = %table, uuid = %id, "cache row removed");
                            changed += 1;
                        }
                    }
                }
            }
        }

        tracing::debug!(changed, "applied cache update batch");
        changed
    }

    /// Drops every table, e.g. before resynchronizing after a reconnect.
    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        tracing::debug!("cache cleared");
    }
}

impl CacheRead<'_> {
    pub fn lookup(&self, table: &str, id: &str) -> Option<&Row> {
        self.tables.get(table)?.get(id)
    }

    /// Iterates the rows of `table` in no particular order.
    pub fn scan(&self, table: &str) -> impl Iterator<Item = (&str, &Row)> + '_ {
        self.tables
            .get(table)
            .into_iter()
            .flat_map(|rows| rows.iter().map(|(id, row)| (id.as_str(), row)))
    }

    pub fn len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, HashMap::len)
    }
}
