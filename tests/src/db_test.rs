use crate::{ExecLog, MemoryExecutor};

use ovsdb_orm::{cache::TableUpdates, db::Builder, Cache, Db, Row};

use std::sync::Arc;

/// A database over an in-memory executor, with direct access to the cache
/// for seeding rows the way the sync subsystem would.
pub struct DbTest {
    cache: Arc<Cache>,
    executor: MemoryExecutor,
}

impl DbTest {
    pub fn new() -> Self {
        let cache = Arc::new(Cache::new());
        Self {
            executor: MemoryExecutor::new(cache.clone()),
            cache,
        }
    }

    /// Try to setup a database with models, returns Result for error handling
    pub fn try_setup_db(&self, mut builder: Builder) -> ovsdb_orm::Result<Db> {
        builder.cache(self.cache.clone()).build(self.executor.clone())
    }

    /// Setup a database with models
    pub fn setup_db(&self, builder: Builder) -> Db {
        self.try_setup_db(builder).unwrap()
    }

    /// Places `row` in the cache under `id`.
    pub fn seed(&self, table: &str, id: &str, row: Row) {
        self.cache.apply(TableUpdates::new().insert(table, id, row));
    }

    /// Removes the row `id`, as a monitor delete notification would.
    pub fn remove(&self, table: &str, id: &str) {
        let old = self.cache.lookup(table, id).unwrap_or_default();
        self.cache.apply(TableUpdates::new().delete(table, id, old));
    }

    pub fn cache(&self) -> &Arc<Cache> {
        &self.cache
    }

    /// Get the operations log for assertions
    pub fn exec_log(&self) -> ExecLog {
        self.executor.log()
    }
}

impl Default for DbTest {
    fn default() -> Self {
        Self::new()
    }
}
