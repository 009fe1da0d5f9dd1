mod builder;
pub use builder::ModelMutation;

pub(crate) mod mapper;
pub(crate) mod matcher;

use crate::{Model, Result};

use ovsdb_orm_core::{schema::ModelSchema, Cache, Error, Executor, Schema};

use std::{
    any::{type_name, TypeId},
    sync::Arc,
};

/// Resolves models against the active model set and the cache.
#[derive(Debug)]
pub(crate) struct Engine {
    /// Registered model types
    pub(crate) schema: Schema,

    /// Mirror of the database, written by the sync subsystem
    pub(crate) cache: Arc<Cache>,

    /// Runs built commands
    pub(crate) executor: Arc<dyn Executor>,

    /// Database name sent with every transaction
    pub(crate) database: String,
}

impl Engine {
    pub(crate) fn model_schema<M: Model>(&self) -> Result<&Arc<ModelSchema>> {
        self.schema
            .model(TypeId::of::<M>())
            .ok_or_else(|| Error::unknown_model(type_name::<M>()))
    }

    pub(crate) fn find_by_id<M: Model>(&self, id: &str) -> Result<M> {
        let schema = self.model_schema::<M>()?;
        let cache = self.cache.read();

        let row = cache.lookup(&schema.table, id).ok_or_else(|| {
            Error::record_not_found(format!("table={} uuid={id}", schema.table))
        })?;

        let mut model = M::default();
        mapper::decode(schema, id, row, &mut model)?;
        Ok(model)
    }

    pub(crate) fn find_by_index<M: Model>(&self, probe: &M, names: &[&str]) -> Result<Vec<M>> {
        let schema = self.model_schema::<M>()?;
        let cache = self.cache.read();
        let probe = matcher::probe(schema, probe, names)?;

        matcher::find(schema, &cache, &probe)?
            .into_iter()
            .map(|(id, row)| {
                let mut model = M::default();
                mapper::decode(schema, &id, &row, &mut model)?;
                Ok(model)
            })
            .collect()
    }

    pub(crate) fn list<M: Model>(&self) -> Result<Vec<M>> {
        let schema = self.model_schema::<M>()?;
        let cache = self.cache.read();

        let mut rows: Vec<_> = cache.scan(&schema.table).collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));

        rows.into_iter()
            .map(|(id, row)| {
                let mut model = M::default();
                mapper::decode(schema, id, row, &mut model)?;
                Ok(model)
            })
            .collect()
    }
}
