use super::Db;
use crate::{engine::Engine, Model, Result};

use ovsdb_orm_core::{schema::ModelSchema, Cache, Executor, Schema};

use std::{any::TypeId, sync::Arc};

/// Database name used when none is configured.
pub const DEFAULT_DATABASE: &str = "OVN_Northbound";

#[derive(Debug, Default)]
pub struct Builder {
    /// Described model types, in registration order
    models: Vec<(TypeId, Result<Arc<ModelSchema>>)>,

    database: Option<String>,

    /// Cache shared with the sync subsystem
    cache: Option<Arc<Cache>>,
}

impl Builder {
    /// Adds a model type to the active model set.
    ///
    /// The type is described immediately; an invalid model is reported by
    /// [`Builder::build`].
    pub fn register<T: Model>(&mut self) -> &mut Self {
        self.models.push((TypeId::of::<T>(), T::schema()));
        self
    }

    /// Sets the database transactions are sent to.
    pub fn database(&mut self, name: impl Into<String>) -> &mut Self {
        self.database = Some(name.into());
        self
    }

    /// Uses `cache` instead of a fresh, empty one.
    pub fn cache(&mut self, cache: Arc<Cache>) -> &mut Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(&mut self, executor: impl Executor) -> Result<Db> {
        self.build_with(Arc::new(executor))
    }

    pub fn build_with(&mut self, executor: Arc<dyn Executor>) -> Result<Db> {
        let mut schema = Schema::default();
        for (ty, model) in &self.models {
            schema.register(*ty, model.clone()?)?;
        }

        let database = self
            .database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        tracing::debug!(models = schema.len(), database = %database, "built db");

        Ok(Db {
            engine: Arc::new(Engine {
                schema,
                cache: self.cache.clone().unwrap_or_default(),
                executor,
                database,
            }),
        })
    }
}
