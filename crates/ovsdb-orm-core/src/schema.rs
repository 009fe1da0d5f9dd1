mod field;
pub use field::{FieldDecl, FieldDescriptor};

mod kind;
pub use kind::{Element, Kind, Shape};

mod model;
pub use model::ModelSchema;

mod tag;
use tag::Tag;

use crate::{Error, Result};

use indexmap::IndexMap;
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

/// The active model set: every registered model type and the table it is
/// bound to.
#[derive(Debug, Default)]
pub struct Schema {
    models: IndexMap<TypeId, Arc<ModelSchema>>,
    tables: HashMap<String, TypeId>,
}

impl Schema {
    /// Adds a described model type. Two types may not share a table.
    pub fn register(&mut self, ty: TypeId, model: Arc<ModelSchema>) -> Result<()> {
        match self.tables.get(&model.table) {
            Some(existing) if *existing == ty => return Ok(()),
            Some(_) => return Err(Error::duplicate_table(&model.table)),
            None => {}
        }

        self.tables.insert(model.table.clone(), ty);
        self.models.insert(ty, model);
        Ok(())
    }

    pub fn model(&self, ty: TypeId) -> Option<&Arc<ModelSchema>> {
        self.models.get(&ty)
    }

    pub fn table(&self, table: &str) -> Option<&Arc<ModelSchema>> {
        self.tables.get(table).and_then(|ty| self.models.get(ty))
    }

    /// Like [`Schema::table`], failing with a schema error.
    pub fn expect_table(&self, table: &str) -> Result<&Arc<ModelSchema>> {
        self.table(table).ok_or_else(|| Error::unknown_table(table))
    }

    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.models.values().map(|model| model.table.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

type Descriptors = RwLock<HashMap<TypeId, Result<Arc<ModelSchema>>>>;

/// Describes the model type `ty`, once per process.
///
/// The first call validates `decls()` and caches the outcome, including a
/// failure, so every later call for the same type is a map lookup.
pub fn describe_type(
    ty: TypeId,
    table: &str,
    decls: impl FnOnce() -> Vec<FieldDecl>,
) -> Result<Arc<ModelSchema>> {
    static DESCRIPTORS: OnceLock<Descriptors> = OnceLock::new();
    let descriptors = DESCRIPTORS.get_or_init(Default::default);

    if let Some(described) = descriptors
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&ty)
    {
        return described.clone();
    }

    let described = ModelSchema::describe(table, &decls()).map(Arc::new);
    descriptors
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(ty)
        .or_insert(described)
        .clone()
}
