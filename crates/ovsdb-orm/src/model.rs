use crate::Result;

use ovsdb_orm_core::{
    codec::FieldValue,
    schema::{self, FieldDecl, ModelSchema},
};

use std::{any::TypeId, sync::Arc};

/// A typed record bound to a table.
///
/// Implemented by `#[derive(Model)]`. Fields are addressed by their position
/// in the struct declaration, as listed by [`Model::declare`].
pub trait Model: Default + Send + Sync + 'static {
    /// Table the model maps to
    const TABLE: &'static str;

    /// Declarations of the bound struct fields, in declaration order.
    fn declare() -> Vec<FieldDecl>;

    /// Loads a decoded value into the field at `index`.
    fn load_field(&mut self, index: usize, column: &str, value: Option<FieldValue>) -> Result<()>;

    /// Reads the field at `index`. `None` when the field holds no value or
    /// is not bound.
    fn field(&self, index: usize) -> Option<FieldValue>;

    /// Describes the model, validating its declarations on first use.
    fn schema() -> Result<Arc<ModelSchema>> {
        schema::describe_type(TypeId::of::<Self>(), Self::TABLE, Self::declare)
    }
}
