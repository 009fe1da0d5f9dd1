pub mod db;
pub use db::Db;

mod engine;
pub use engine::ModelMutation;

mod model;
pub use model::Model;

mod primitive;
pub use primitive::{Element, Primitive};

pub use ovsdb_orm_macros::Model;

pub use ovsdb_orm_core::{
    async_trait,
    cache::{self, Cache},
    codec::FieldValue,
    driver::{self, Command, Executor, Mutator, OperationResult},
    schema,
    wire::{self, Row, Uuid, Value},
    Error, Result,
};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{Model, Primitive, Result};
    pub use ovsdb_orm_core::{
        codec::FieldValue,
        schema::{FieldDecl, Shape},
    };
    pub use std::{option::Option, vec::Vec};
}
