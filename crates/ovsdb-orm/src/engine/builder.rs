use super::{mapper, matcher, Engine};
use crate::{Model, Result};

use ovsdb_orm_core::{
    codec::{self, FieldValue},
    driver::{
        operation::{Delete, Insert, Mutate, Update},
        Command, Condition, Mutation, Mutator, Operation,
    },
    schema::ModelSchema,
    wire::{Uuid, Value},
    Error,
};

/// A set delta on one column of a model's row.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMutation {
    /// Column or Rust field name
    pub field: String,
    pub mutator: Mutator,
    pub elements: Vec<FieldValue>,
}

impl ModelMutation {
    pub fn insert<T: Into<FieldValue>>(
        field: impl Into<String>,
        elements: impl IntoIterator<Item = T>,
    ) -> ModelMutation {
        ModelMutation::new(field, Mutator::Insert, elements)
    }

    pub fn delete<T: Into<FieldValue>>(
        field: impl Into<String>,
        elements: impl IntoIterator<Item = T>,
    ) -> ModelMutation {
        ModelMutation::new(field, Mutator::Delete, elements)
    }

    fn new<T: Into<FieldValue>>(
        field: impl Into<String>,
        mutator: Mutator,
        elements: impl IntoIterator<Item = T>,
    ) -> ModelMutation {
        ModelMutation {
            field: field.into(),
            mutator,
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }
}

impl Engine {
    pub(crate) fn build_insert<M: Model>(&self, model: &M) -> Result<Command> {
        let schema = self.model_schema::<M>()?;

        if let Some(existing) = self.duplicate(schema, model)? {
            return Err(Error::already_exists(&schema.table, existing));
        }

        let mut id = mapper::identifier(schema, model);
        if id.is_empty() {
            id = self.executor.generate_identifier()?;
        } else if !Uuid::new(id.as_str()).is_declarable() {
            return Err(Error::type_mismatch(
                &schema.identifier().column,
                "named uuid",
                format!("`{id}`"),
            ));
        }

        let row = mapper::encode(schema, model)?;

        tracing::debug!(table = %schema.table, op = "insert", uuid = %id, "built command");
        Ok(self.command(Insert {
            table: schema.table.clone(),
            row,
            uuid_name: Some(id),
        }))
    }

    /// Returns the identifier of a cached row `model` would duplicate: the
    /// row with the model's identifier, or a row equal to the model on every
    /// set index field.
    fn duplicate<M: Model>(&self, schema: &ModelSchema, model: &M) -> Result<Option<String>> {
        let cache = self.cache.read();

        let id = mapper::identifier(schema, model);
        if !id.is_empty() && cache.lookup(&schema.table, &id).is_some() {
            return Ok(Some(id));
        }

        let indexes = matcher::index_names(schema);
        if indexes.is_empty() {
            return Ok(None);
        }

        let probe = matcher::probe(schema, model, &indexes)?;
        if probe.is_empty() {
            return Ok(None);
        }

        Ok(matcher::find(schema, &cache, &probe)?
            .into_iter()
            .next()
            .map(|(id, _)| id))
    }

    pub(crate) fn build_delete<M: Model>(&self, model: &M, names: &[&str]) -> Result<Command> {
        let schema = self.model_schema::<M>()?;
        let conditions = self.conditions(schema, model, names)?;

        tracing::debug!(table = %schema.table, op = "delete", conditions = conditions.len(), "built command");
        Ok(self.command(Delete {
            table: schema.table.clone(),
            conditions,
        }))
    }

    pub(crate) fn build_mutate<M: Model>(
        &self,
        model: &M,
        mutations: Vec<ModelMutation>,
        names: &[&str],
    ) -> Result<Command> {
        let schema = self.model_schema::<M>()?;

        let mutations = mutations
            .into_iter()
            .map(|mutation| {
                let field = schema.expect_field(&mutation.field)?;
                if !field.kind.is_set() {
                    return Err(Error::unsupported_type(
                        &field.column,
                        format!("mutation of {} column", field.kind),
                    ));
                }

                let elements = mutation
                    .elements
                    .into_iter()
                    .map(|element| codec::encode_element(field, element))
                    .collect::<Result<Vec<_>>>()?;

                Ok(Mutation {
                    column: field.column.clone(),
                    mutator: mutation.mutator,
                    value: Value::Set(elements),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let conditions = self.conditions(schema, model, names)?;

        tracing::debug!(table = %schema.table, op = "mutate", mutations = mutations.len(), "built command");
        Ok(self.command(Mutate {
            table: schema.table.clone(),
            conditions,
            mutations,
        }))
    }

    pub(crate) fn build_update<M: Model>(&self, model: &M, names: &[&str]) -> Result<Command> {
        let schema = self.model_schema::<M>()?;
        let row = mapper::encode(schema, model)?;
        let conditions = self.conditions(schema, model, names)?;

        tracing::debug!(table = %schema.table, op = "update", columns = row.len(), "built command");
        Ok(self.command(Update {
            table: schema.table.clone(),
            conditions,
            row,
        }))
    }

    fn command(&self, operation: impl Into<Operation>) -> Command {
        Command::new(vec![operation.into()], self.executor.clone())
    }

    /// Builds the `where` clause targeting the row `model` stands for.
    ///
    /// A known identifier wins. Otherwise every named field that is set on
    /// the model is compared; without names, only the first declared index
    /// field that is set. The target must be in the cache.
    fn conditions<M: Model>(
        &self,
        schema: &ModelSchema,
        model: &M,
        names: &[&str],
    ) -> Result<Vec<Condition>> {
        let not_found = || Error::record_not_found(format!("table={}", schema.table));

        let id = mapper::identifier(schema, model);
        if !id.is_empty() {
            if self.cache.lookup(&schema.table, &id).is_none() {
                return Err(Error::record_not_found(format!(
                    "table={} uuid={id}",
                    schema.table
                )));
            }
            return Ok(vec![Condition::uuid(id)]);
        }

        let probe = if names.is_empty() {
            let indexes = matcher::index_names(schema);
            if indexes.is_empty() {
                return Err(not_found());
            }
            let mut probe = matcher::probe(schema, model, &indexes)?;
            probe.truncate(1);
            probe
        } else {
            matcher::probe(schema, model, names)?
        };

        if probe.is_empty() {
            return Err(not_found());
        }

        if matcher::find(schema, &self.cache.read(), &probe)?.is_empty() {
            return Err(not_found());
        }

        probe
            .into_iter()
            .map(|(field, value)| {
                let value = codec::encode(field, Some(value))?.ok_or_else(not_found)?;
                Ok(Condition::equal(field.column.clone(), value))
            })
            .collect()
    }
}
