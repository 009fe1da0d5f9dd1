mod builder;
pub use builder::{Builder, DEFAULT_DATABASE};

use crate::{engine::mapper, engine::Engine, Model, ModelMutation, Result};

use ovsdb_orm_core::{
    bail,
    driver::Command,
    schema::ModelSchema,
    wire::Row,
    Cache,
};

use std::sync::Arc;

/// A handle to the mapped database.
///
/// Reads are served from the cache. Writes are built as [`Command`]s and
/// run with [`Db::execute`]; their effect becomes visible once the sync
/// subsystem applies the server's update to the cache. Cloning is cheap and
/// every clone shares the same state.
#[derive(Debug, Clone)]
pub struct Db {
    engine: Arc<Engine>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the cached row `id` of `M`'s table, decoded.
    pub fn get_by_id<M: Model>(&self, id: &str) -> Result<M> {
        self.engine.find_by_id(id)
    }

    /// Returns the cached rows equal to `probe` on the index fields `names`.
    ///
    /// With no names, the declared index fields and the identifier are used.
    /// Fields that are unset on the probe are not compared. Finding nothing
    /// is not an error.
    pub fn get<M: Model>(&self, probe: &M, names: &[&str]) -> Result<Vec<M>> {
        self.engine.find_by_index(probe, names)
    }

    /// Returns every cached row of `M`'s table.
    pub fn list<M: Model>(&self) -> Result<Vec<M>> {
        self.engine.list()
    }

    /// Decodes a wire row into `out`, overwriting every bound field.
    pub fn decode<M: Model>(&self, id: &str, row: &Row, out: &mut M) -> Result<()> {
        mapper::decode(self.engine.model_schema::<M>()?, id, row, out)
    }

    pub fn encode<M: Model>(&self, model: &M) -> Result<Row> {
        mapper::encode(self.engine.model_schema::<M>()?, model)
    }

    /// Builds the insert of `model`.
    ///
    /// Fails with an already-exists error when a cached row has the model's
    /// identifier or matches every set index field of the model. The check
    /// runs against the cache only; two callers racing to insert the same
    /// row both pass it.
    ///
    /// A preset identifier becomes the insert's `uuid-name` and must be a
    /// named UUID, such as one from [`Db::generate_identifier`].
    pub fn create<M: Model>(&self, model: &M) -> Result<Command> {
        self.engine.build_insert(model)
    }

    /// Builds the delete of the row `model` stands for.
    ///
    /// Without an identifier the row is located by the fields `names`, or,
    /// when no names are given, by the first declared index field that is
    /// set. Models with several index fields and no identifier should pass
    /// names.
    pub fn delete<M: Model>(&self, model: &M, names: &[&str]) -> Result<Command> {
        self.engine.build_delete(model, names)
    }

    /// Builds set deltas on the row `model` stands for, located the same way
    /// as for [`Db::delete`].
    pub fn mutate<M: Model>(
        &self,
        model: &M,
        mutations: Vec<ModelMutation>,
        names: &[&str],
    ) -> Result<Command> {
        self.engine.build_mutate(model, mutations, names)
    }

    /// Builds an update overwriting every bound column of the row `model`
    /// stands for with the model's values.
    pub fn update<M: Model>(&self, model: &M, names: &[&str]) -> Result<Command> {
        self.engine.build_update(model, names)
    }

    /// Runs `commands` as one transaction.
    ///
    /// Commands that already hold results are refused; clear them first to
    /// run a command again.
    pub async fn execute(&self, commands: &mut [Command]) -> Result<()> {
        if commands.is_empty() {
            return Ok(());
        }

        if let Some(index) = commands.iter().position(Command::is_executed) {
            bail!("command {index} has already been executed; clear its results to run it again");
        }

        let executor = commands[0].executor().clone();
        executor.execute(commands).await
    }

    /// The `transact` request parameters for `commands`: the database name
    /// followed by every operation, in order.
    pub fn transact_params(&self, commands: &[Command]) -> Result<serde_json::Value> {
        let mut params = vec![serde_json::Value::String(self.engine.database.clone())];
        for command in commands {
            for operation in command.operations() {
                params.push(serde_json::to_value(operation)?);
            }
        }
        Ok(serde_json::Value::Array(params))
    }

    /// Produces a fresh row identifier from the executor, for rows that
    /// other operations of the same transaction reference.
    pub fn generate_identifier(&self) -> Result<String> {
        self.engine.executor.generate_identifier()
    }

    pub fn cache(&self) -> &Arc<Cache> {
        &self.engine.cache
    }

    pub fn database(&self) -> &str {
        &self.engine.database
    }

    /// The descriptor table of a registered model type.
    pub fn schema_for<M: Model>(&self) -> Result<Arc<ModelSchema>> {
        self.engine.model_schema::<M>().cloned()
    }
}
