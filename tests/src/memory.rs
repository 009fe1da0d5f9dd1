use crate::ExecLog;

use ovsdb_orm_core::{
    async_trait,
    cache::TableUpdates,
    driver::{Command, Condition, Executor, Operation, OperationResult},
    wire::{Row, Uuid, Value},
    Cache, Result,
};

use std::{collections::HashMap, sync::Arc};

/// An executor that commits transactions straight into a cache, the way a
/// server round trip followed by a monitor update would.
///
/// Named UUIDs declared by inserts are replaced by fresh real UUIDs, both
/// in the inserted rows and in every later reference of the transaction.
#[derive(Debug, Clone)]
pub struct MemoryExecutor {
    cache: Arc<Cache>,
    log: ExecLog,
}

/// Rows written by the transaction so far. `None` marks a deleted row.
type Staged = HashMap<String, HashMap<String, Option<Row>>>;

impl MemoryExecutor {
    pub fn new(cache: Arc<Cache>) -> MemoryExecutor {
        MemoryExecutor {
            cache,
            log: ExecLog::default(),
        }
    }

    pub fn log(&self) -> ExecLog {
        self.log.clone()
    }

    fn run(
        &self,
        operation: &Operation,
        names: &mut HashMap<String, String>,
        staged: &mut Staged,
    ) -> OperationResult {
        match operation {
            Operation::Insert(insert) => {
                let id = uuid::Uuid::new_v4().to_string();
                if let Some(name) = &insert.uuid_name {
                    names.insert(name.clone(), id.clone());
                }

                let row = resolve_row(&insert.row, names);
                staged
                    .entry(insert.table.clone())
                    .or_default()
                    .insert(id.clone(), Some(row));
                OperationResult::inserted(id)
            }
            Operation::Delete(delete) => {
                let targets = self.matching(&delete.table, &delete.conditions, names, staged);
                let count = targets.len() as u64;
                let table = staged.entry(delete.table.clone()).or_default();
                for (id, _) in targets {
                    table.insert(id, None);
                }
                OperationResult::count(count)
            }
            Operation::Mutate(mutate) => {
                let targets = self.matching(&mutate.table, &mutate.conditions, names, staged);
                let count = targets.len() as u64;
                let table = staged.entry(mutate.table.clone()).or_default();
                for (id, mut row) in targets {
                    for mutation in &mutate.mutations {
                        let mut mutation = mutation.clone();
                        mutation.value = resolve(&mutation.value, names);
                        let value = mutation.apply_to(row.get(&mutation.column));
                        row.insert(mutation.column.clone(), value);
                    }
                    table.insert(id, Some(row));
                }
                OperationResult::count(count)
            }
            Operation::Update(update) => {
                let targets = self.matching(&update.table, &update.conditions, names, staged);
                let count = targets.len() as u64;
                let table = staged.entry(update.table.clone()).or_default();
                for (id, mut row) in targets {
                    row.merge(resolve_row(&update.row, names));
                    table.insert(id, Some(row));
                }
                OperationResult::count(count)
            }
        }
    }

    /// Current rows of `table` matching every condition: cached rows
    /// overlaid with the transaction's own writes.
    fn matching(
        &self,
        table: &str,
        conditions: &[Condition],
        names: &HashMap<String, String>,
        staged: &Staged,
    ) -> Vec<(String, Row)> {
        let conditions: Vec<Condition> = conditions
            .iter()
            .map(|condition| Condition {
                column: condition.column.clone(),
                value: resolve(&condition.value, names),
            })
            .collect();

        let mut rows: HashMap<String, Row> = self
            .cache
            .read()
            .scan(table)
            .map(|(id, row)| (id.to_string(), row.clone()))
            .collect();

        for (id, row) in staged.get(table).into_iter().flatten() {
            match row {
                Some(row) => rows.insert(id.clone(), row.clone()),
                None => rows.remove(id),
            };
        }

        rows.into_iter()
            .filter(|(id, row)| conditions.iter().all(|c| c.matches(id, row)))
            .collect()
    }
}

#[async_trait]
impl Executor for MemoryExecutor {
    async fn execute(&self, commands: &mut [Command]) -> Result<()> {
        let mut names = HashMap::new();
        let mut staged = Staged::new();
        let mut operations = vec![];

        for command in commands.iter_mut() {
            let results = command
                .operations()
                .iter()
                .map(|operation| self.run(operation, &mut names, &mut staged))
                .collect();
            operations.extend(command.operations().iter().cloned());
            command.set_results(results);
        }

        let mut updates = TableUpdates::new();
        for (table, rows) in staged {
            for (id, row) in rows {
                match row {
                    Some(row) => updates = updates.insert(table.clone(), id, row),
                    None => {
                        let old = self.cache.lookup(&table, &id).unwrap_or_default();
                        updates = updates.delete(table.clone(), id, old);
                    }
                }
            }
        }

        self.cache.apply(updates);
        self.log.push(operations);
        Ok(())
    }
}

fn resolve_row(row: &Row, names: &HashMap<String, String>) -> Row {
    row.iter()
        .map(|(column, value)| (column, resolve(value, names)))
        .collect()
}

fn resolve(value: &Value, names: &HashMap<String, String>) -> Value {
    match value {
        Value::Uuid(uuid) => match names.get(uuid.as_str()) {
            Some(real) => Value::Uuid(Uuid::new(real.clone())),
            None => value.clone(),
        },
        Value::Set(items) => Value::Set(items.iter().map(|v| resolve(v, names)).collect()),
        Value::List(items) => Value::List(items.iter().map(|v| resolve(v, names)).collect()),
        other => other.clone(),
    }
}
