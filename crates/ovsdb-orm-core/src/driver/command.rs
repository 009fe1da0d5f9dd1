use super::{Executor, Operation, OperationResult};

use std::sync::Arc;

/// A batch of operations, built by the mapper and run by an executor.
///
/// The operations are fixed at build time. The results slot is empty until
/// the command executes; a command with results is not executed again
/// unless the caller clears them.
#[derive(Debug, Clone)]
pub struct Command {
    operations: Vec<Operation>,
    results: Option<Vec<OperationResult>>,
    executor: Arc<dyn Executor>,
}

impl Command {
    pub fn new(operations: Vec<Operation>, executor: Arc<dyn Executor>) -> Command {
        Command {
            operations,
            results: None,
            executor,
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }

    /// Results, one per operation, once the command has executed.
    pub fn results(&self) -> Option<&[OperationResult]> {
        self.results.as_deref()
    }

    pub fn set_results(&mut self, results: Vec<OperationResult>) {
        self.results = Some(results);
    }

    pub fn is_executed(&self) -> bool {
        self.results.is_some()
    }

    /// Forgets the results, making the command executable again.
    pub fn clear_results(&mut self) -> Option<Vec<OperationResult>> {
        self.results.take()
    }
}
