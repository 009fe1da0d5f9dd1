mod command;
pub use command::Command;

mod condition;
pub use condition::Condition;

mod mutation;
pub use mutation::{Mutation, Mutator};

pub mod operation;
pub use operation::Operation;

mod result;
pub use result::OperationResult;

use crate::{async_trait, wire::Uuid, Result};

use std::fmt::Debug;

/// Runs commands against the server.
///
/// The executor owns the transport: it serializes the commands' operations
/// into one `transact` request, commits it, and stores each operation's
/// outcome back into the command's results slot.
#[async_trait]
pub trait Executor: Debug + Send + Sync + 'static {
    /// Executes `commands` as one atomic transaction.
    async fn execute(&self, commands: &mut [Command]) -> Result<()>;

    /// Produces a fresh named UUID for a row whose identifier is not yet
    /// known.
    fn generate_identifier(&self) -> Result<String> {
        Ok(Uuid::generate_named().into_string())
    }
}
