use super::Error;

/// Error when a table, column or index name is unknown to the active model
/// set. Always a caller configuration bug.
#[derive(Debug)]
pub(super) enum SchemaError {
    UnknownTable(Box<str>),
    UnknownModel(&'static str),
    UnknownColumn { table: Box<str>, column: Box<str> },
    DuplicateTable(Box<str>),
}

impl std::error::Error for SchemaError {}

impl core::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            SchemaError::UnknownTable(table) => {
                write!(f, "schema error: table `{table}` is not in the model set")
            }
            SchemaError::UnknownModel(ty) => {
                write!(f, "schema error: model type `{ty}` is not registered")
            }
            SchemaError::UnknownColumn { table, column } => {
                write!(f, "schema error: table `{table}` has no field `{column}`")
            }
            SchemaError::DuplicateTable(table) => {
                write!(f, "schema error: table `{table}` is registered twice")
            }
        }
    }
}

impl Error {
    /// Creates a schema error for a table name missing from the model set.
    pub fn unknown_table(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Schema(SchemaError::UnknownTable(
            table.into().into(),
        )))
    }

    /// Creates a schema error for a model type that was never registered.
    pub fn unknown_model(type_name: &'static str) -> Error {
        Error::from(super::ErrorKind::Schema(SchemaError::UnknownModel(type_name)))
    }

    /// Creates a schema error for a column (or field) name the table does not
    /// bind.
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Schema(SchemaError::UnknownColumn {
            table: table.into().into(),
            column: column.into().into(),
        }))
    }

    /// Creates a schema error for two model types bound to the same table.
    pub fn duplicate_table(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Schema(SchemaError::DuplicateTable(
            table.into().into(),
        )))
    }

    /// Returns `true` if this error is a schema error.
    pub fn is_schema(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Schema(_)))
    }
}
