use super::Error;

/// Error when a cached row has no entry for a column that a non-optional
/// model field is bound to.
#[derive(Debug)]
pub(super) struct MissingColumnError {
    column: Box<str>,
}

impl std::error::Error for MissingColumnError {}

impl core::fmt::Display for MissingColumnError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing column `{}`", self.column)
    }
}

impl Error {
    /// Creates a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingColumn(MissingColumnError {
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing column error.
    pub fn is_missing_column(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingColumn(_)))
    }
}
