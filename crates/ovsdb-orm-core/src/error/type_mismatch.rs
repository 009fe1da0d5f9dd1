use super::Error;

/// Error when a value cannot be converted into the kind a column is bound
/// as.
#[derive(Debug)]
pub(super) struct TypeMismatchError {
    column: Box<str>,
    expected: Box<str>,
    found: Box<str>,
}

impl std::error::Error for TypeMismatchError {}

impl core::fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "type mismatch in column `{}`: expected {}, found {}",
            self.column, self.expected, self.found
        )
    }
}

impl Error {
    /// Creates a type mismatch error.
    ///
    /// `expected` names the kind (or element type) the column is bound as,
    /// `found` the observed wire or field type.
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::TypeMismatch(TypeMismatchError {
            column: column.into().into(),
            expected: expected.into().into(),
            found: found.into().into(),
        }))
    }

    /// Returns `true` if this error is a type mismatch error.
    pub fn is_type_mismatch(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::TypeMismatch(_)))
    }
}
