use super::Error;

/// Error when a field's Rust type has no wire representation for its kind,
/// e.g. a non-reference sequence whose elements are not strings.
#[derive(Debug)]
pub(super) struct UnsupportedTypeError {
    column: Box<str>,
    ty: Box<str>,
}

impl std::error::Error for UnsupportedTypeError {}

impl core::fmt::Display for UnsupportedTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported type in column `{}`: {} cannot be mapped",
            self.column, self.ty
        )
    }
}

impl Error {
    /// Creates an unsupported type error.
    pub fn unsupported_type(column: impl Into<String>, ty: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedType(UnsupportedTypeError {
            column: column.into().into(),
            ty: ty.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported type error.
    pub fn is_unsupported_type(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnsupportedType(_)))
    }
}
