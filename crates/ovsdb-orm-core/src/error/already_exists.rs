use super::Error;

/// Error when an insert would duplicate a row already present in the cache.
///
/// The check runs against the local cache before the insert operation is
/// built. It is not transactional: two concurrent builders can both pass it.
#[derive(Debug)]
pub(super) struct AlreadyExistsError {
    table: Box<str>,
    uuid: Box<str>,
}

impl std::error::Error for AlreadyExistsError {}

impl core::fmt::Display for AlreadyExistsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "row already exists in table `{}` (uuid {})",
            self.table, self.uuid
        )
    }
}

impl Error {
    /// Creates an already exists error for the cached row `uuid` of `table`.
    pub fn already_exists(table: impl Into<String>, uuid: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::AlreadyExists(AlreadyExistsError {
            table: table.into().into(),
            uuid: uuid.into().into(),
        }))
    }

    /// Returns `true` if this error is an already exists error.
    pub fn is_already_exists(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::AlreadyExists(_)))
    }
}
