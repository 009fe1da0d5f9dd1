use super::Error;

/// Error when an index lookup has nothing to compare and the table holds
/// more than one row, so equality cannot pick a row.
#[derive(Debug)]
pub(super) struct AmbiguousIndexError {
    table: Box<str>,
    rows: usize,
}

impl std::error::Error for AmbiguousIndexError {}

impl core::fmt::Display for AmbiguousIndexError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "ambiguous index on table `{}`: no usable index value to discriminate between {} rows",
            self.table, self.rows
        )
    }
}

impl Error {
    /// Creates an ambiguous index error.
    pub fn ambiguous_index(table: impl Into<String>, rows: usize) -> Error {
        Error::from(super::ErrorKind::AmbiguousIndex(AmbiguousIndexError {
            table: table.into().into(),
            rows,
        }))
    }

    /// Returns `true` if this error is an ambiguous index error.
    pub fn is_ambiguous_index(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::AmbiguousIndex(_)))
    }
}
