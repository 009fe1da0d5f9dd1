use super::Error;

/// Error when a fresh row identifier cannot be produced, typically because
/// the entropy source failed. Retrying the build is safe.
#[derive(Debug)]
pub(super) struct IdentifierGenerationError {
    reason: Box<str>,
}

impl std::error::Error for IdentifierGenerationError {}

impl core::fmt::Display for IdentifierGenerationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to generate row identifier: {}", self.reason)
    }
}

impl Error {
    /// Creates an identifier generation error.
    pub fn identifier_generation(reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::IdentifierGeneration(
            IdentifierGenerationError {
                reason: reason.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an identifier generation error.
    pub fn is_identifier_generation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::IdentifierGeneration(_)))
    }
}
