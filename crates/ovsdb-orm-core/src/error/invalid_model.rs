use super::Error;

/// Error when a model's field metadata is invalid.
///
/// This occurs when:
/// - A binding tag cannot be parsed
/// - More than one field (or no field) claims the row identifier
/// - A declared kind does not match the field's Rust type
/// - Two fields are bound to the same column
///
/// Raised once, when the model type is first described or registered.
#[derive(Debug)]
pub(super) struct InvalidModelError {
    model: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidModelError {}

impl core::fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid model `{}`: {}", self.model, self.message)
    }
}

impl Error {
    /// Creates an invalid model error for the model bound to `model`.
    pub fn invalid_model(model: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidModel(InvalidModelError {
            model: model.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid model error.
    pub fn is_invalid_model(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidModel(_)))
    }
}
