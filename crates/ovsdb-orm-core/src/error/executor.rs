use super::Error;

/// Error reported by the executor that runs commands against the server.
#[derive(Debug)]
pub(super) struct ExecutorError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from an executor (transport) error.
    ///
    /// Executors use this to convert socket, JSON-RPC or server-side
    /// transaction failures into mapper errors.
    pub fn executor(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Executor(ExecutorError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is an executor error.
    pub fn is_executor(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Executor(_)))
    }
}
