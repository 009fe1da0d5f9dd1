pub mod cache;
pub use cache::Cache;

pub mod codec;

pub mod driver;
pub use driver::{Command, Executor};

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::Schema;

pub mod wire;

/// A Result type alias that uses the mapper's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
