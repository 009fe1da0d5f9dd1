//! The loosely-typed row representation exchanged with the server.
//!
//! Values serialize to (and deserialize from) the JSON notation of
//! RFC 7047: `["uuid", ...]`, `["named-uuid", ...]`, `["set", [...]]` and
//! `["map", [[k, v], ...]]`, with bare JSON numbers, booleans and strings
//! for atoms.

mod row;
pub use row::Row;

mod uuid;
pub use uuid::Uuid;

mod value;
pub use value::Value;

/// The column every row is addressed by.
pub const UUID_COLUMN: &str = "_uuid";
