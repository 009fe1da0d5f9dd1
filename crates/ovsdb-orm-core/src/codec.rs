//! Conversions between wire values and typed field values, per semantic
//! kind.

mod decode;
pub use decode::decode;

mod encode;
pub use encode::{encode, encode_element};

mod field_value;
pub use field_value::FieldValue;
