use crate::{Model, Result};

use ovsdb_orm_core::{
    codec::{self, FieldValue},
    err,
    schema::ModelSchema,
    wire::Row,
    Error,
};

/// Decodes the cached row `id` into `out`.
///
/// Every bound field is overwritten, in declaration order. The identifier
/// is taken from `id`, never from the row.
pub(crate) fn decode<M: Model>(schema: &ModelSchema, id: &str, row: &Row, out: &mut M) -> Result<()> {
    decode_fields(schema, id, row, out)
        .map_err(|e| e.context(err!("decoding row {id} of table {}", schema.table)))
}

fn decode_fields<M: Model>(schema: &ModelSchema, id: &str, row: &Row, out: &mut M) -> Result<()> {
    for field in &schema.fields {
        let value = if field.is_identifier() {
            Some(FieldValue::String(id.to_string()))
        } else {
            match row.get(&field.column) {
                Some(value) => codec::decode(field, value)?,
                None if field.nullable => None,
                None => return Err(Error::missing_column(&field.column)),
            }
        };

        out.load_field(field.index, &field.column, value)?;
    }

    Ok(())
}

/// Encodes `model` into a wire row. The identifier is never part of it.
pub(crate) fn encode<M: Model>(schema: &ModelSchema, model: &M) -> Result<Row> {
    let mut row = Row::new();

    for field in schema.columns() {
        let value = codec::encode(field, model.field(field.index))
            .map_err(|e| e.context(err!("encoding model for table {}", schema.table)))?;

        if let Some(value) = value {
            row.insert(field.column.clone(), value);
        }
    }

    Ok(row)
}

/// The model's row identifier, empty when not yet persisted.
pub(crate) fn identifier<M: Model>(schema: &ModelSchema, model: &M) -> String {
    match model.field(schema.identifier().index) {
        Some(FieldValue::String(id)) => id,
        _ => String::new(),
    }
}
