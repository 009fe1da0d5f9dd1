use super::FieldValue;
use crate::{
    schema::{Element, FieldDescriptor, Kind, Shape},
    wire::{Uuid, Value},
    Error, Result,
};

/// Encodes a field value into the wire value of its column.
///
/// Returns `None` when the column must be left out of the row: the value is
/// absent, or the field is the identifier.
///
/// A non-nullable reference encodes the empty identifier as the empty set.
/// A nullable one rejects it, since the empty set decodes back to `None`.
pub fn encode(field: &FieldDescriptor, value: Option<FieldValue>) -> Result<Option<Value>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let encoded = match (field.kind, value) {
        (Kind::Identifier, _) => return Ok(None),
        (Kind::Integer, FieldValue::Integer(v)) => Value::Integer(v),
        (Kind::Boolean, FieldValue::Boolean(v)) => Value::Boolean(v),
        (Kind::String, FieldValue::String(v)) => Value::String(v),
        (Kind::StringMap, FieldValue::Map(v)) => Value::Map(v),
        (Kind::Reference, FieldValue::String(v)) if v.is_empty() => {
            if field.nullable {
                return Err(Error::type_mismatch(
                    &field.column,
                    field.kind.as_str(),
                    "empty string",
                ));
            }
            Value::empty_set()
        }
        (Kind::Reference, FieldValue::String(v)) => Value::Uuid(Uuid::new(v)),
        (Kind::StringSet | Kind::ReferenceSet, FieldValue::List(items)) => {
            check_set_shape(field)?;
            Value::Set(
                items
                    .into_iter()
                    .map(|item| encode_element(field, item))
                    .collect::<Result<_>>()?,
            )
        }
        (_, other) => {
            return Err(Error::type_mismatch(
                &field.column,
                field.kind.as_str(),
                other.type_name(),
            ))
        }
    };

    Ok(Some(encoded))
}

/// Encodes one element of a set-typed column, as carried by a mutation.
pub fn encode_element(field: &FieldDescriptor, element: FieldValue) -> Result<Value> {
    match (field.kind, element) {
        (Kind::StringSet, FieldValue::String(v)) => Ok(Value::String(v)),
        (Kind::ReferenceSet, FieldValue::String(v)) => Ok(Value::Uuid(Uuid::new(v))),
        (Kind::StringSet, other) => Err(Error::unsupported_type(
            &field.column,
            format!("set of {}", other.type_name()),
        )),
        (Kind::ReferenceSet, other) => Err(Error::type_mismatch(
            &field.column,
            field.kind.as_str(),
            other.type_name(),
        )),
        (kind, _) => Err(Error::unsupported_type(
            &field.column,
            format!("set element of {kind} column"),
        )),
    }
}

fn check_set_shape(field: &FieldDescriptor) -> Result<()> {
    match field.shape {
        Shape::Sequence(Element::String) => Ok(()),
        _ => Err(Error::unsupported_type(&field.column, field.ty)),
    }
}
