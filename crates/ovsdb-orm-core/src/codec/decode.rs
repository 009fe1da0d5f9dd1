use super::FieldValue;
use crate::{
    schema::{Element, FieldDescriptor, Kind, Shape},
    wire::Value,
    Error, Result,
};

/// Decodes the wire value of `field`'s column.
///
/// `None` means the column holds null (an empty optional set). Non-nullable
/// string and reference fields read null as the empty string; non-nullable
/// integer and boolean fields have no null representation and fail.
pub fn decode(field: &FieldDescriptor, value: &Value) -> Result<Option<FieldValue>> {
    let decoded = match field.kind {
        Kind::Integer => optional(field, value)?.map(|atom| match atom {
            Value::Integer(v) => Ok(FieldValue::Integer(*v)),
            other => Err(mismatch(field, other)),
        }),
        Kind::Boolean => optional(field, value)?.map(|atom| match atom {
            Value::Boolean(v) => Ok(FieldValue::Boolean(*v)),
            other => Err(mismatch(field, other)),
        }),
        Kind::String => optional(field, value)?.map(|atom| match atom {
            Value::String(v) => Ok(FieldValue::String(v.clone())),
            other => Err(mismatch(field, other)),
        }),
        Kind::Reference => optional(field, value)?.map(|atom| reference(field, atom)),
        Kind::StringMap => match value {
            Value::Map(map) => Some(Ok(FieldValue::Map(map.clone()))),
            other => return Err(mismatch(field, other)),
        },
        Kind::StringSet => {
            if field.shape != Shape::Sequence(Element::String) {
                return Err(Error::unsupported_type(&field.column, field.ty));
            }
            Some(sequence(field, value, |atom| match atom {
                Value::String(v) => Ok(FieldValue::String(v.clone())),
                Value::Uuid(v) => Ok(FieldValue::String(v.as_str().to_string())),
                other => Err(mismatch(field, other)),
            }))
        }
        Kind::ReferenceSet => Some(sequence(field, value, |atom| reference(field, atom))),
        Kind::Identifier => Some(reference(field, value)),
    };

    match decoded.transpose()? {
        Some(value) => Ok(Some(value)),
        None if field.nullable => Ok(None),
        None => match field.kind {
            Kind::String | Kind::Reference => Ok(Some(FieldValue::String(String::new()))),
            _ => Err(Error::type_mismatch(&field.column, field.kind.as_str(), "empty set")),
        },
    }
}

/// Unwraps the optional-set encoding of a scalar: a set or list of zero
/// elements is null, of one element is that element.
fn optional<'a>(field: &FieldDescriptor, value: &'a Value) -> Result<Option<&'a Value>> {
    match value.as_elements() {
        None => Ok(Some(value)),
        Some([]) => Ok(None),
        Some([single]) => Ok(Some(single)),
        Some(items) => Err(Error::type_mismatch(
            &field.column,
            field.kind.as_str(),
            format!("{} of {} elements", value.type_name(), items.len()),
        )),
    }
}

fn sequence(
    field: &FieldDescriptor,
    value: &Value,
    element: impl Fn(&Value) -> Result<FieldValue>,
) -> Result<FieldValue> {
    match value.as_elements() {
        Some(items) => items
            .iter()
            .map(element)
            .collect::<Result<Vec<_>>>()
            .map(FieldValue::List),
        None if value.is_atom() => Ok(FieldValue::List(vec![element(value)?])),
        None => Err(mismatch(field, value)),
    }
}

fn reference(field: &FieldDescriptor, atom: &Value) -> Result<FieldValue> {
    match atom {
        Value::Uuid(v) => Ok(FieldValue::String(v.as_str().to_string())),
        Value::String(v) => Ok(FieldValue::String(v.clone())),
        other => Err(mismatch(field, other)),
    }
}

fn mismatch(field: &FieldDescriptor, found: &Value) -> Error {
    Error::type_mismatch(&field.column, field.kind.as_str(), found.type_name())
}
