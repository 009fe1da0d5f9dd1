use crate::Result;

use ovsdb_orm_core::{
    codec::FieldValue,
    schema::{self, Shape},
    Error,
};

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// A Rust type a model field can have.
///
/// The implementation declares the type's [`Shape`], which the schema uses
/// to infer or check the field's kind, and converts between the type and
/// the codec's [`FieldValue`].
pub trait Primitive: Sized {
    const SHAPE: Shape;
    const NULLABLE: bool = false;

    /// Loads a decoded value. `column` names the source column in errors.
    fn load(column: &str, value: Option<FieldValue>) -> Result<Self>;

    /// Returns `None` when the field holds no value.
    fn to_field_value(&self) -> Option<FieldValue>;
}

/// A type that can be a map key, map value, or sequence element.
pub trait Element: Sized {
    const TYPE: schema::Element;

    /// Parses the element from its map representation. Maps carry strings
    /// only on the wire.
    fn parse(value: &str) -> Option<Self>;

    fn to_map_string(&self) -> String;

    fn from_field_value(value: FieldValue) -> Option<Self>;

    fn to_field_value(&self) -> FieldValue;
}

fn null(column: &str, expected: &str) -> Error {
    Error::type_mismatch(column, expected, "null")
}

fn mismatch(column: &str, expected: &str, found: &FieldValue) -> Error {
    Error::type_mismatch(column, expected, found.type_name())
}

impl Primitive for i64 {
    const SHAPE: Shape = Shape::Integer;

    fn load(column: &str, value: Option<FieldValue>) -> Result<Self> {
        match value {
            Some(FieldValue::Integer(v)) => Ok(v),
            Some(other) => Err(mismatch(column, "integer", &other)),
            None => Err(null(column, "integer")),
        }
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Integer(*self))
    }
}

macro_rules! narrow_integer {
    ( $( $ty:ty ),* ) => {
        $(
            impl Primitive for $ty {
                const SHAPE: Shape = Shape::Integer;

                fn load(column: &str, value: Option<FieldValue>) -> Result<Self> {
                    let wide = i64::load(column, value)?;
                    <$ty>::try_from(wide).map_err(|_| {
                        Error::type_mismatch(column, stringify!($ty), format!("integer {wide}"))
                    })
                }

                fn to_field_value(&self) -> Option<FieldValue> {
                    Some(FieldValue::Integer(i64::from(*self)))
                }
            }
        )*
    };
}

narrow_integer!(i32, u16, u32);

impl Primitive for bool {
    const SHAPE: Shape = Shape::Boolean;

    fn load(column: &str, value: Option<FieldValue>) -> Result<Self> {
        match value {
            Some(FieldValue::Boolean(v)) => Ok(v),
            Some(other) => Err(mismatch(column, "boolean", &other)),
            None => Err(null(column, "boolean")),
        }
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Boolean(*self))
    }
}

impl Primitive for String {
    const SHAPE: Shape = Shape::String;

    fn load(column: &str, value: Option<FieldValue>) -> Result<Self> {
        match value {
            Some(FieldValue::String(v)) => Ok(v),
            Some(other) => Err(mismatch(column, "string", &other)),
            None => Ok(String::new()),
        }
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::String(self.clone()))
    }
}

impl<T: Element> Primitive for Vec<T> {
    const SHAPE: Shape = Shape::Sequence(T::TYPE);

    fn load(column: &str, value: Option<FieldValue>) -> Result<Self> {
        match value {
            Some(FieldValue::List(items)) => items
                .into_iter()
                .map(|item| {
                    let found = item.type_name();
                    T::from_field_value(item)
                        .ok_or_else(|| Error::type_mismatch(column, T::TYPE.to_string(), found))
                })
                .collect(),
            Some(other) => Err(mismatch(column, "list", &other)),
            None => Ok(Vec::new()),
        }
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::List(
            self.iter().map(Element::to_field_value).collect(),
        ))
    }
}

fn load_map<K: Element, V: Element, M: FromIterator<(K, V)>>(
    column: &str,
    value: Option<FieldValue>,
) -> Result<M> {
    let entries = match value {
        Some(FieldValue::Map(entries)) => entries,
        Some(other) => return Err(mismatch(column, "map", &other)),
        None => BTreeMap::new(),
    };

    entries
        .into_iter()
        .map(|(key, value)| {
            let key = K::parse(&key).ok_or_else(|| {
                Error::type_mismatch(column, format!("map key of type {}", K::TYPE), key)
            })?;
            let value = V::parse(&value).ok_or_else(|| {
                Error::type_mismatch(column, format!("map value of type {}", V::TYPE), value)
            })?;
            Ok((key, value))
        })
        .collect()
}

fn map_to_field_value<'a, K: Element + 'a, V: Element + 'a>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
) -> Option<FieldValue> {
    Some(FieldValue::Map(
        entries
            .map(|(k, v)| (k.to_map_string(), v.to_map_string()))
            .collect(),
    ))
}

impl<K: Element + Eq + Hash, V: Element> Primitive for HashMap<K, V> {
    const SHAPE: Shape = Shape::Map;

    fn load(column: &str, value: Option<FieldValue>) -> Result<Self> {
        load_map::<K, V, _>(column, value)
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        map_to_field_value(self.iter())
    }
}

impl<K: Element + Ord, V: Element> Primitive for BTreeMap<K, V> {
    const SHAPE: Shape = Shape::Map;

    fn load(column: &str, value: Option<FieldValue>) -> Result<Self> {
        load_map::<K, V, _>(column, value)
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        map_to_field_value(self.iter())
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const SHAPE: Shape = T::SHAPE;
    const NULLABLE: bool = true;

    fn load(column: &str, value: Option<FieldValue>) -> Result<Self> {
        match value {
            Some(value) => Ok(Some(T::load(column, Some(value))?)),
            None => Ok(None),
        }
    }

    fn to_field_value(&self) -> Option<FieldValue> {
        self.as_ref().and_then(T::to_field_value)
    }
}

impl Element for String {
    const TYPE: schema::Element = schema::Element::String;

    fn parse(value: &str) -> Option<Self> {
        Some(value.to_string())
    }

    fn to_map_string(&self) -> String {
        self.clone()
    }

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::String(v) => Some(v),
            _ => None,
        }
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl Element for i64 {
    const TYPE: schema::Element = schema::Element::Integer;

    fn parse(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    fn to_map_string(&self) -> String {
        self.to_string()
    }

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Integer(v) => Some(v),
            _ => None,
        }
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl Element for bool {
    const TYPE: schema::Element = schema::Element::Boolean;

    fn parse(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    fn to_map_string(&self) -> String {
        self.to_string()
    }

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Boolean(v) => Some(v),
            _ => None,
        }
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}
