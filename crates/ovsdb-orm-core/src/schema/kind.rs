use std::fmt;

/// Semantic kind of a bound field: how its values are carried on the wire.
///
/// Matched exhaustively by the codec; adding a variant must touch every
/// conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Integer,
    Boolean,
    String,
    StringMap,
    StringSet,
    /// A single row reference (an optional `uuid` column)
    Reference,
    /// A set of row references
    ReferenceSet,
    /// The `_uuid` column. Never read from or written to a row.
    Identifier,
}

impl Kind {
    pub fn is_reference(self) -> bool {
        matches!(self, Kind::Reference | Kind::ReferenceSet)
    }

    /// Returns `true` for kinds whose column holds a set of atoms.
    pub fn is_set(self) -> bool {
        matches!(self, Kind::StringSet | Kind::ReferenceSet)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::String => "string",
            Kind::StringMap => "string map",
            Kind::StringSet => "string set",
            Kind::Reference => "reference",
            Kind::ReferenceSet => "reference set",
            Kind::Identifier => "identifier",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a field's Rust type is able to hold, as declared by its `Primitive`
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Integer,
    Boolean,
    String,
    Map,
    Sequence(Element),
}

impl Shape {
    /// The kind a field of this shape gets when its binding names none.
    pub fn default_kind(self, reference: bool) -> Option<Kind> {
        match (self, reference) {
            (Shape::Integer, false) => Some(Kind::Integer),
            (Shape::Boolean, false) => Some(Kind::Boolean),
            (Shape::String, false) => Some(Kind::String),
            (Shape::String, true) => Some(Kind::Reference),
            (Shape::Map, false) => Some(Kind::StringMap),
            (Shape::Sequence(_), false) => Some(Kind::StringSet),
            (Shape::Sequence(Element::String), true) => Some(Kind::ReferenceSet),
            (Shape::Integer | Shape::Boolean | Shape::Map | Shape::Sequence(_), true) => None,
        }
    }

    /// Returns `true` if a field of this shape can be bound as `kind`.
    pub fn accepts(self, kind: Kind) -> bool {
        match kind {
            Kind::Integer => self == Shape::Integer,
            Kind::Boolean => self == Shape::Boolean,
            Kind::String | Kind::Reference | Kind::Identifier => self == Shape::String,
            Kind::StringMap => self == Shape::Map,
            Kind::StringSet | Kind::ReferenceSet => matches!(self, Shape::Sequence(_)),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Integer => f.write_str("integer"),
            Shape::Boolean => f.write_str("boolean"),
            Shape::String => f.write_str("string"),
            Shape::Map => f.write_str("map"),
            Shape::Sequence(element) => write!(f, "sequence of {element}"),
        }
    }
}

/// Element type of a sequence field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Integer,
    Boolean,
    String,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Element::Integer => "integer",
            Element::Boolean => "boolean",
            Element::String => "string",
        })
    }
}
