use super::{Kind, Shape};

/// A field as declared by a model type, before validation.
///
/// `#[derive(Model)]` emits one per struct field, in declaration order,
/// carrying the binding tag verbatim so that tag errors surface when the
/// type is described.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl {
    /// Rust field name
    pub name: &'static str,

    /// Binding tag, `None` when the field is not bound to a column
    pub binding: Option<&'static str>,

    /// Shape of the field's Rust type
    pub shape: Shape,

    /// True if the Rust type is an `Option`
    pub nullable: bool,

    /// Rust type name, for error messages
    pub ty: &'static str,
}

/// A validated, bound field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Position of the field in the model's declaration list. This is the
    /// index the model's field accessors expect.
    pub index: usize,

    /// Rust field name
    pub name: &'static str,

    /// Wire column
    pub column: String,

    pub kind: Kind,

    /// True if the field holds row references
    pub reference: bool,

    /// True if the field can locate a row when its identifier is unknown
    pub indexed: bool,

    pub shape: Shape,

    pub nullable: bool,

    pub ty: &'static str,
}

impl FieldDescriptor {
    pub fn is_identifier(&self) -> bool {
        self.kind == Kind::Identifier
    }

    /// Returns `true` if `name` refers to this field, by column or by Rust
    /// field name.
    pub fn is_named(&self, name: &str) -> bool {
        self.column == name || self.name == name
    }
}
