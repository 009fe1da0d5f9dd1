use super::{FieldDecl, FieldDescriptor, Kind, Shape, Tag};
use crate::{Error, Result};

use std::collections::HashSet;

/// The validated field-descriptor table of one model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    /// Wire table the model maps to
    pub table: String,

    /// Bound fields, in declaration order. Unbound fields are not listed.
    pub fields: Vec<FieldDescriptor>,

    /// Position of the identifier in `fields`
    identifier: usize,
}

impl ModelSchema {
    /// Validates the declarations of a model bound to `table` and builds its
    /// descriptor table.
    pub fn describe(table: &str, decls: &[FieldDecl]) -> Result<ModelSchema> {
        let invalid = |message: String| Error::invalid_model(table, message);

        let mut fields = Vec::with_capacity(decls.len());
        let mut identifier = None;
        let mut columns = HashSet::new();

        for (index, decl) in decls.iter().enumerate() {
            let Some(binding) = decl.binding else {
                continue;
            };

            let tag = Tag::parse(binding)
                .map_err(|message| invalid(format!("field `{}`: {message}", decl.name)))?;

            let kind = if tag.identifier {
                if decl.shape != Shape::String || decl.nullable {
                    return Err(invalid(format!(
                        "identifier field `{}` must be a `String`, found `{}`",
                        decl.name, decl.ty
                    )));
                }
                if let Some(previous) = identifier.replace(fields.len()) {
                    let previous: &FieldDescriptor = &fields[previous];
                    return Err(invalid(format!(
                        "fields `{}` and `{}` both claim the row identifier",
                        previous.name, decl.name
                    )));
                }
                Kind::Identifier
            } else {
                resolve_kind(&tag, decl).map_err(invalid)?
            };

            if !columns.insert(tag.column.clone()) {
                return Err(invalid(format!(
                    "column `{}` is bound more than once",
                    tag.column
                )));
            }

            fields.push(FieldDescriptor {
                index,
                name: decl.name,
                column: tag.column,
                kind,
                reference: kind.is_reference(),
                indexed: tag.index,
                shape: decl.shape,
                nullable: decl.nullable,
                ty: decl.ty,
            });
        }

        let Some(identifier) = identifier else {
            return Err(invalid(
                "no field is bound to `_uuid`; exactly one row identifier is required".into(),
            ));
        };

        Ok(ModelSchema {
            table: table.to_string(),
            fields,
            identifier,
        })
    }

    pub fn identifier(&self) -> &FieldDescriptor {
        &self.fields[self.identifier]
    }

    /// Bound fields other than the identifier.
    pub fn columns(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| !field.is_identifier())
    }

    /// Fields declared with the `index` option.
    pub fn indexes(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| field.indexed)
    }

    /// Finds a bound field by column name or Rust field name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.is_named(name))
    }

    /// Like [`ModelSchema::field`], failing with a schema error.
    pub fn expect_field(&self, name: &str) -> Result<&FieldDescriptor> {
        self.field(name)
            .ok_or_else(|| Error::unknown_column(&self.table, name))
    }
}

fn resolve_kind(tag: &Tag, decl: &FieldDecl) -> core::result::Result<Kind, String> {
    let Some(inferred) = decl.shape.default_kind(tag.reference) else {
        return Err(format!(
            "field `{}` is marked `ref` but `{}` cannot hold references",
            decl.name, decl.ty
        ));
    };

    match tag.kind {
        None => Ok(inferred),
        Some(declared) if decl.shape.accepts(declared) => {
            // `ref` upgrades a declared string/set kind to its reference form
            Ok(if tag.reference { inferred } else { declared })
        }
        Some(declared) => Err(format!(
            "field `{}` is bound as {declared} but `{}` is a {}",
            decl.name, decl.ty, decl.shape
        )),
    }
}
