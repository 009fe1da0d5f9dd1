use super::ErrorSet;

#[derive(Debug)]
pub(crate) struct Field {
    /// Position of the field among the model's bound fields
    pub(crate) id: usize,

    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Binding tag from `#[ovsdb("...")]`, carried verbatim
    pub(crate) binding: syn::LitStr,
}

impl Field {
    /// Parses a struct field. Returns `None` for fields without an
    /// `#[ovsdb]` attribute, which the mapper ignores.
    pub(super) fn from_ast(field: &syn::Field, id: usize) -> syn::Result<Option<Self>> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut binding = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("ovsdb") {
                continue;
            }

            if binding.is_some() {
                errs.push(syn::Error::new_spanned(attr, "duplicate #[ovsdb] attribute"));
                continue;
            }

            match attr.parse_args::<syn::LitStr>() {
                Ok(lit) if lit.value().is_empty() => errs.push(syn::Error::new_spanned(
                    &lit,
                    "binding must name a column",
                )),
                Ok(lit) => binding = Some(lit),
                Err(_) => errs.push(syn::Error::new_spanned(
                    attr,
                    "expected `#[ovsdb(\"column[,option]*\")]`",
                )),
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(binding.map(|binding| Field {
            id,
            ident: ident.clone(),
            ty: field.ty.clone(),
            binding,
        }))
    }
}
