use super::{ErrorSet, Field};

#[derive(Debug)]
pub(crate) struct Model {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Table the model maps to
    pub(crate) table: syn::LitStr,

    /// Bound fields, in declaration order
    pub(crate) fields: Vec<Field>,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model fields must be named",
            ));
        };

        // Generics are not supported yet
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "model generics are not supported",
            ));
        }

        let mut errs = ErrorSet::new();
        let mut fields = vec![];

        for field in node.named.iter() {
            match Field::from_ast(field, fields.len()) {
                Ok(Some(field)) => fields.push(field),
                Ok(None) => {}
                Err(err) => errs.push(err),
            }
        }

        let table = match table_from_ast(&ast.attrs) {
            Ok(table) => table,
            Err(err) => {
                errs.push(err);
                None
            }
        };

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Model {
            table: table
                .unwrap_or_else(|| syn::LitStr::new(&ast.ident.to_string(), ast.ident.span())),
            ident: ast.ident.clone(),
            fields,
        })
    }
}

fn table_from_ast(attrs: &[syn::Attribute]) -> syn::Result<Option<syn::LitStr>> {
    let mut table = None;

    for attr in attrs {
        if !attr.path().is_ident("table") {
            continue;
        }

        if table.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate `table` attribute"));
        }

        let syn::Meta::NameValue(meta) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected `table = \"table_name\"`",
            ));
        };

        let syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Str(lit),
            ..
        }) = &meta.value
        else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected `table = \"table_name\"`",
            ));
        };

        table = Some(lit.clone());
    }

    Ok(table)
}
