use super::{util, Expand};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_impl(&self) -> TokenStream {
        let ovsdb = &self.ovsdb;
        let model_ident = &self.model.ident;
        let table = &self.model.table;
        let declare_body = self.expand_declare_body();
        let load_field_arms = self.expand_load_field_arms();
        let field_arms = self.expand_field_arms();

        quote! {
            impl #ovsdb::Model for #model_ident {
                const TABLE: &'static str = #table;

                fn declare() -> #ovsdb::Vec<#ovsdb::FieldDecl> {
                    #declare_body
                }

                fn load_field(
                    &mut self,
                    index: usize,
                    column: &str,
                    value: #ovsdb::Option<#ovsdb::FieldValue>,
                ) -> #ovsdb::Result<()> {
                    match index {
                        #( #load_field_arms )*
                        _ => {}
                    }
                    Ok(())
                }

                fn field(&self, index: usize) -> #ovsdb::Option<#ovsdb::FieldValue> {
                    match index {
                        #( #field_arms )*
                        _ => #ovsdb::Option::None,
                    }
                }
            }
        }
    }

    fn expand_declare_body(&self) -> TokenStream {
        let ovsdb = &self.ovsdb;

        let decls = self.model.fields.iter().map(|field| {
            let name = field.ident.to_string();
            let binding = &field.binding;
            let ty = &field.ty;
            let ty_name = util::type_name(ty);

            quote! {
                #ovsdb::FieldDecl {
                    name: #name,
                    binding: #ovsdb::Option::Some(#binding),
                    shape: <#ty as #ovsdb::Primitive>::SHAPE,
                    nullable: <#ty as #ovsdb::Primitive>::NULLABLE,
                    ty: #ty_name,
                }
            }
        });

        quote! {
            <#ovsdb::Vec<#ovsdb::FieldDecl>>::from([ #( #decls ),* ])
        }
    }

    fn expand_load_field_arms(&self) -> Vec<TokenStream> {
        let ovsdb = &self.ovsdb;

        self.model
            .fields
            .iter()
            .map(|field| {
                let index = util::int(field.id);
                let ident = &field.ident;
                let ty = &field.ty;

                quote! {
                    #index => self.#ident = <#ty as #ovsdb::Primitive>::load(column, value)?,
                }
            })
            .collect()
    }

    fn expand_field_arms(&self) -> Vec<TokenStream> {
        let ovsdb = &self.ovsdb;

        self.model
            .fields
            .iter()
            .map(|field| {
                let index = util::int(field.id);
                let ident = &field.ident;
                let ty = &field.ty;

                quote! {
                    #index => <#ty as #ovsdb::Primitive>::to_field_value(&self.#ident),
                }
            })
            .collect()
    }
}
