mod model;
mod util;

use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The model being expanded
    model: &'a Model,

    /// Path prefix for generated code support types
    ovsdb: TokenStream,
}

pub(super) fn model(model: &Model) -> TokenStream {
    let expand = Expand {
        model,
        ovsdb: quote!(_ovsdb_orm::codegen_support),
    };

    wrap_in_const(expand.expand_model_impl())
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use ovsdb_orm as _ovsdb_orm;
            #code
        };
    }
}
