//! Implementation of `#[derive(Linked)]`.
//!
//! Locates the field that threads an item into the idle chain of a `FreeList`. The field is
//! found by its literal name and must be typed exactly as an optional owning pointer to the
//! deriving struct. Anything else is rejected at compile time, so a malformed item type never
//! reaches a running program.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields};

use crate::syn_helpers::{names_self, single_type_argument};

/// The only accepted name for the linkage field.
const LINK_FIELD_NAME: &str = "next";

const ERR_NOT_A_STRUCT: &str = "#[derive(Linked)] can only be used on structs";
const ERR_NOT_NAMED_FIELDS: &str = "#[derive(Linked)] requires a struct with named fields";
const ERR_MISSING_FIELD: &str =
    "#[derive(Linked)] requires a field named `next` of type `Option<Box<Self>>`";
const ERR_WRONG_FIELD_TYPE: &str = "the `next` field must have type `Option<Box<Self>>`";

#[must_use]
pub fn entrypoint(input: &TokenStream) -> TokenStream {
    let input = match syn::parse2::<DeriveInput>(input.clone()) {
        Ok(input) => input,
        Err(e) => return e.to_compile_error(),
    };

    core(&input).unwrap_or_else(|e| e.to_compile_error())
}

fn core(input: &DeriveInput) -> syn::Result<TokenStream> {
    let link_field = resolve_link_field(input)?;
    let link_ident = &link_field.ident;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::free_list::Linked for #name #ty_generics #where_clause {
            #[inline]
            fn next_mut(&mut self) -> &mut ::core::option::Option<::std::boxed::Box<Self>> {
                &mut self.#link_ident
            }
        }
    })
}

fn resolve_link_field(input: &DeriveInput) -> syn::Result<&Field> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, ERR_NOT_A_STRUCT));
    };

    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(&input.ident, ERR_NOT_NAMED_FIELDS));
    };

    let field = fields
        .named
        .iter()
        .find(|field| field.ident.as_ref().is_some_and(|ident| ident == LINK_FIELD_NAME))
        .ok_or_else(|| syn::Error::new_spanned(&input.ident, ERR_MISSING_FIELD))?;

    let is_exact_link_type = single_type_argument(&field.ty, "Option")
        .and_then(|boxed| single_type_argument(boxed, "Box"))
        .is_some_and(|pointee| names_self(pointee, &input.ident));

    if !is_exact_link_type {
        return Err(syn::Error::new_spanned(&field.ty, ERR_WRONG_FIELD_TYPE));
    }

    Ok(field)
}
