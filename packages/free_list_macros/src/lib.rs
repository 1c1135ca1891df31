#![allow(
    missing_docs,
    reason = "Private API, public API is documented in `free_list` package"
)]

use proc_macro::TokenStream;

#[proc_macro_derive(Linked)]
pub fn derive_linked(item: TokenStream) -> TokenStream {
    free_list_macros_impl::derive_linked::entrypoint(&item.into()).into()
}
