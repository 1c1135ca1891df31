#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![allow(
    missing_docs,
    reason = "Private API, public API is documented in `free_list` package"
)]

pub mod derive_linked;
mod syn_helpers;
