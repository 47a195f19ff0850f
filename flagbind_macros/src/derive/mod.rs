//! Expansion of `#[derive(Flags)]`.

pub(crate) mod crate_path;
pub(crate) mod generate;
pub(crate) mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Expands the derive for `input`, or explains why it cannot.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.crate_path.as_ref());
    Ok(generate::flags_impl(&parsed, &krate))
}
