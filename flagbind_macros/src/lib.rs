//! Procedural macros for `flagbind`.
//!
//! [`Flags`] lists a struct's named fields in declaration order, pairing
//! each with its tag text and a borrow of its storage. Tag grammar,
//! supported types and name clashes are checked by `flagbind` when the
//! struct is registered.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `flagbind::Flags`.
///
/// Field attributes:
///
/// - `#[flag("--name=PARAM help text")]` sets the field's tag;
///   `#[flag("-")]` excludes the field.
/// - `#[flag(rest)]` binds a `Vec<String>` field to the positional
///   arguments left after the flags.
///
/// The struct attribute `#[flag(crate = "path")]` names the runtime crate
/// when it is re-exported or renamed. Fields whose name starts with `_` are
/// skipped.
#[proc_macro_derive(Flags, attributes(flag))]
pub fn derive_flags(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
