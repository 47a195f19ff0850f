//! Token generation for the `Flags` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

use super::parse::{FlagField, FlagsInput};

/// Builds `impl Flags` for the parsed input.
pub(crate) fn flags_impl(input: &FlagsInput<'_>, krate: &TokenStream) -> TokenStream {
    let ident = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let probe_use = if input.fields.is_empty() {
        quote! {}
    } else {
        quote! {
            #[allow(unused_imports, reason = "only one binding trait applies per field type")]
            use #krate::__private::{BindFallback as _, BindValue as _, Probe};
        }
    };
    let read = input.fields.iter().map(|field| field_entry(field, krate, false));
    let write = input.fields.iter().map(|field| field_entry(field, krate, true));
    let resets = input
        .fields
        .iter()
        .filter(|field| field.is_excluded())
        .map(|field| {
            let name = field.ident;
            quote! { self.#name = ::core::default::Default::default(); }
        });
    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Flags for #ident #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<#krate::FieldRef<'_>> {
                #probe_use
                ::std::vec![#(#read),*]
            }

            fn fields_mut(&mut self) -> ::std::vec::Vec<#krate::FieldMut<'_>> {
                #probe_use
                ::std::vec![#(#write),*]
            }

            fn reset_excluded(&mut self) {
                #(#resets)*
            }
        }
    }
}

fn field_entry(field: &FlagField<'_>, krate: &TokenStream, mutable: bool) -> TokenStream {
    let member = field.ident;
    let ty = field.ty;
    let name = field.ident.unraw().to_string();
    let tag = &field.tag;
    let rest = field.rest;
    let value = if mutable {
        quote! { (&Probe::<#ty>::new()).bind_mut(&mut self.#member) }
    } else {
        quote! { (&Probe::<#ty>::new()).bind(&self.#member) }
    };
    quote! {
        #krate::Field {
            ident: #name,
            tag: #tag,
            rest: #rest,
            value: #value,
        }
    }
}
