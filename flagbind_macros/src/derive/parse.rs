//! Parsing of the derive input and its `#[flag]` attributes.

use syn::parse::ParseStream;
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Ident, LitStr, Type};

/// Everything generation needs from the derive input.
pub(crate) struct FlagsInput<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub crate_path: Option<syn::Path>,
    pub fields: Vec<FlagField<'a>>,
}

/// One emitted field.
pub(crate) struct FlagField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub tag: String,
    pub rest: bool,
}

impl FlagField<'_> {
    /// Whether the tag removes the field from registration.
    pub(crate) fn is_excluded(&self) -> bool {
        self.tag == "-"
    }
}

enum FieldAttr {
    Tag(String),
    Rest,
}

/// Gathers the struct identifier, generics, crate override and fields.
///
/// Fields whose identifier starts with `_` are dropped here.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<FlagsInput<'_>> {
    let ident = &input.ident;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    ident,
                    format!("`Flags` requires named fields; `{ident}` is not a struct with named fields"),
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                ident,
                format!("`Flags` can only be derived for structs; `{ident}` is not a struct"),
            ));
        }
    };
    let crate_path = parse_crate_path(&input.attrs)?;
    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        if field_ident.to_string().starts_with('_') {
            continue;
        }
        let (tag, rest) = match parse_field_attr(&field.attrs)? {
            Some(FieldAttr::Tag(tag)) => (tag, false),
            Some(FieldAttr::Rest) => (String::new(), true),
            None => (String::new(), false),
        };
        fields.push(FlagField {
            ident: field_ident,
            ty: &field.ty,
            tag,
            rest,
        });
    }
    Ok(FlagsInput {
        ident,
        generics: &input.generics,
        crate_path,
        fields,
    })
}

/// Extract `crate = "..."` from struct-level `#[flag(...)]` attributes.
fn parse_crate_path(attrs: &[Attribute]) -> syn::Result<Option<syn::Path>> {
    let mut crate_path = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("flag")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                let path: syn::Path = lit.parse()?;
                crate_path = Some(path);
                return Ok(());
            }
            Err(meta.error("unsupported `flag` option on a struct; expected `crate = \"...\"`"))
        })?;
    }
    Ok(crate_path)
}

fn parse_field_attr(attrs: &[Attribute]) -> syn::Result<Option<FieldAttr>> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("flag")) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate `flag` attribute"));
        }
        found = Some(attr.parse_args_with(field_attr_args)?);
    }
    Ok(found)
}

fn field_attr_args(input: ParseStream<'_>) -> syn::Result<FieldAttr> {
    let lookahead = input.lookahead1();
    if lookahead.peek(LitStr) {
        let tag: LitStr = input.parse()?;
        Ok(FieldAttr::Tag(tag.value()))
    } else if lookahead.peek(Ident) {
        let word: Ident = input.parse()?;
        if word == "rest" {
            Ok(FieldAttr::Rest)
        } else {
            Err(syn::Error::new_spanned(word, "expected a tag string or `rest`"))
        }
    } else {
        Err(lookahead.error())
    }
}
