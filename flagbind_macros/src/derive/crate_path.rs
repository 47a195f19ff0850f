//! Path that generated code uses to name the runtime crate.
//!
//! Expansions refer to `flagbind::Flags`, `flagbind::Field` and the hidden
//! probe traits. A crate that only sees `flagbind` through a re-export
//! writes `#[flag(crate = "path::to::flagbind")]` and every reference is
//! rooted there instead.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// Tokens prefixed to every runtime item in the expansion.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { flagbind }, ToTokens::to_token_stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use rstest::rstest;

    #[rstest]
    #[case::unset(None, "flagbind")]
    #[case::renamed(Some("cli"), "cli")]
    #[case::re_exported(Some("app::deps::flagbind"), "app :: deps :: flagbind")]
    #[case::absolute(Some("::flagbind"), ":: flagbind")]
    fn roots_generated_paths(#[case] written: Option<&str>, #[case] expected: &str) -> Result<()> {
        let path = written.map(syn::parse_str::<syn::Path>).transpose()?;
        let tokens = resolve(path.as_ref()).to_string();
        ensure!(tokens == expected, "rooted at {tokens}");
        Ok(())
    }
}
