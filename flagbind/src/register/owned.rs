//! Option sets that own their storage.

use super::{abort, try_dup, try_register_new};
use crate::error::FlagResult;
use crate::field::Flags;
use crate::flag_set::FlagSet;

/// A duplicated option struct paired with the name of its flag-set.
///
/// The flag-set borrows the struct mutably, so it is built on demand by
/// [`OwnedFlags::flag_set`] rather than stored alongside.
#[derive(Clone, Debug)]
pub struct OwnedFlags<T> {
    name: String,
    options: T,
}

impl<T: Flags> OwnedFlags<T> {
    /// Name given to the flag-set.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owned options.
    #[must_use]
    pub const fn options(&self) -> &T {
        &self.options
    }

    /// The owned options, for adjusting defaults before parsing.
    #[must_use]
    pub const fn options_mut(&mut self) -> &mut T {
        &mut self.options
    }

    /// Releases the owned options.
    #[must_use]
    pub fn into_options(self) -> T {
        self.options
    }

    /// Binds the owned options into a new flag-set.
    ///
    /// # Errors
    ///
    /// Fails when a declaration is invalid.
    pub fn flag_set(&mut self) -> FlagResult<FlagSet<'_>> {
        try_register_new(self.name.clone(), &mut self.options)
    }

    /// Parses `args` into the owned options, returning leftover arguments.
    ///
    /// # Errors
    ///
    /// Fails when a declaration is invalid or the command line is rejected.
    pub fn parse<I>(&mut self, args: I) -> FlagResult<Vec<String>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut set = self.flag_set()?;
        set.parse(args)?;
        Ok(set.args().to_vec())
    }
}

/// Duplicates `opts` (see [`super::dup`]) into an [`OwnedFlags`] named
/// `name`, so several independent option sets of one shape can coexist.
///
/// # Errors
///
/// Fails when a declaration is invalid.
pub fn try_register_dup<T: Flags + Clone>(
    name: impl Into<String>,
    opts: &T,
) -> FlagResult<OwnedFlags<T>> {
    Ok(OwnedFlags {
        name: name.into(),
        options: try_dup(opts)?,
    })
}

/// Duplicates `opts` into an [`OwnedFlags`] named `name`.
///
/// # Panics
///
/// Panics with the error message when a declaration is invalid.
#[must_use]
pub fn register_dup<T: Flags + Clone>(name: impl Into<String>, opts: &T) -> OwnedFlags<T> {
    abort(try_register_dup(name, opts))
}
