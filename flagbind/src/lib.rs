//! Declarative command-line flags bound to struct fields.
//!
//! Fields of a struct deriving [`Flags`] carry compact tags such as
//! `#[flag("--count=N how many times")]`. Registration turns each field into
//! a flag whose storage is the field itself, so a parse pass writes the
//! parsed values straight into the caller's struct. The same descriptions
//! drive the aligned help listing produced by [`render_help`].
//!
//! ```
//! use flagbind::{Flags, register_new};
//!
//! #[derive(Flags, Default)]
//! struct Options {
//!     #[flag("--name=NAME who to greet")]
//!     name: String,
//!     #[flag("-v be verbose")]
//!     verbose: bool,
//! }
//!
//! let mut options = Options::default();
//! let mut set = register_new("greet", &mut options);
//! set.parse(["--name", "bob", "-v", "extra"])?;
//! assert_eq!(set.args(), ["extra"]);
//! drop(set);
//! assert_eq!(options.name, "bob");
//! assert!(options.verbose);
//! # Ok::<(), flagbind::FlagError>(())
//! ```

extern crate self as flagbind;

pub use flagbind_macros::Flags;

mod error;
mod field;
mod flag_set;
mod register;
pub mod tag;
mod usage;
mod value;

pub use error::{FlagError, FlagResult, TagError, ValueError};
pub use field::{Field, FieldMut, FieldRef, Flags, Unsupported};
pub use flag_set::{ErrorHandling, Flag, FlagSet};
pub use register::{
    DEFAULT_PLACEHOLDER, FieldInfo, OwnedFlags, describe, dup, lookup, register_and_parse,
    register_and_parse_from, register_dup, register_new, register_set, sub_register_and_parse,
    try_dup, try_register_dup, try_register_new, try_register_set, try_validate, validate,
};
pub use tag::OptTag;
pub use usage::{HelpStyle, help, render_help, usage_line};
pub use value::{Kind, Value, format_duration, parse_bool, parse_duration, parse_integer};

#[doc(hidden)]
pub mod __private {
    pub use crate::field::probe::{BindFallback, BindValue, Probe};
}
