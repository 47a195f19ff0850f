//! Parser for the compact per-field tag grammar.
//!
//! A tag names the flag, optionally declares the placeholder shown for its
//! value, and carries free-form help text:
//!
//! ```text
//! [--long|-s][=PARAM] [help...]
//! ```
//!
//! A `-s` name is exactly one character; `--long` names may be any length.
//! A standalone `--` or `-` token starts the help text, so help may itself
//! begin with a dash. A tag that is exactly `-` excludes the field instead;
//! see [`is_excluded`].

use std::fmt;

use crate::error::TagError;

/// Tag text that removes a field from registration and usage output.
///
/// The whole tag must match exactly. A padded tag such as `" - "` holds
/// only a help terminator, so it parses as an empty tag and the field is
/// bound under its lower-cased identifier.
pub const EXCLUDED: &str = "-";

/// Reports whether `tag` is the exclusion sentinel.
///
/// Only the whole tag counts: `-` appearing as one token among several is a
/// help terminator, not an exclusion.
///
/// # Examples
///
/// ```
/// use flagbind::tag::is_excluded;
///
/// assert!(is_excluded("-"));
/// assert!(!is_excluded("--"));
/// assert!(!is_excluded("--name - help"));
/// ```
#[must_use]
pub fn is_excluded(tag: &str) -> bool {
    tag == EXCLUDED
}

/// Returns the dash prefix of a command-line style token.
///
/// # Examples
///
/// ```
/// use flagbind::tag::arg_prefix;
///
/// assert_eq!(arg_prefix("--name"), "--");
/// assert_eq!(arg_prefix("-n"), "-");
/// assert_eq!(arg_prefix("name"), "");
/// ```
#[must_use]
pub fn arg_prefix(token: &str) -> &'static str {
    if token.starts_with("--") {
        "--"
    } else if token.starts_with('-') {
        "-"
    } else {
        ""
    }
}

/// Parsed descriptor for one field's tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptTag {
    name: String,
    long: bool,
    param: Option<String>,
    help: Option<String>,
}

impl OptTag {
    /// Parses `tag` into a descriptor.
    ///
    /// Returns `Ok(None)` when the tag declares nothing, which is the case
    /// for an empty tag or a tag holding only a help terminator.
    ///
    /// # Errors
    ///
    /// Returns a [`TagError`] when the tag declares two names, two
    /// placeholders, or help and placeholders without any name, and when
    /// a `-s` name is longer than one character or a name starts with a
    /// dash.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagbind::tag::OptTag;
    ///
    /// let tag = OptTag::parse("--level=N set the level")?.expect("declared");
    /// assert_eq!(tag.name(), "level");
    /// assert_eq!(tag.param(), Some("N"));
    /// assert_eq!(tag.help(), Some("set the level"));
    /// # Ok::<(), flagbind::TagError>(())
    /// ```
    pub fn parse(tag: &str) -> Result<Option<Self>, TagError> {
        tracing::trace!(tag, "parsing flag tag");
        let mut out = Self::default();
        let mut names = 0_usize;
        let mut help = None;
        let mut tokens = tag.split_whitespace();
        while let Some(token) = tokens.next() {
            if token == "-" || token == "--" {
                help = Some(join(tokens.by_ref()));
                break;
            }
            if let Some(param) = token.strip_prefix('=').filter(|p| !p.is_empty()) {
                out.take_param(tag, param)?;
                continue;
            }
            let prefix = arg_prefix(token);
            let Some(rest) = token.strip_prefix(prefix).filter(|_| !prefix.is_empty()) else {
                help = Some(join(std::iter::once(token).chain(tokens.by_ref())));
                break;
            };
            let (name, param) = rest.split_once('=').unwrap_or((rest, ""));
            if !param.is_empty() {
                out.take_param(tag, param)?;
            }
            names += 1;
            if names > 1 {
                return Err(TagError::TooManyNames { tag: tag.to_owned() });
            }
            let short = prefix == "-";
            if name.starts_with('-') || (short && name.chars().count() > 1) {
                return Err(TagError::InvalidName {
                    tag: tag.to_owned(),
                    name: name.to_owned(),
                });
            }
            name.clone_into(&mut out.name);
            out.long = !short;
        }
        out.help = help.filter(|h| !h.is_empty());
        if out.name.is_empty() {
            if names == 0 && out.param.is_none() && out.help.is_none() {
                return Ok(None);
            }
            return Err(TagError::MissingName { tag: tag.to_owned() });
        }
        Ok(Some(out))
    }

    fn take_param(&mut self, tag: &str, param: &str) -> Result<(), TagError> {
        if self.param.is_some() {
            return Err(TagError::MultipleParams { tag: tag.to_owned() });
        }
        self.param = Some(param.to_owned());
        Ok(())
    }

    /// Flag name without leading dashes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the name was written in `--long` form.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        self.long
    }

    /// Placeholder shown for the flag's value, if declared.
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// Help text, if any.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

fn join<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

impl fmt::Display for OptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        if !self.name.is_empty() {
            let prefix = if self.long { "--" } else { "-" };
            write!(f, "{prefix}{} ", self.name)?;
        }
        if let Some(param) = &self.param {
            write!(f, "={param} ")?;
        }
        if let Some(help) = &self.help {
            write!(f, "{help:?} ")?;
        }
        f.write_str("}")
    }
}
