//! Named sets of flags bound to caller-owned storage.
//!
//! A [`FlagSet`] never owns the values it updates: each [`Flag`] holds a
//! mutable borrow of the caller's storage, so a parse pass writes straight
//! into the original struct. Splitting the argument list is delegated to
//! `clap`; the set turns each matched occurrence back into a
//! [`Value::set`] call, in command-line order per flag.

use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, Write};

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::error::{FlagError, FlagResult};
use crate::value::{Kind, Value};

/// Identifier of the trailing positional arguments inside `clap`.
const REST_ID: &str = "flagbind::rest";

/// What a [`FlagSet`] does when a parse pass fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorHandling {
    /// Return the error to the caller.
    #[default]
    Continue,
    /// Print the error to standard error and exit with status 2, or 0 when
    /// help was requested.
    Exit,
    /// Panic with the error message.
    Panic,
}

/// One named entry in a [`FlagSet`].
pub struct Flag<'a> {
    name: String,
    long: bool,
    help: String,
    param: Option<String>,
    default: String,
    value: &'a mut dyn Value,
}

impl<'a> Flag<'a> {
    /// Creates a flag named `name` bound to `value`.
    ///
    /// The value's current rendering is kept as the flag's default. A
    /// one-character name is spelled `-n`, any other `--name`.
    pub fn new(name: impl Into<String>, value: &'a mut dyn Value) -> Self {
        let name = name.into();
        let long = name.chars().count() != 1;
        let default = value.render();
        Self {
            name,
            long,
            help: String::new(),
            param: None,
            default,
            value,
        }
    }

    /// Sets the help text.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Spells a one-character name as `--n` instead of `-n`.
    #[must_use]
    pub const fn long(mut self) -> Self {
        self.long = true;
        self
    }

    /// Sets the placeholder shown for the flag's value.
    #[must_use]
    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    /// Flag name without leading dashes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text, possibly empty.
    #[must_use]
    pub fn help_text(&self) -> &str {
        &self.help
    }

    /// Placeholder for the flag's value, if any.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// Rendering of the value at the time the flag was created.
    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// The bound value.
    #[must_use]
    pub fn value(&self) -> &dyn Value {
        &*self.value
    }

    /// Kind of the bound value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Whether the flag is spelled with a single dash.
    #[must_use]
    pub const fn is_short(&self) -> bool {
        !self.long
    }

    /// The flag as spelled on a command line, e.g. `--name` or `-n`.
    #[must_use]
    pub fn spelling(&self) -> String {
        let dashes = if self.is_short() { "-" } else { "--" };
        format!("{dashes}{}", self.name)
    }

    fn arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone())
            .action(ArgAction::Append)
            .value_parser(value_parser!(String));
        let mut chars = self.name.chars();
        let mut arg = match (self.long, chars.next(), chars.next()) {
            (false, Some(short), None) => arg.short(short),
            _ => arg.long(self.name.clone()),
        };
        if let Some(param) = &self.param {
            arg = arg.value_name(param.clone());
        }
        if self.kind().takes_value() {
            arg.num_args(1).allow_hyphen_values(true)
        } else {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        }
    }

    fn apply(&mut self, input: &str) -> FlagResult<()> {
        self.value
            .set(input)
            .map_err(|source| FlagError::InvalidValue {
                flag: self.spelling(),
                value: input.to_owned(),
                source,
            })
    }
}

impl fmt::Debug for Flag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("long", &self.long)
            .field("help", &self.help)
            .field("param", &self.param)
            .field("default", &self.default)
            .field("value", &self.value.render())
            .finish()
    }
}

/// A named collection of flags and the state of its last parse pass.
pub struct FlagSet<'a> {
    name: String,
    error_handling: ErrorHandling,
    flags: Vec<Flag<'a>>,
    rest: Option<&'a mut dyn Value>,
    actual: BTreeSet<String>,
    args: Vec<String>,
    parsed: bool,
}

impl<'a> FlagSet<'a> {
    /// Creates an empty set named `name` that returns parse errors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error_handling: ErrorHandling::default(),
            flags: Vec::new(),
            rest: None,
            actual: BTreeSet::new(),
            args: Vec::new(),
            parsed: false,
        }
    }

    /// Sets the policy applied when a parse pass fails.
    #[must_use]
    pub const fn with_error_handling(mut self, error_handling: ErrorHandling) -> Self {
        self.error_handling = error_handling;
        self
    }

    /// Name given at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Policy applied when a parse pass fails.
    #[must_use]
    pub const fn error_handling(&self) -> ErrorHandling {
        self.error_handling
    }

    /// Adds `flag` to the set.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Redefined`] when the name is already taken.
    pub fn insert(&mut self, flag: Flag<'a>) -> FlagResult<()> {
        if self.lookup(&flag.name).is_some() {
            return Err(FlagError::Redefined { name: flag.name });
        }
        tracing::debug!(set = %self.name, flag = %flag.name, kind = ?flag.kind(), "defined flag");
        self.flags.push(flag);
        Ok(())
    }

    /// Adds a flag named `name` bound to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Redefined`] when the name is already taken.
    pub fn var(
        &mut self,
        value: &'a mut dyn Value,
        name: impl Into<String>,
        help: impl Into<String>,
    ) -> FlagResult<()> {
        self.insert(Flag::new(name, value).help(help))
    }

    /// Binds the storage that receives trailing positional arguments.
    ///
    /// Each leftover argument of a parse pass is passed to
    /// [`Value::set`], so a `Vec<String>` accumulates them.
    pub fn set_rest(&mut self, value: &'a mut dyn Value) {
        self.rest = Some(value);
    }

    /// Whether a rest acceptor is bound.
    #[must_use]
    pub const fn has_rest(&self) -> bool {
        self.rest.is_some()
    }

    /// Finds the flag named `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Flag<'a>> {
        self.flags.iter().find(|flag| flag.name == name)
    }

    /// Sets the flag named `name` as if it appeared on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::UnknownFlag`] for an undefined name and
    /// [`FlagError::InvalidValue`] when the value rejects `input`.
    pub fn set(&mut self, name: &str, input: &str) -> FlagResult<()> {
        let Some(flag) = self.flags.iter_mut().find(|flag| flag.name == name) else {
            return Err(FlagError::UnknownFlag {
                flag: name.to_owned(),
            });
        };
        flag.apply(input)?;
        self.actual.insert(name.to_owned());
        Ok(())
    }

    /// Iterates over every flag in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag<'a>> {
        self.flags.iter()
    }

    /// Calls `visit` for every flag in definition order.
    pub fn visit_all(&self, visit: impl FnMut(&Flag<'a>)) {
        self.flags.iter().for_each(visit);
    }

    /// Calls `visit` for every flag that has been set, in definition order.
    pub fn visit(&self, visit: impl FnMut(&Flag<'a>)) {
        self.flags
            .iter()
            .filter(|flag| self.actual.contains(&flag.name))
            .for_each(visit);
    }

    /// Whether [`FlagSet::parse`] has been called.
    #[must_use]
    pub const fn parsed(&self) -> bool {
        self.parsed
    }

    /// Positional arguments left over by the last parse pass.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Parses `args`, which must not include the program name.
    ///
    /// Flags are read up to the first positional argument or a `--`
    /// terminator; everything after is kept as leftover arguments.
    ///
    /// # Errors
    ///
    /// Under [`ErrorHandling::Continue`] returns
    /// [`FlagError::UnknownFlag`], [`FlagError::HelpRequested`],
    /// [`FlagError::InvalidValue`] or [`FlagError::CliParsing`].
    ///
    /// # Panics
    ///
    /// Panics on failure under [`ErrorHandling::Panic`].
    #[expect(
        clippy::panic_in_result_fn,
        reason = "ErrorHandling::Panic raises parse failures"
    )]
    pub fn parse<I>(&mut self, args: I) -> FlagResult<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        self.parsed = true;
        let outcome = self
            .command()
            .try_get_matches_from(&args)
            .map_err(engine_error)
            .and_then(|matches| self.apply(&matches));
        match outcome {
            Ok(()) => {
                tracing::debug!(
                    set = %self.name,
                    set_flags = self.actual.len(),
                    leftover = self.args.len(),
                    "parsed command line"
                );
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    fn command(&self) -> Command {
        let name = if self.name.is_empty() {
            "command".to_owned()
        } else {
            self.name.clone()
        };
        let rest = Arg::new(REST_ID)
            .num_args(0..)
            .action(ArgAction::Append)
            .trailing_var_arg(true)
            .value_parser(value_parser!(String));
        self.flags.iter().fold(
            Command::new(name)
                .no_binary_name(true)
                .disable_help_flag(true)
                .disable_version_flag(true)
                .arg(rest),
            |command, flag| command.arg(flag.arg()),
        )
    }

    fn apply(&mut self, matches: &ArgMatches) -> FlagResult<()> {
        for flag in &mut self.flags {
            let Some(occurrences) = matches.try_get_many::<String>(&flag.name)? else {
                continue;
            };
            for input in occurrences {
                flag.apply(input)?;
            }
            self.actual.insert(flag.name.clone());
        }
        self.args = matches
            .try_get_many::<String>(REST_ID)?
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        if let Some(rest) = self.rest.as_deref_mut() {
            for arg in &self.args {
                rest.set(arg).map_err(|source| FlagError::InvalidValue {
                    flag: REST_ID.to_owned(),
                    value: arg.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    #[expect(
        clippy::panic_in_result_fn,
        reason = "ErrorHandling::Panic raises parse failures"
    )]
    fn fail(&self, err: FlagError) -> FlagResult<()> {
        match self.error_handling {
            ErrorHandling::Continue => Err(err),
            ErrorHandling::Exit => {
                let code = if matches!(err, FlagError::HelpRequested) {
                    0
                } else {
                    2
                };
                if let Err(write_err) = writeln!(io::stderr(), "{}: {err}", self.name) {
                    tracing::warn!(error = %write_err, "failed to report flag error");
                }
                std::process::exit(code)
            }
            ErrorHandling::Panic => panic!("{err}"),
        }
    }
}

fn engine_error(err: clap::Error) -> FlagError {
    if err.kind() == ErrorKind::UnknownArgument
        && let Some(ContextValue::String(flag)) = err.get(ContextKind::InvalidArg)
    {
        let spelled = flag.split_once('=').map_or(flag.as_str(), |(name, _)| name);
        if spelled == "-h" || spelled == "--help" {
            return FlagError::HelpRequested;
        }
        return FlagError::UnknownFlag {
            flag: spelled.to_owned(),
        };
    }
    FlagError::CliParsing(Box::new(err))
}

impl fmt::Debug for FlagSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("error_handling", &self.error_handling)
            .field("flags", &self.flags)
            .field("has_rest", &self.rest.is_some())
            .field("args", &self.args)
            .field("parsed", &self.parsed)
            .finish()
    }
}

#[cfg(test)]
mod tests;
