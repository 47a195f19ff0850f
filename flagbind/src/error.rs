//! Error types produced while binding, registering and parsing flags.
//!
//! Two tiers share [`FlagError`]. Declaration defects (malformed tags,
//! unsupported field types, clashing names) come out of the walk over a
//! struct's fields and are raised as panics by the aborting entry points.
//! Command-line defects (unknown flags, malformed values) come out of a
//! parse pass and are always returned.

use std::fmt;

use thiserror::Error;

/// Errors reported while parsing a field's tag text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TagError {
    /// More than one `--long` or `-s` token was found.
    #[error("tag has too many names: {tag:?}")]
    TooManyNames {
        /// Tag text as written on the field.
        tag: String,
    },

    /// More than one `=PARAM` placeholder was found.
    #[error("tag has multiple parameter names: {tag:?}")]
    MultipleParams {
        /// Tag text as written on the field.
        tag: String,
    },

    /// The tag carries help or a placeholder but never names the flag.
    #[error("tag missing option name: {tag:?}")]
    MissingName {
        /// Tag text as written on the field.
        tag: String,
    },

    /// The name cannot be spelled on a command line: a `-s` name longer
    /// than one character, or a name that itself starts with a dash.
    #[error("tag has invalid option name {name:?}: {tag:?}")]
    InvalidName {
        /// Tag text as written on the field.
        tag: String,
        /// Name as it appears after the dashes.
        name: String,
    },
}

/// Failure reported by [`crate::Value::set`] when text cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValueError {
    message: String,
}

impl ValueError {
    /// Creates an error carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wraps any displayable parse failure.
    #[must_use]
    pub fn from_display(err: impl fmt::Display) -> Self {
        Self::new(err.to_string())
    }

    /// Human-readable reason the value was rejected.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised by registration, validation and parse passes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// A field's tag text does not follow the tag grammar.
    #[error("field {field}: {source}")]
    InvalidTag {
        /// Identifier of the offending field.
        field: &'static str,
        /// Grammar violation reported by the tag parser.
        #[source]
        source: TagError,
    },

    /// A field's type cannot be bound to a flag.
    #[error("invalid option type: {type_name}")]
    InvalidType {
        /// Name of the unsupported type.
        type_name: &'static str,
    },

    /// A field marked as the rest acceptor is not a list of strings.
    #[error("field {field}: rest arguments must be bound to a list of strings")]
    InvalidRest {
        /// Identifier of the offending field.
        field: &'static str,
    },

    /// Two entries resolved to the same flag name.
    #[error("flag redefined: {name}")]
    Redefined {
        /// Name claimed twice.
        name: String,
    },

    /// The command line names a flag the set does not define.
    #[error("flag provided but not defined: {flag}")]
    UnknownFlag {
        /// Flag as spelled on the command line.
        flag: String,
    },

    /// `-h` or `--help` was given and the set does not define it.
    #[error("flag: help requested")]
    HelpRequested,

    /// A flag's value was rejected by its bound value.
    #[error("invalid value {value:?} for flag {flag}: {source}")]
    InvalidValue {
        /// Flag as spelled in usage output.
        flag: String,
        /// Text supplied on the command line.
        value: String,
        /// Reason reported by the bound value.
        #[source]
        source: ValueError,
    },

    /// The parse engine rejected the argument list.
    #[error("failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// Parsed matches could not be read back.
    #[error("failed to read parsed arguments: {0}")]
    Matches(#[from] clap::parser::MatchesError),
}

impl FlagError {
    /// Whether the error stems from the command line rather than from the
    /// declarations being bound.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownFlag { .. }
                | Self::HelpRequested
                | Self::InvalidValue { .. }
                | Self::CliParsing(_)
                | Self::Matches(_)
        )
    }
}

/// Convenient alias for results produced by this crate.
pub type FlagResult<T> = Result<T, FlagError>;
