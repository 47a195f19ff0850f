//! Values that can be set from command-line text.
//!
//! [`Value`] is the capability a field needs to become a flag: render the
//! current value as text and parse text into itself. The crate implements it
//! for the built-in kinds listed on [`Kind`]; any other type opts in by
//! implementing the trait.

mod duration;

use std::time::Duration;

pub use duration::{format_duration, parse_duration};

use crate::error::ValueError;

/// Storage that a flag can read and update through text.
///
/// # Examples
///
/// ```
/// use flagbind::{Value, ValueError};
///
/// #[derive(Default)]
/// struct Level(u8);
///
/// impl Value for Level {
///     fn render(&self) -> String {
///         self.0.to_string()
///     }
///
///     fn set(&mut self, input: &str) -> Result<(), ValueError> {
///         let level: u8 = input.parse().map_err(ValueError::from_display)?;
///         if level > 3 {
///             return Err(ValueError::new("level must be between 0 and 3"));
///         }
///         self.0 = level;
///         Ok(())
///     }
/// }
///
/// let mut level = Level::default();
/// level.set("2")?;
/// assert_eq!(level.render(), "2");
/// assert!(level.set("9").is_err());
/// # Ok::<(), ValueError>(())
/// ```
pub trait Value {
    /// Canonical text form of the current value.
    fn render(&self) -> String;

    /// Parses `input` and stores the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when `input` is not acceptable.
    fn set(&mut self, input: &str) -> Result<(), ValueError>;

    /// Kind reported to the flag-set and usage formatter.
    ///
    /// User types default to [`Kind::Custom`]. Returning [`Kind::Bool`]
    /// makes the flag a switch that needs no value on the command line.
    fn kind(&self) -> Kind {
        Kind::Custom
    }
}

/// Shape of a bound value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Kind {
    /// `bool`
    Bool,
    /// `isize`
    Int,
    /// `i64`
    Int64,
    /// `usize`
    Uint,
    /// `u64`
    Uint64,
    /// `f64`
    Float64,
    /// `String`
    String,
    /// `std::time::Duration`
    Duration,
    /// `Vec<String>`, appended to once per occurrence.
    Strings,
    /// A user-defined [`Value`].
    Custom,
}

impl Kind {
    /// Whether the flag consumes a value on the command line.
    #[must_use]
    pub const fn takes_value(self) -> bool {
        !matches!(self, Self::Bool)
    }

    /// Whether usage output shows a non-zero default for this kind.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Self::Strings | Self::Custom)
    }

    /// Whether `text` is the rendering of this kind's zero value.
    #[must_use]
    pub fn is_zero_rendering(self, text: &str) -> bool {
        match self {
            Self::Bool => text == "false",
            Self::Int | Self::Int64 | Self::Uint | Self::Uint64 | Self::Float64 => {
                text == "0" || text == "-0"
            }
            Self::Duration => text == "0s",
            Self::String | Self::Strings | Self::Custom => text.is_empty(),
        }
    }
}

/// Parses boolean text.
///
/// # Errors
///
/// Returns a [`ValueError`] for anything other than `1 t T TRUE true True`
/// or `0 f F FALSE false False`.
pub fn parse_bool(input: &str) -> Result<bool, ValueError> {
    match input {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::new("parse error")),
    }
}

/// Parses integer text with optional sign, radix prefix and `_` separators.
///
/// `0x`, `0o` and `0b` select hexadecimal, octal and binary; a bare leading
/// `0` selects octal.
///
/// # Errors
///
/// Returns a [`ValueError`] when the text is not an integer or does not fit
/// in `T`.
pub fn parse_integer<T: TryFrom<i128>>(input: &str) -> Result<T, ValueError> {
    let (negative, body) = input.strip_prefix('-').map_or_else(
        || (false, input.strip_prefix('+').unwrap_or(input)),
        |rest| (true, rest),
    );
    let (radix, digits) = split_radix(body);
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() || cleaned.starts_with(['+', '-']) {
        return Err(ValueError::new("parse error"));
    }
    let magnitude = i128::from_str_radix(&cleaned, radix).map_err(ValueError::from_display)?;
    let value = if negative { -magnitude } else { magnitude };
    T::try_from(value).map_err(|_| ValueError::new("value out of range"))
}

fn split_radix(body: &str) -> (u32, &str) {
    const PREFIXES: [(&str, u32); 6] = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];
    for (prefix, radix) in PREFIXES {
        if let Some(rest) = body.strip_prefix(prefix) {
            return (radix, rest);
        }
    }
    match body.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => (8, rest),
        _ => (10, body),
    }
}

impl Value for bool {
    fn render(&self) -> String {
        self.to_string()
    }

    fn set(&mut self, input: &str) -> Result<(), ValueError> {
        *self = parse_bool(input)?;
        Ok(())
    }

    fn kind(&self) -> Kind {
        Kind::Bool
    }
}

macro_rules! integer_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Value for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }

                fn set(&mut self, input: &str) -> Result<(), ValueError> {
                    *self = parse_integer(input)?;
                    Ok(())
                }

                fn kind(&self) -> Kind {
                    Kind::$kind
                }
            }
        )*
    };
}

integer_value! {
    isize => Int,
    i64 => Int64,
    usize => Uint,
    u64 => Uint64,
}

impl Value for f64 {
    fn render(&self) -> String {
        self.to_string()
    }

    fn set(&mut self, input: &str) -> Result<(), ValueError> {
        *self = input.parse().map_err(ValueError::from_display)?;
        Ok(())
    }

    fn kind(&self) -> Kind {
        Kind::Float64
    }
}

impl Value for String {
    fn render(&self) -> String {
        self.clone()
    }

    fn set(&mut self, input: &str) -> Result<(), ValueError> {
        input.clone_into(self);
        Ok(())
    }

    fn kind(&self) -> Kind {
        Kind::String
    }
}

impl Value for Duration {
    fn render(&self) -> String {
        format_duration(*self)
    }

    fn set(&mut self, input: &str) -> Result<(), ValueError> {
        *self = parse_duration(input)?;
        Ok(())
    }

    fn kind(&self) -> Kind {
        Kind::Duration
    }
}

impl Value for Vec<String> {
    fn render(&self) -> String {
        self.join(",")
    }

    fn set(&mut self, input: &str) -> Result<(), ValueError> {
        self.push(input.to_owned());
        Ok(())
    }

    fn kind(&self) -> Kind {
        Kind::Strings
    }
}

#[cfg(test)]
mod tests;
