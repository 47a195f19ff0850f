//! Walks a [`Flags`] struct and binds its fields to a [`FlagSet`].
//!
//! Every entry point shares one walk over the declaration-ordered field
//! list. The walk skips unexported and excluded fields, parses each tag,
//! rejects unsupported types and resolves the flag name. Entry points come
//! in pairs: `try_*` returns the walk's error while the plain form panics
//! with it, since a malformed declaration is a defect in the calling
//! program rather than in its command line.

mod owned;

use std::collections::HashSet;
use std::ops::Deref;

pub use owned::{OwnedFlags, register_dup, try_register_dup};

use crate::error::{FlagError, FlagResult};
use crate::field::{Field, Flags};
use crate::flag_set::{Flag, FlagSet};
use crate::tag::{self, OptTag};
use crate::value::{Kind, Value};

/// Placeholder shown for value flags declared without `=PARAM`.
pub const DEFAULT_PLACEHOLDER: &str = "VALUE";

/// Resolved description of one bindable field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    ident: &'static str,
    name: String,
    long: bool,
    param: Option<String>,
    help: String,
    default: String,
    kind: Kind,
    rest: bool,
}

impl FieldInfo {
    /// Field identifier as declared.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Flag name: the tag's name, else the lower-cased identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the tag spelled the name in long form.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        self.long
    }

    /// Placeholder declared in the tag.
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// Help text, possibly empty.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Rendering of the field's value when the struct was walked.
    #[must_use]
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// Kind of the bound value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Whether the field receives trailing positional arguments.
    #[must_use]
    pub const fn is_rest(&self) -> bool {
        self.rest
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

    /// Placeholder shown in usage output; switches have none.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        match self.param.as_deref() {
            Some(param) => Some(param),
            None if self.kind.takes_value() => Some(DEFAULT_PLACEHOLDER),
            None => None,
        }
    }

    /// Whether usage output appends the default in brackets.
    #[must_use]
    pub fn shows_default(&self) -> bool {
        self.kind.is_scalar() && !self.kind.is_zero_rendering(&self.default)
    }
}

/// A resolved field still holding its storage borrow.
struct Bound<V> {
    info: FieldInfo,
    value: V,
}

fn walk<'v, V>(fields: Vec<Field<V>>) -> FlagResult<Vec<Bound<V>>>
where
    V: Deref<Target = dyn Value + 'v>,
{
    let mut names = HashSet::new();
    let mut rest_field = None;
    let mut bound = Vec::with_capacity(fields.len());
    for field in fields {
        if field.ident.starts_with('_') || tag::is_excluded(field.tag) {
            continue;
        }
        let tag = OptTag::parse(field.tag).map_err(|source| FlagError::InvalidTag {
            field: field.ident,
            source,
        })?;
        let value = field.value.map_err(|unsupported| FlagError::InvalidType {
            type_name: unsupported.type_name(),
        })?;
        let kind = value.kind();
        let (name, long, param, help) = tag.map_or_else(
            || {
                let name = field.ident.to_lowercase();
                let long = name.chars().count() > 1;
                (name, long, None, String::new())
            },
            |tag| {
                (
                    tag.name().to_owned(),
                    tag.is_long(),
                    tag.param().map(str::to_owned),
                    tag.help().unwrap_or_default().to_owned(),
                )
            },
        );
        if field.rest {
            if kind != Kind::Strings || rest_field.is_some() {
                return Err(FlagError::InvalidRest { field: field.ident });
            }
            rest_field = Some(field.ident);
        } else if !names.insert(name.clone()) {
            return Err(FlagError::Redefined { name });
        }
        let info = FieldInfo {
            ident: field.ident,
            name,
            long,
            param,
            help,
            default: value.render(),
            kind,
            rest: field.rest,
        };
        bound.push(Bound { info, value });
    }
    Ok(bound)
}

fn abort<T>(result: FlagResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

/// Checks the declarations of `opts` without binding anything.
///
/// # Errors
///
/// Returns [`FlagError::InvalidTag`], [`FlagError::InvalidType`],
/// [`FlagError::InvalidRest`] or [`FlagError::Redefined`].
pub fn try_validate<T: Flags + ?Sized>(opts: &T) -> FlagResult<()> {
    walk(opts.fields()).map(drop)
}

/// Checks the declarations of `opts` without binding anything.
///
/// # Panics
///
/// Panics with the error message when a declaration is invalid.
pub fn validate<T: Flags + ?Sized>(opts: &T) {
    abort(try_validate(opts));
}

/// Lists the bindable fields of `opts` in declaration order.
///
/// # Errors
///
/// Fails as [`try_validate`] does.
pub fn describe<T: Flags + ?Sized>(opts: &T) -> FlagResult<Vec<FieldInfo>> {
    Ok(walk(opts.fields())?
        .into_iter()
        .map(|bound| bound.info)
        .collect())
}

/// Binds every field of `opts` into `set`.
///
/// Names are checked against the set before anything is inserted, so a
/// failed registration leaves `set` untouched. A rest field replaces any
/// acceptor already bound to the set.
///
/// # Errors
///
/// Fails as [`try_validate`] does, or with [`FlagError::Redefined`] when
/// the set already defines one of the names.
pub fn try_register_set<'a, T: Flags + ?Sized>(
    opts: &'a mut T,
    set: &mut FlagSet<'a>,
) -> FlagResult<()> {
    let bound = walk(opts.fields_mut())?;
    if let Some(taken) = bound
        .iter()
        .find(|bound| !bound.info.rest && set.lookup(&bound.info.name).is_some())
    {
        return Err(FlagError::Redefined {
            name: taken.info.name.clone(),
        });
    }
    for Bound { info, value } in bound {
        if info.rest {
            set.set_rest(value);
            continue;
        }
        let mut flag = Flag::new(info.name, value).help(info.help);
        if info.long {
            flag = flag.long();
        }
        if let Some(param) = info.param {
            flag = flag.param(param);
        }
        set.insert(flag)?;
    }
    Ok(())
}

/// Binds every field of `opts` into `set`.
///
/// # Panics
///
/// Panics with the error message when [`try_register_set`] fails.
pub fn register_set<'a, T: Flags + ?Sized>(opts: &'a mut T, set: &mut FlagSet<'a>) {
    abort(try_register_set(opts, set));
}

/// Binds every field of `opts` into a new set named `name`.
///
/// # Errors
///
/// Fails as [`try_validate`] does.
pub fn try_register_new<'a, T: Flags + ?Sized>(
    name: impl Into<String>,
    opts: &'a mut T,
) -> FlagResult<FlagSet<'a>> {
    let mut set = FlagSet::new(name);
    try_register_set(opts, &mut set)?;
    Ok(set)
}

/// Binds every field of `opts` into a new set named `name`.
///
/// # Panics
///
/// Panics with the error message when a declaration is invalid.
pub fn register_new<'a, T: Flags + ?Sized>(name: impl Into<String>, opts: &'a mut T) -> FlagSet<'a> {
    abort(try_register_new(name, opts))
}

/// Clones `opts`, resetting every field tagged `-` to its default.
///
/// # Errors
///
/// Fails as [`try_validate`] does.
pub fn try_dup<T: Flags + Clone>(opts: &T) -> FlagResult<T> {
    try_validate(opts)?;
    let mut copy = opts.clone();
    copy.reset_excluded();
    Ok(copy)
}

/// Clones `opts`, resetting every field tagged `-` to its default.
///
/// # Panics
///
/// Panics with the error message when a declaration is invalid.
#[must_use]
pub fn dup<T: Flags + Clone>(opts: &T) -> T {
    abort(try_dup(opts))
}

/// Current value of the field bound to `name`.
///
/// Returns `None` when no bindable field resolves to `name`, including
/// excluded and rest fields, or when any declaration of `opts` is invalid.
#[must_use]
pub fn lookup<'a, T: Flags + ?Sized>(opts: &'a T, name: &str) -> Option<&'a dyn Value> {
    walk(opts.fields())
        .ok()?
        .into_iter()
        .find(|bound| !bound.info.rest && bound.info.name == name)
        .map(|bound| bound.value)
}

/// Binds `opts` to a set named after the running program and parses the
/// process arguments.
///
/// Returns the positional arguments left after the flags.
///
/// # Errors
///
/// Returns the parse error for a malformed command line.
///
/// # Panics
///
/// Panics with the error message when a declaration is invalid.
pub fn register_and_parse<T: Flags + ?Sized>(opts: &mut T) -> FlagResult<Vec<String>> {
    register_and_parse_from(opts, std::env::args_os().skip(1).map(lossy))
}

/// Binds `opts` to a set named after the running program and parses
/// `args`, which exclude the program name.
///
/// # Errors
///
/// Returns the parse error for a malformed command line.
///
/// # Panics
///
/// Panics with the error message when a declaration is invalid.
pub fn register_and_parse_from<T, I>(opts: &mut T, args: I) -> FlagResult<Vec<String>>
where
    T: Flags + ?Sized,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let program = std::env::args_os().next().map(lossy).unwrap_or_default();
    let mut set = register_new(program, opts);
    set.parse(args)?;
    Ok(set.args().to_vec())
}

/// Binds `opts` to a set named `args[0]` and parses the remaining
/// arguments, as a subcommand would.
///
/// With an empty `args` the declarations are only checked.
///
/// # Errors
///
/// Returns declaration errors as well as parse errors.
pub fn sub_register_and_parse<T, S>(opts: &mut T, args: &[S]) -> FlagResult<Vec<String>>
where
    T: Flags + ?Sized,
    S: AsRef<str>,
{
    let Some((name, rest)) = args.split_first() else {
        try_validate(opts)?;
        return Ok(Vec::new());
    };
    let mut set = try_register_new(name.as_ref(), opts)?;
    set.parse(rest.iter().map(|arg| arg.as_ref().to_owned()))?;
    Ok(set.args().to_vec())
}

fn lossy(arg: std::ffi::OsString) -> String {
    arg.to_string_lossy().into_owned()
}
