//! Usage summaries and aligned help listings.
//!
//! Output is built from [`FieldInfo`] descriptions alone, so help can be
//! rendered before, after or without a parse pass. A struct that fails to
//! walk is rendered as if it declared no options.

use std::io::{self, Write};

use crate::field::Flags;
use crate::register::{FieldInfo, describe};

/// Layout of the help listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HelpStyle {
    /// Spaces before each flag.
    pub indent: usize,
    /// Spaces between the flag column and the help column.
    pub gap: usize,
    /// Widest flag that still shares its line with help text. Wider flags
    /// put their help on the following line.
    pub max_left_width: usize,
    /// Line width that help text is wrapped to.
    pub width: usize,
}

impl Default for HelpStyle {
    fn default() -> Self {
        Self {
            indent: 2,
            gap: 4,
            max_left_width: 24,
            width: 80,
        }
    }
}

/// Narrowest help column kept when wrapping, however wide the flags are.
const MIN_HELP_WIDTH: usize = 20;

impl HelpStyle {
    /// Writes the usage line (when `program` is non-empty) followed by one
    /// row per option of `opts`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `out`.
    pub fn write<W, T>(
        &self,
        out: &mut W,
        program: &str,
        positional: &str,
        opts: Option<&T>,
    ) -> io::Result<()>
    where
        W: Write + ?Sized,
        T: Flags + ?Sized,
    {
        out.write_all(self.render(program, positional, opts).as_bytes())
    }

    /// Renders what [`HelpStyle::write`] writes.
    #[must_use]
    pub fn render<T: Flags + ?Sized>(
        &self,
        program: &str,
        positional: &str,
        opts: Option<&T>,
    ) -> String {
        let infos = options(opts);
        let mut output = String::new();
        if !program.is_empty() {
            output.push_str("Usage: ");
            output.push_str(&summary(program, positional, &infos));
            output.push('\n');
        }
        let rows: Vec<_> = infos
            .iter()
            .map(|info| (left_column(info), help_text(info)))
            .collect();
        let left_width = rows
            .iter()
            .map(|(left, _)| left.chars().count())
            .filter(|width| *width <= self.max_left_width)
            .max()
            .unwrap_or(0);
        let help_column = self.indent + left_width + self.gap;
        let help_width = self.width.saturating_sub(help_column).max(MIN_HELP_WIDTH);
        for (left, help) in rows {
            self.push_row(&mut output, &left, left_width, &wrap(&help, help_width));
        }
        output
    }

    fn push_row(&self, output: &mut String, left: &str, left_width: usize, lines: &[String]) {
        let indent = " ".repeat(self.indent);
        let continuation = " ".repeat(self.indent + left_width + self.gap);
        output.push_str(&indent);
        output.push_str(left);
        let mut lines = lines.iter();
        let used = left.chars().count();
        if used <= left_width
            && let Some(first) = lines.next()
        {
            output.push_str(&" ".repeat(left_width - used + self.gap));
            output.push_str(first);
        }
        output.push('\n');
        for line in lines {
            output.push_str(&continuation);
            output.push_str(line);
            output.push('\n');
        }
    }
}

fn options<T: Flags + ?Sized>(opts: Option<&T>) -> Vec<FieldInfo> {
    let Some(opts) = opts else {
        return Vec::new();
    };
    match describe(opts) {
        Ok(infos) => infos.into_iter().filter(|info| !info.is_rest()).collect(),
        Err(err) => {
            tracing::debug!(error = %err, "rendering usage without options");
            Vec::new()
        }
    }
}

fn summary(program: &str, positional: &str, infos: &[FieldInfo]) -> String {
    let mut parts = vec![program.to_owned()];
    parts.extend(infos.iter().map(|info| format!("[{}]", spelled(info))));
    parts.push(positional.to_owned());
    parts.retain(|part| !part.is_empty());
    parts.join(" ")
}

fn spelled(info: &FieldInfo) -> String {
    info.placeholder().map_or_else(
        || info.spelling(),
        |param| format!("{}={param}", info.spelling()),
    )
}

fn left_column(info: &FieldInfo) -> String {
    if info.is_short() {
        format!(" {}", spelled(info))
    } else {
        spelled(info)
    }
}

fn help_text(info: &FieldInfo) -> String {
    let mut text = info.help().to_owned();
    if info.shows_default() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&format!("[{}]", info.default_value()));
    }
    text
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// One-line usage summary: `program [--flag=PARAM] [-f] positional`.
///
/// Empty parts are omitted, and `None` options contribute no flags.
///
/// # Examples
///
/// ```
/// use flagbind::{Flags, usage_line};
///
/// #[derive(Flags, Default)]
/// struct Options {
///     name: String,
/// }
///
/// let line = usage_line("cmd", "param", Some(&Options::default()));
/// assert_eq!(line, "cmd [--name=VALUE] param");
/// assert_eq!(usage_line("cmd", "", None::<&()>), "cmd");
/// ```
#[must_use]
pub fn usage_line<T: Flags + ?Sized>(program: &str, positional: &str, opts: Option<&T>) -> String {
    summary(program, positional, &options(opts))
}

/// Writes help for `opts` using the default [`HelpStyle`].
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn help<W, T>(out: &mut W, program: &str, positional: &str, opts: Option<&T>) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Flags + ?Sized,
{
    HelpStyle::default().write(out, program, positional, opts)
}

/// Renders help for `opts` using the default [`HelpStyle`].
#[must_use]
pub fn render_help<T: Flags + ?Sized>(program: &str, positional: &str, opts: Option<&T>) -> String {
    HelpStyle::default().render(program, positional, opts)
}
