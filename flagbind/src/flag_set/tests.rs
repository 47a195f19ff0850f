//! Unit tests for flag-set definition and parse passes.

use std::time::Duration;

use super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

#[derive(Default)]
struct Upper(String);

impl Value for Upper {
    fn render(&self) -> String {
        self.0.clone()
    }

    fn set(&mut self, input: &str) -> Result<(), crate::ValueError> {
        if input.is_empty() {
            return Err(crate::ValueError::new("empty"));
        }
        self.0 = input.to_uppercase();
        Ok(())
    }
}

#[rstest]
fn var_registers_a_named_entry() -> Result<()> {
    let mut value = Upper::default();
    let mut set = FlagSet::new("v");
    set.var(&mut value, "flag", "usage")?;
    let mut names = Vec::new();
    set.visit_all(|flag| names.push(flag.name().to_owned()));
    ensure!(names == ["flag"], "got {names:?}");
    Ok(())
}

#[rstest]
fn redefinition_is_rejected() -> Result<()> {
    let mut first = String::new();
    let mut second = String::new();
    let mut set = FlagSet::new("dup");
    set.var(&mut first, "name", "")?;
    let err = set
        .var(&mut second, "name", "")
        .err()
        .ok_or_else(|| anyhow!("expected redefinition error"))?;
    ensure!(err.to_string() == "flag redefined: name", "got {err}");
    Ok(())
}

#[rstest]
fn parse_writes_through_to_storage() -> Result<()> {
    let mut name = "bob".to_owned();
    let mut count = 0_i64;
    let mut verbose = false;
    let mut wait = Duration::ZERO;
    {
        let mut set = FlagSet::new("demo");
        set.insert(Flag::new("the_name", &mut name).param("NAME"))?;
        set.var(&mut count, "count", "")?;
        set.var(&mut verbose, "v", "")?;
        set.var(&mut wait, "wait", "")?;
        ensure!(
            set.lookup("the_name").map(Flag::default_value) == Some("bob"),
            "default should be captured at definition"
        );
        set.parse([
            "--the_name=fred",
            "--count",
            "-42",
            "-v",
            "--wait",
            "1.2s",
            "a",
            "--count",
            "b",
        ])?;
        ensure!(set.parsed(), "set should report a parse");
        ensure!(set.args() == ["a", "--count", "b"], "got {:?}", set.args());
        let mut seen = Vec::new();
        set.visit(|flag| seen.push(flag.spelling()));
        ensure!(
            seen == ["--the_name", "--count", "-v", "--wait"],
            "got {seen:?}"
        );
    }
    ensure!(name == "fred", "name is {name}");
    ensure!(count == -42, "count is {count}");
    ensure!(verbose, "verbose should be set");
    ensure!(wait == Duration::from_millis(1200), "wait is {wait:?}");
    Ok(())
}

#[rstest]
fn repeated_flags_apply_in_order() -> Result<()> {
    let mut list = vec!["seed".to_owned()];
    let mut last = String::new();
    {
        let mut set = FlagSet::new("multi");
        set.var(&mut list, "multi", "")?;
        set.var(&mut last, "last", "")?;
        set.parse(["--multi", "a", "--last", "x", "--multi=b", "--last", "y"])?;
    }
    ensure!(list == ["seed", "a", "b"], "got {list:?}");
    ensure!(last == "y", "got {last}");
    Ok(())
}

#[rstest]
#[case::attached_false(&["--debug=false"], false)]
#[case::bare(&["--debug"], true)]
#[case::absent(&[], true)]
fn bool_flags_take_optional_attached_values(
    #[case] args: &[&str],
    #[case] expected: bool,
) -> Result<()> {
    let mut debug = true;
    let mut set = FlagSet::new("bools");
    set.var(&mut debug, "debug", "")?;
    if !args.is_empty() {
        debug_parse(&mut set, args)?;
    }
    drop(set);
    ensure!(debug == expected, "debug is {debug}");
    Ok(())
}

fn debug_parse(set: &mut FlagSet<'_>, args: &[&str]) -> Result<()> {
    set.parse(args.iter().copied())?;
    Ok(())
}

#[rstest]
fn bool_flags_do_not_swallow_positionals() -> Result<()> {
    let mut verbose = false;
    let mut set = FlagSet::new("bools");
    set.var(&mut verbose, "v", "")?;
    set.parse(["-v", "file"])?;
    ensure!(set.args() == ["file"], "got {:?}", set.args());
    Ok(())
}

#[rstest]
#[case::short(&["-v"], "flag provided but not defined: -v")]
#[case::long(&["--nope=1"], "flag provided but not defined: --nope")]
fn unknown_flags_are_reported(#[case] args: &[&str], #[case] message: &str) -> Result<()> {
    let mut set = FlagSet::new("empty");
    let err = set
        .parse(args.iter().copied())
        .err()
        .ok_or_else(|| anyhow!("expected an error"))?;
    ensure!(err.to_string() == message, "got {err}");
    ensure!(err.is_user_error(), "unknown flags are user errors");
    Ok(())
}

#[rstest]
fn help_is_reported_when_undefined() -> Result<()> {
    let mut set = FlagSet::new("empty");
    let err = set.parse(["--help"]).err();
    ensure!(
        matches!(err, Some(FlagError::HelpRequested)),
        "got {err:?}"
    );
    Ok(())
}

#[rstest]
fn invalid_values_name_the_flag() -> Result<()> {
    let mut count = 0_usize;
    let mut set = FlagSet::new("bad");
    set.var(&mut count, "count", "")?;
    let err = set
        .parse(["--count", "many"])
        .err()
        .ok_or_else(|| anyhow!("expected an error"))?;
    let text = err.to_string();
    ensure!(
        text.starts_with(r#"invalid value "many" for flag --count: "#),
        "got {text}"
    );
    Ok(())
}

#[rstest]
fn rest_acceptor_collects_leftovers() -> Result<()> {
    let mut name = String::new();
    let mut rest: Vec<String> = Vec::new();
    {
        let mut set = FlagSet::new("rest");
        set.var(&mut name, "name", "")?;
        set.set_rest(&mut rest);
        ensure!(set.has_rest(), "rest acceptor should be bound");
        set.parse(["--name", "x", "--", "--name", "y"])?;
    }
    ensure!(name == "x", "name is {name}");
    ensure!(rest == ["--name", "y"], "got {rest:?}");
    Ok(())
}

#[rstest]
fn set_marks_flags_as_actual() -> Result<()> {
    let mut shout = Upper::default();
    let mut set = FlagSet::new("set");
    set.var(&mut shout, "shout", "")?;
    set.set("shout", "hey")?;
    ensure!(
        set.lookup("shout").map(|flag| flag.value().render()) == Some("HEY".to_owned()),
        "value should be updated"
    );
    ensure!(set.set("shout", "").is_err(), "empty input is rejected");
    ensure!(set.set("missing", "x").is_err(), "unknown names are rejected");
    Ok(())
}

#[rstest]
#[should_panic(expected = "flag provided but not defined: -x")]
fn panic_mode_raises_parse_errors() {
    let mut set = FlagSet::new("strict").with_error_handling(ErrorHandling::Panic);
    let _ = set.parse(["-x"]);
}

#[rstest]
fn single_letter_names_can_be_spelled_long() -> Result<()> {
    let mut long = false;
    let mut short = false;
    {
        let mut set = FlagSet::new("spell");
        set.insert(Flag::new("x", &mut long).long())?;
        set.insert(Flag::new("y", &mut short))?;
        let spellings: Vec<_> = set.iter().map(Flag::spelling).collect();
        ensure!(spellings == ["--x", "-y"], "got {spellings:?}");
        set.parse(["--x", "-y"])?;
    }
    ensure!(long && short, "both switches set");
    let mut unused = false;
    let mut set = FlagSet::new("spell");
    set.insert(Flag::new("x", &mut unused).long())?;
    let err = set
        .parse(["-x"])
        .err()
        .ok_or_else(|| anyhow!("-x is not declared"))?;
    ensure!(err.to_string() == "flag provided but not defined: -x", "got {err}");
    Ok(())
}
