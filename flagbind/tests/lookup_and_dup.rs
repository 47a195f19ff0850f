//! Lookup of current field values and duplication of option structs.

use anyhow::{Result, ensure};
use flagbind::{Flags, dup, lookup, register_dup, validate};
use rstest::rstest;

#[derive(Flags, Clone, Default)]
struct Opts {
    #[flag("-")]
    ignore: bool,
    #[flag("--option=A_VERY_LONG_NAME some flag")]
    option: String,
    lazy: String,
}

fn opts() -> Opts {
    Opts {
        ignore: true,
        option: "value".to_owned(),
        lazy: "lazy".to_owned(),
    }
}

#[rstest]
#[case::tagged("option", Some("value"))]
#[case::untagged("lazy", Some("lazy"))]
#[case::excluded("ignore", None)]
#[case::missing("missgin", None)]
fn lookup_returns_current_values(#[case] name: &str, #[case] want: Option<&str>) {
    let opts = opts();
    let got = lookup(&opts, name).map(|value| value.render());
    assert_eq!(got.as_deref(), want);
}

#[derive(Flags, Default)]
struct Invalid {
    #[flag("invalid tag")]
    invalid: String,
    #[flag("--option")]
    option: String,
    lazy: String,
}

#[rstest]
fn lookup_refuses_structs_with_invalid_tags() {
    assert!(lookup(&Invalid::default(), "option").is_none());
    assert!(lookup(&Invalid::default(), "lazy").is_none());
}

#[rstest]
fn lookup_sees_parsed_values() -> Result<()> {
    let mut opts = opts();
    {
        let mut set = flagbind::try_register_new("lookup", &mut opts)?;
        set.parse(["--option", "changed"])?;
    }
    let got = lookup(&opts, "option").map(|value| value.render());
    ensure!(got.as_deref() == Some("changed"), "got {got:?}");
    Ok(())
}

#[derive(Flags, Clone, Default)]
struct Private {
    flag: String,
    #[flag("-")]
    private: String,
}

#[rstest]
fn dup_clears_excluded_fields() {
    let source = Private {
        flag: "flag".to_owned(),
        private: "private".to_owned(),
    };
    let copy = dup(&source);
    assert_eq!(copy.flag, "flag");
    assert_eq!(copy.private, "");
    assert_eq!(source.private, "private");
}

#[derive(Flags, Clone, Default)]
struct BadTag {
    #[flag("bad tag")]
    opt: bool,
}

#[rstest]
#[should_panic(expected = "tag missing option name")]
fn dup_panics_on_bad_tags() {
    let _copy = dup(&BadTag::default());
}

#[rstest]
#[should_panic(expected = "tag missing option name")]
fn validate_panics_on_bad_tags() {
    validate(&BadTag::default());
}

#[rstest]
fn registered_duplicates_do_not_alias() -> Result<()> {
    let source = opts();
    let mut left = register_dup("left", &source);
    let mut right = register_dup("right", &source);
    left.parse(["--lazy", "l"])?;
    right.parse(["--lazy", "r"])?;
    ensure!(left.options().lazy == "l", "left is {}", left.options().lazy);
    ensure!(right.options().lazy == "r", "right is {}", right.options().lazy);
    ensure!(!right.options().ignore, "excluded field reset in duplicates");
    ensure!(source.lazy == "lazy", "source is untouched");
    let owned = right.into_options();
    ensure!(owned.option == "value", "option is {}", owned.option);
    Ok(())
}
