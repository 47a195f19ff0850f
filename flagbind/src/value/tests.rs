//! Unit tests for the built-in value kinds.

use super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

#[rstest]
#[case("true", true)]
#[case("T", true)]
#[case("1", true)]
#[case("False", false)]
#[case("0", false)]
#[case("f", false)]
fn bool_accepts_go_literals(#[case] input: &str, #[case] expected: bool) -> Result<()> {
    let mut value = !expected;
    value.set(input)?;
    ensure!(value == expected, "{input} parsed as {value}");
    Ok(())
}

#[rstest]
#[case("yes")]
#[case("")]
#[case("TrUe")]
fn bool_rejects_other_text(#[case] input: &str) {
    let mut value = false;
    assert!(value.set(input).is_err(), "{input:?} should be rejected");
}

#[rstest]
#[case("-42", -42)]
#[case("+17", 17)]
#[case("0x1f", 31)]
#[case("0o17", 15)]
#[case("017", 15)]
#[case("0b101", 5)]
#[case("1_000", 1000)]
#[case("0", 0)]
fn integers_accept_radix_prefixes(#[case] input: &str, #[case] expected: i64) -> Result<()> {
    let mut value = 0_i64;
    value.set(input)?;
    ensure!(value == expected, "{input} parsed as {value}");
    Ok(())
}

#[rstest]
#[case("-1")]
#[case("18446744073709551616")]
#[case("0x")]
#[case("--1")]
#[case("ten")]
fn unsigned_rejects_out_of_range_and_garbage(#[case] input: &str) {
    let mut value = 0_u64;
    assert!(value.set(input).is_err(), "{input:?} should be rejected");
}

#[rstest]
fn unsigned_accepts_full_range() -> Result<()> {
    let mut value = 0_u64;
    value.set("18446744073709551615")?;
    ensure!(value == u64::MAX, "got {value}");
    let mut small = 0_usize;
    small.set("7")?;
    ensure!(small == 7, "got {small}");
    Ok(())
}

#[rstest]
fn float_renders_shortest_form() -> Result<()> {
    let mut value = 0.0_f64;
    value.set("1.425")?;
    ensure!(value.render() == "1.425", "rendered {}", value.render());
    ensure!(0.0_f64.render() == "0", "zero renders as 0");
    Ok(())
}

#[rstest]
fn strings_append_in_order() -> Result<()> {
    let mut values = vec!["seed".to_owned()];
    values.set("a")?;
    values.set("b")?;
    ensure!(values == ["seed", "a", "b"], "got {values:?}");
    ensure!(values.render() == "seed,a,b", "rendered {}", values.render());
    ensure!(values.kind() == Kind::Strings, "kind should be Strings");
    Ok(())
}

#[rstest]
#[case("1.2s", Duration::from_millis(1200))]
#[case("300ms", Duration::from_millis(300))]
#[case("1h30m", Duration::from_secs(5400))]
#[case("1.5h", Duration::from_secs(5400))]
#[case("2µs", Duration::from_micros(2))]
#[case("2us", Duration::from_micros(2))]
#[case("15ns", Duration::from_nanos(15))]
#[case(".5s", Duration::from_millis(500))]
#[case("0", Duration::ZERO)]
#[case("+1m", Duration::from_secs(60))]
fn durations_parse(#[case] input: &str, #[case] expected: Duration) -> Result<()> {
    let parsed = parse_duration(input).map_err(|err| anyhow!("{input}: {err}"))?;
    ensure!(parsed == expected, "{input} parsed as {parsed:?}");
    Ok(())
}

#[rstest]
#[case("")]
#[case("5")]
#[case("-1s")]
#[case("1x")]
#[case("s")]
#[case("1..5s")]
fn durations_reject_malformed_text(#[case] input: &str) {
    assert!(parse_duration(input).is_err(), "{input:?} should be rejected");
}

#[rstest]
#[case(Duration::ZERO, "0s")]
#[case(Duration::from_millis(1200), "1.2s")]
#[case(Duration::from_secs(3600), "1h0m0s")]
#[case(Duration::from_secs(90), "1m30s")]
#[case(Duration::from_millis(300), "300ms")]
#[case(Duration::from_micros(1500), "1.5ms")]
#[case(Duration::from_nanos(15), "15ns")]
fn durations_render_canonically(#[case] input: Duration, #[case] expected: &str) {
    assert_eq!(format_duration(input), expected);
}

#[rstest]
#[case(Kind::Bool, "false", true)]
#[case(Kind::Bool, "true", false)]
#[case(Kind::Int, "0", true)]
#[case(Kind::Float64, "0", true)]
#[case(Kind::String, "", true)]
#[case(Kind::String, "foo", false)]
#[case(Kind::Duration, "0s", true)]
fn zero_renderings_are_recognised(#[case] kind: Kind, #[case] text: &str, #[case] zero: bool) {
    assert_eq!(kind.is_zero_rendering(text), zero);
}
