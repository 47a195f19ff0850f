//! Duration text in the `300ms`, `1.5h`, `2h45m` style.

use std::time::Duration;

use crate::error::ValueError;

const NANOS_PER_SEC: u128 = 1_000_000_000;

const UNITS: [(&str, u128); 8] = [
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SEC),
    ("m", 60 * NANOS_PER_SEC),
    ("h", 3_600 * NANOS_PER_SEC),
];

/// Parses a sequence of decimal numbers, each with an optional fraction and
/// a unit suffix (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`).
///
/// A bare `0` is accepted without a unit.
///
/// # Errors
///
/// Returns a [`ValueError`] for malformed text, unknown units, negative
/// durations and durations that overflow.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use flagbind::parse_duration;
///
/// assert_eq!(parse_duration("1.2s")?, Duration::from_millis(1200));
/// assert_eq!(parse_duration("1h30m")?, Duration::from_secs(5400));
/// # Ok::<(), flagbind::ValueError>(())
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, ValueError> {
    let body = input.strip_prefix('+').unwrap_or(input);
    if body.starts_with('-') {
        return Err(ValueError::new(format!(
            "negative duration {input:?} is not supported"
        )));
    }
    if body == "0" {
        return Ok(Duration::ZERO);
    }
    if body.is_empty() {
        return Err(invalid(input));
    }
    let mut total: u128 = 0;
    let mut rest = body;
    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = after
            .strip_prefix('.')
            .map_or(("", after), split_digits);
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid(input));
        }
        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, remaining) = after.split_at(unit_len);
        if unit.is_empty() {
            return Err(ValueError::new(format!("missing unit in duration {input:?}")));
        }
        let scale = UNITS
            .iter()
            .find_map(|(name, scale)| (*name == unit).then_some(*scale))
            .ok_or_else(|| ValueError::new(format!("unknown unit {unit:?} in duration {input:?}")))?;
        let amount = scaled(whole, fraction, scale).ok_or_else(|| invalid(input))?;
        total = total.checked_add(amount).ok_or_else(|| invalid(input))?;
        rest = remaining;
    }
    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| invalid(input))?;
    let nanos = u32::try_from(total % NANOS_PER_SEC).map_err(|_| invalid(input))?;
    Ok(Duration::new(secs, nanos))
}

fn invalid(input: &str) -> ValueError {
    ValueError::new(format!("invalid duration {input:?}"))
}

fn split_digits(text: &str) -> (&str, &str) {
    let len = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(len)
}

fn scaled(whole: &str, fraction: &str, scale: u128) -> Option<u128> {
    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let mut amount = whole.checked_mul(scale)?;
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    // Digits beyond nanosecond precision at the largest unit are dropped.
    for digit in fraction.chars().take(20).filter_map(|c| c.to_digit(10)) {
        numerator = numerator * 10 + u128::from(digit);
        denominator *= 10;
    }
    amount = amount.checked_add(numerator * scale / denominator)?;
    Some(amount)
}

/// Renders `duration` canonically, e.g. `1.2s`, `1h0m0s`, `300ms`, `0s`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use flagbind::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(1200)), "1.2s");
/// assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_owned();
    }
    if nanos < NANOS_PER_SEC {
        let (scale, unit) = if nanos < 1_000 {
            (1, "ns")
        } else if nanos < 1_000_000 {
            (1_000, "µs")
        } else {
            (1_000_000, "ms")
        };
        return format!("{}{unit}", decimal(nanos, scale));
    }
    let secs = duration.as_secs();
    let hours = secs / 3_600;
    let minutes = secs / 60 % 60;
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    let seconds = u128::from(secs % 60) * NANOS_PER_SEC + u128::from(duration.subsec_nanos());
    out.push_str(&decimal(seconds, NANOS_PER_SEC));
    out.push('s');
    out
}

fn decimal(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = scale.to_string().len() - 1;
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
