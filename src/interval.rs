// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Interval text: `[[hh:]mm:]ss[.sss]`.
//!
//! [`parse_interval`] turns clock-style text into a number of seconds and
//! [`format_interval`] goes the other way. Both are shared by
//! [`Duration`](crate::Duration) and [`Pace`](crate::Pace).
//!
//! ```rust
//! use run42195::{format_interval, parse_interval};
//!
//! assert_eq!(parse_interval("1:12:12").unwrap(), 4_332.0);
//! assert_eq!(format_interval(4_332.0, false), "1:12:12.0");
//! assert_eq!(format_interval(194.5, true), "3:14");
//! ```

use crate::error::{Error, ParseFailure, Result};
use crate::unit_system::QuantityKind;
use regex::Regex;
use std::sync::LazyLock;

/// The grammar is strict: no sign, no surrounding whitespace, and a
/// fractional part needs digits on both sides of the dot.
static INTERVAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:(?:(?P<h>\d+):)?(?P<m>\d+):)?(?P<s>\d+(?:\.\d+)?)$").ok());

/// Parse an interval into a number of seconds.
///
/// # Errors
///
/// [`Error::Parse`] with
/// - [`ParseFailure::Malformed`] when the text does not follow the grammar,
/// - [`ParseFailure::SecondsOutOfRange`] when seconds ≥ 60 and a minute group
///   is present,
/// - [`ParseFailure::MinutesOutOfRange`] when minutes ≥ 60 and an hour group
///   is present.
pub fn parse_interval(text: &str) -> Result<f64> {
    parse_interval_as(QuantityKind::Duration, text)
}

pub(crate) fn parse_interval_as(kind: QuantityKind, text: &str) -> Result<f64> {
    let fail = |reason| Error::parse(kind, text, reason);
    let caps = INTERVAL
        .as_ref()
        .and_then(|re| re.captures(text))
        .ok_or_else(|| fail(ParseFailure::Malformed))?;

    let group = |name: &str| -> Result<Option<f64>> {
        caps.name(name)
            .map(|m| {
                m.as_str()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| fail(ParseFailure::Malformed))
            })
            .transpose()
    };
    let hours = group("h")?;
    let minutes = group("m")?;
    let seconds = group("s")?.ok_or_else(|| fail(ParseFailure::Malformed))?;

    if minutes.is_some() && seconds >= 60.0 {
        return Err(fail(ParseFailure::SecondsOutOfRange));
    }
    if let (Some(_), Some(m)) = (hours, minutes) {
        if m >= 60.0 {
            return Err(fail(ParseFailure::MinutesOutOfRange));
        }
    }

    let total = hours.unwrap_or(0.0) * 3_600.0 + minutes.unwrap_or(0.0) * 60.0 + seconds;
    if !total.is_finite() {
        return Err(fail(ParseFailure::Malformed));
    }
    Ok(total)
}

/// Render a number of seconds as `M:SS.s`, `M:SS` or `H:MM:SS.s`.
///
/// - Non-finite input (±∞, NaN) renders as `"-"`, and so does any
///   magnitude whose count of tenths does not fit in a `u64` (about
///   1.8e18 seconds).
/// - With `int_seconds` the seconds are truncated to a whole number;
///   otherwise the total is rounded to a tenth before it is split, so a
///   value just under a minute rolls over (`59.96` → `"1:00.0"`).
/// - Negative input renders as `-` followed by the magnitude, unless it
///   rounds (or truncates) to zero.
/// - The hour group only appears once there are at least 60 minutes.
pub fn format_interval(seconds: f64, int_seconds: bool) -> String {
    if !seconds.is_finite() {
        return "-".to_owned();
    }
    // Work in integer tenths so the split never produces "60.0" seconds.
    let scaled = if int_seconds {
        seconds.abs().trunc() * 10.0
    } else {
        (seconds.abs() * 10.0).round()
    };
    if scaled >= u64::MAX as f64 {
        return "-".to_owned();
    }
    let tenths = scaled as u64;
    let sign = if seconds < 0.0 && tenths > 0 { "-" } else { "" };
    let total_secs = tenths / 10;
    let frac = tenths % 10;
    let (minutes, secs) = (total_secs / 60, total_secs % 60);

    let sec_text = if int_seconds {
        format!("{secs:02}")
    } else {
        format!("{secs:02}.{frac}")
    };

    if minutes >= 60 {
        let (hours, minutes) = (minutes / 60, minutes % 60);
        format!("{sign}{hours}:{minutes:02}:{sec_text}")
    } else {
        format!("{sign}{minutes}:{sec_text}")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1", 1.0)]
    #[test_case("1:12", 72.0)]
    #[test_case("1:12:12", 4_332.0)]
    #[test_case("0.1", 0.1)]
    #[test_case("4:00.0", 240.0)]
    #[test_case("3:14.5", 194.5)]
    #[test_case("999:59:59", 3_599_999.0)]
    #[test_case("75:00", 4_500.0 ; "minutes unbounded without hours")]
    #[test_case("90", 90.0 ; "seconds unbounded alone")]
    #[test_case("0:00:00", 0.0 ; "all zero is zero")]
    fn parses_valid_intervals(text: &str, expected: f64) {
        assert!((parse_interval(text).unwrap() - expected).abs() < 1e-9);
    }

    #[test_case("", ParseFailure::Malformed ; "empty")]
    #[test_case("2:", ParseFailure::Malformed ; "trailing colon")]
    #[test_case("1::", ParseFailure::Malformed ; "empty groups")]
    #[test_case("1:2:3:4", ParseFailure::Malformed ; "too many groups")]
    #[test_case("1.2.5", ParseFailure::Malformed ; "two dots")]
    #[test_case("12km", ParseFailure::Malformed ; "unit suffix")]
    #[test_case("abc 1:12:12", ParseFailure::Malformed ; "leading words")]
    #[test_case("1:20pm", ParseFailure::Malformed ; "trailing words")]
    #[test_case(" 1:20", ParseFailure::Malformed ; "leading space")]
    #[test_case("-5", ParseFailure::Malformed ; "negative")]
    #[test_case("1.5:00", ParseFailure::Malformed ; "fractional minutes")]
    #[test_case("1:74", ParseFailure::SecondsOutOfRange ; "seconds over minute")]
    #[test_case("1:1:74", ParseFailure::SecondsOutOfRange ; "seconds over hour")]
    #[test_case("1:60", ParseFailure::SecondsOutOfRange ; "exactly sixty seconds")]
    #[test_case("1:69:02", ParseFailure::MinutesOutOfRange ; "minutes over hour")]
    #[test_case(&"9".repeat(400), ParseFailure::Malformed ; "overflows to infinity")]
    fn rejects_invalid_intervals(text: &str, reason: ParseFailure) {
        let err = parse_interval(text).unwrap_err();
        assert_eq!(err.parse_failure(), Some(reason), "input {text:?}");
    }

    #[test_case(240.0, false, "4:00.0")]
    #[test_case(5.0, false, "0:05.0" ; "seconds padded under zero minutes")]
    #[test_case(194.5, false, "3:14.5")]
    #[test_case(194.5, true, "3:14")]
    #[test_case(10_126.8, false, "2:48:46.8" ; "hour rollover")]
    #[test_case(3_605.0, true, "1:00:05" ; "minutes padded under hours")]
    #[test_case(59.96, false, "1:00.0" ; "rounding carries into minutes")]
    #[test_case(3_599.96, false, "1:00:00.0" ; "rounding carries into hours")]
    #[test_case(59.99, true, "0:59" ; "int seconds truncate")]
    #[test_case(0.0, false, "0:00.0")]
    #[test_case(-60.0, false, "-1:00.0" ; "negative is signed")]
    #[test_case(-0.04, false, "0:00.0" ; "negative rounding to zero is unsigned")]
    #[test_case(-0.5, true, "0:00" ; "negative truncating to zero is unsigned")]
    #[test_case(1e19, false, "-" ; "beyond representable tenths")]
    fn formats_intervals(seconds: f64, int_seconds: bool, expected: &str) {
        assert_eq!(format_interval(seconds, int_seconds), expected);
    }

    #[test]
    fn non_finite_renders_dash() {
        assert_eq!(format_interval(f64::INFINITY, false), "-");
        assert_eq!(format_interval(f64::NEG_INFINITY, true), "-");
        assert_eq!(format_interval(f64::NAN, false), "-");
    }

    #[test]
    fn well_formed_text_round_trips() {
        for text in ["4:00.0", "3:14.5", "1:02:03.4", "0:07.0"] {
            assert_eq!(format_interval(parse_interval(text).unwrap(), false), text);
        }
    }
}
