// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Pace: time needed per unit of distance, stored canonically as seconds
//! per kilometre.
//!
//! ```rust
//! use run42195::{Pace, UnitSystem};
//!
//! let _metric = UnitSystem::Metric.scope();
//! let p: Pace = "4:00".parse().unwrap();
//! assert_eq!(p.seconds_per_km(), 240.0);
//! assert_eq!(p.to_string(), "4:00.0/km");
//! assert!((p.to_speed().km_h() - 15.0).abs() < 1e-12);
//! ```

use crate::constants::{KM_IN_MILE, SECONDS_IN_HOUR};
use crate::distance::Distance;
use crate::duration::Duration;
use crate::error::{Error, ParseFailure, Result};
use crate::interval::{format_interval, parse_interval_as};
use crate::quantity::Quantity;
use crate::speed::Speed;
use crate::unit_system::{get_unit_system, QuantityKind, UnitSystem};
use qtty::{Seconds, Simplify};
use regex::Regex;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::LazyLock;

/// Units a [`Pace`] can be expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PaceUnit {
    /// Seconds per kilometre.
    PerKm,
    /// Seconds per mile.
    PerMile,
}

impl PaceUnit {
    /// Canonical unit name.
    pub const fn name(self) -> &'static str {
        match self {
            PaceUnit::PerKm => "seconds_per_km",
            PaceUnit::PerMile => "seconds_per_mile",
        }
    }

    /// Suffix used when rendering and accepted when parsing.
    pub const fn suffix(self) -> &'static str {
        match self {
            PaceUnit::PerKm => "/km",
            PaceUnit::PerMile => "/mi",
        }
    }

    /// Kilometres in one of the unit's reference distance.
    #[inline]
    const fn km_per_unit(self) -> f64 {
        match self {
            PaceUnit::PerKm => 1.0,
            PaceUnit::PerMile => KM_IN_MILE,
        }
    }
}

static PACE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?P<interval>[0-9:.]+)(?:\s*(?P<unit>/km|/mi))?$").ok());

// ═══════════════════════════════════════════════════════════════════════════
// Pace
// ═══════════════════════════════════════════════════════════════════════════

/// Time per distance. May be infinite (standing still).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Pace {
    per_km: Seconds,
}

impl Pace {
    /// Zero pace (infinitely fast); the identity for summation.
    pub const ZERO: Pace = Pace::from_seconds_per_km(0.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from seconds per `unit`.
    #[inline]
    pub fn new(seconds: f64, unit: PaceUnit) -> Self {
        Self::from_seconds_per_km(seconds / unit.km_per_unit())
    }

    /// Create from seconds per kilometre.
    #[inline]
    pub const fn from_seconds_per_km(seconds: f64) -> Self {
        Self {
            per_km: Seconds::new(seconds),
        }
    }

    /// Create from seconds per mile.
    #[inline]
    pub fn from_seconds_per_mile(seconds: f64) -> Self {
        Self::new(seconds, PaceUnit::PerMile)
    }

    /// Parse an interval optionally followed by `/km` or `/mi`.
    ///
    /// Without a suffix the value is read in the active unit system's pace
    /// unit.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] when the text does not match, or when the interval
    /// part is invalid (seconds or minutes out of range).
    pub fn parse(text: &str) -> Result<Self> {
        let caps = PACE
            .as_ref()
            .and_then(|re| re.captures(text))
            .ok_or_else(|| Error::parse(QuantityKind::Pace, text, ParseFailure::Malformed))?;
        let seconds = parse_interval_as(QuantityKind::Pace, &caps["interval"]).map_err(|e| {
            // Report the whole input, not just the interval slice.
            match e.parse_failure() {
                Some(reason) => Error::parse(QuantityKind::Pace, text, reason),
                None => e,
            }
        })?;
        let unit = match caps.name("unit").map(|m| m.as_str()) {
            Some("/mi") => PaceUnit::PerMile,
            Some(_) => PaceUnit::PerKm,
            None => get_unit_system().pace_unit(),
        };
        Ok(Self::new(seconds, unit))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Seconds needed for one kilometre, as a [`Seconds`] quantity.
    #[inline]
    pub const fn per_km(&self) -> Seconds {
        self.per_km
    }

    /// Seconds per kilometre.
    #[inline]
    pub const fn seconds_per_km(&self) -> f64 {
        self.per_km.value()
    }

    /// Seconds per mile.
    #[inline]
    pub fn seconds_per_mile(&self) -> f64 {
        self.value_in(PaceUnit::PerMile)
    }

    /// Seconds per `unit`.
    #[inline]
    pub fn value_in(&self, unit: PaceUnit) -> f64 {
        self.seconds_per_km() * unit.km_per_unit()
    }

    /// Equivalent speed: `3600 / seconds_per_km` km/h.
    ///
    /// An infinite pace gives zero speed; a zero pace gives infinite speed.
    #[inline]
    pub fn to_speed(&self) -> Speed {
        Speed::from_km_h(SECONDS_IN_HOUR / self.seconds_per_km())
    }

    /// Render in the pace unit of `system`, e.g. `"4:00.0/km"`.
    pub fn format_in(&self, system: UnitSystem) -> String {
        let unit = system.pace_unit();
        format!("{}{}", format_interval(self.value_in(unit), false), unit.suffix())
    }
}

impl Quantity for Pace {
    type Unit = PaceUnit;
    const KIND: QuantityKind = QuantityKind::Pace;

    fn in_unit(value: f64, unit: PaceUnit) -> Self {
        Pace::new(value, unit)
    }

    fn default_unit(system: UnitSystem) -> PaceUnit {
        system.pace_unit()
    }
}

impl FromStr for Pace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pace::parse(s)
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_in(get_unit_system()))
    }
}

impl From<Speed> for Pace {
    #[inline]
    fn from(speed: Speed) -> Self {
        speed.to_pace()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════════

impl Add for Pace {
    type Output = Pace;
    #[inline]
    fn add(self, rhs: Pace) -> Pace {
        Pace {
            per_km: self.per_km + rhs.per_km,
        }
    }
}

impl Sub for Pace {
    type Output = Pace;
    #[inline]
    fn sub(self, rhs: Pace) -> Pace {
        Pace {
            per_km: self.per_km - rhs.per_km,
        }
    }
}

impl Neg for Pace {
    type Output = Pace;
    #[inline]
    fn neg(self) -> Pace {
        Pace::from_seconds_per_km(-self.seconds_per_km())
    }
}

impl Mul<f64> for Pace {
    type Output = Pace;
    #[inline]
    fn mul(self, rhs: f64) -> Pace {
        Pace::from_seconds_per_km(self.seconds_per_km() * rhs)
    }
}

impl Mul<Pace> for f64 {
    type Output = Pace;
    #[inline]
    fn mul(self, rhs: Pace) -> Pace {
        rhs * self
    }
}

/// Pace × distance = time needed.
impl Mul<Distance> for Pace {
    type Output = Duration;
    #[inline]
    fn mul(self, rhs: Distance) -> Duration {
        rhs * self
    }
}

impl Div<f64> for Pace {
    type Output = Pace;
    #[inline]
    fn div(self, rhs: f64) -> Pace {
        Pace::from_seconds_per_km(self.seconds_per_km() / rhs)
    }
}

/// Ratio of two paces.
impl Div for Pace {
    type Output = f64;
    #[inline]
    fn div(self, rhs: Pace) -> f64 {
        (self.per_km / rhs.per_km).simplify().value()
    }
}

impl Sum for Pace {
    fn sum<I: Iterator<Item = Pace>>(iter: I) -> Pace {
        iter.fold(Pace::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Pace> for Pace {
    fn sum<I: Iterator<Item = &'a Pace>>(iter: I) -> Pace {
        iter.copied().sum()
    }
}

#[cfg(feature = "serde")]
canonical_serde!(Pace, seconds_per_km, from_seconds_per_km);

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MARATHON;
    use test_case::test_case;

    #[test_case("4:00", 240.0)]
    #[test_case("4:00.0", 240.0)]
    #[test_case("3:14.5", 194.5)]
    #[test_case("1:00:01", 3_601.0)]
    #[test_case("5:00/km", 300.0 ; "explicit km")]
    #[test_case("5:00 /km", 300.0 ; "space before suffix")]
    fn parses_metric_paces(text: &str, expected: f64) {
        let _metric = UnitSystem::Metric.scope();
        assert_eq!(Pace::parse(text).unwrap().seconds_per_km(), expected);
    }

    #[test]
    fn mile_suffix_and_imperial_default() {
        let explicit = Pace::parse("8:00/mi").unwrap();
        assert!((explicit.seconds_per_mile() - 480.0).abs() < 1e-9);

        let _imperial = UnitSystem::Imperial.scope();
        assert_eq!(Pace::parse("8:00").unwrap(), explicit);
        assert_eq!(Pace::parse("5:00/km").unwrap().seconds_per_km(), 300.0);
    }

    #[test_case("fast", ParseFailure::Malformed)]
    #[test_case("4:00/h", ParseFailure::Malformed ; "unknown suffix")]
    #[test_case("4::00", ParseFailure::Malformed ; "empty group")]
    #[test_case("4:00 ", ParseFailure::Malformed ; "trailing space without suffix")]
    #[test_case("4:75", ParseFailure::SecondsOutOfRange)]
    #[test_case("1:75:00/km", ParseFailure::MinutesOutOfRange)]
    fn rejects_invalid_paces(text: &str, reason: ParseFailure) {
        let err = Pace::parse(text).unwrap_err();
        match err {
            Error::Parse {
                kind,
                input,
                reason: got,
            } => {
                assert_eq!(kind, QuantityKind::Pace);
                assert_eq!(input, text);
                assert_eq!(got, reason);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test_case(240.0, 386.24)]
    #[test_case(f64::INFINITY, f64::INFINITY)]
    fn km_and_mile_units_agree(per_km: f64, per_mile: f64) {
        let a = Pace::from_seconds_per_km(per_km);
        let b = Pace::from_seconds_per_mile(per_mile);
        if per_km.is_finite() {
            assert!((a.seconds_per_km() - b.seconds_per_km()).abs() < 0.01);
        } else {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn display_follows_unit_system() {
        let p = Pace::from_seconds_per_km(240.0);
        assert_eq!(p.format_in(UnitSystem::Metric), "4:00.0/km");
        assert_eq!(p.format_in(UnitSystem::Imperial), "6:26.2/mi");
        let _imperial = UnitSystem::Imperial.scope();
        assert_eq!(p.to_string(), "6:26.2/mi");
        assert_eq!(Pace::from_seconds_per_km(f64::INFINITY).to_string(), "-/mi");
    }

    #[test]
    fn speed_conversion() {
        assert_eq!(Pace::from_seconds_per_km(360.0).to_speed().km_h(), 10.0);
        assert_eq!(Pace::from_seconds_per_km(f64::INFINITY).to_speed().km_h(), 0.0);
        assert!(Pace::ZERO.to_speed().km_h().is_infinite());
        assert_eq!(Pace::from(Speed::from_km_h(12.0)).seconds_per_km(), 300.0);
    }

    #[test]
    fn arithmetic() {
        let a = Pace::from_seconds_per_km(300.0);
        let b = Pace::from_seconds_per_km(60.0);
        assert_eq!(a + b, Pace::from_seconds_per_km(360.0));
        assert_eq!(a - b, Pace::from_seconds_per_km(240.0));
        assert_eq!(a * 2.0, Pace::from_seconds_per_km(600.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a / 5.0, b);
        assert_eq!(a / b, 5.0);
        assert_eq!(-b, Pace::from_seconds_per_km(-60.0));
        assert_eq!((a * MARATHON).seconds(), 300.0 * 42.195);
        assert_eq!([a, b].iter().sum::<Pace>(), a + b);
    }
}
