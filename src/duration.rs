// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Elapsed time, stored canonically in seconds.
//!
//! Text goes through the interval grammar (`[[hh:]mm:]ss[.sss]`) and
//! `chrono::Duration` values convert in both directions.

use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::interval::{format_interval, parse_interval_as};
use crate::pace::Pace;
use crate::quantity::Quantity;
use crate::speed::Speed;
use crate::unit_system::{QuantityKind, UnitSystem};
use qtty::{Seconds, Simplify};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Units a [`Duration`] can be expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    /// Canonical unit name.
    pub const fn name(self) -> &'static str {
        match self {
            DurationUnit::Seconds => "seconds",
            DurationUnit::Minutes => "minutes",
            DurationUnit::Hours => "hours",
        }
    }

    #[inline]
    const fn seconds_factor(self) -> f64 {
        match self {
            DurationUnit::Seconds => 1.0,
            DurationUnit::Minutes => 60.0,
            DurationUnit::Hours => 3_600.0,
        }
    }
}

/// A signed span of elapsed time.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Duration {
    seconds: Seconds,
}

impl Duration {
    /// Zero elapsed time.
    pub const ZERO: Duration = Duration::from_seconds(0.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a value in `unit`.
    #[inline]
    pub fn new(value: f64, unit: DurationUnit) -> Self {
        Self::from_seconds(value * unit.seconds_factor())
    }

    /// Create from seconds.
    #[inline]
    pub const fn from_seconds(seconds: f64) -> Self {
        Self {
            seconds: Seconds::new(seconds),
        }
    }

    /// Create from a [`Seconds`] quantity.
    #[inline]
    pub const fn from_quantity(seconds: Seconds) -> Self {
        Self { seconds }
    }

    /// Create from minutes.
    #[inline]
    pub fn from_minutes(minutes: f64) -> Self {
        Self::new(minutes, DurationUnit::Minutes)
    }

    /// Create from hours.
    #[inline]
    pub fn from_hours(hours: f64) -> Self {
        Self::new(hours, DurationUnit::Hours)
    }

    /// Parse interval text such as `"2:00:35"` or `"45.3"`.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] with the interval parser's failure reason.
    pub fn parse(text: &str) -> Result<Self> {
        parse_interval_as(QuantityKind::Duration, text).map(Self::from_seconds)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The underlying [`Seconds`] quantity.
    #[inline]
    pub const fn quantity(&self) -> Seconds {
        self.seconds
    }

    /// Seconds.
    #[inline]
    pub const fn seconds(&self) -> f64 {
        self.seconds.value()
    }

    /// Minutes.
    #[inline]
    pub fn minutes(&self) -> f64 {
        self.seconds() / DurationUnit::Minutes.seconds_factor()
    }

    /// Hours.
    #[inline]
    pub fn hours(&self) -> f64 {
        self.seconds() / DurationUnit::Hours.seconds_factor()
    }

    /// Render as an interval with whole seconds (`"2:00:35"`).
    pub fn format_whole_seconds(&self) -> String {
        format_interval(self.seconds(), true)
    }

    /// Convert to a `chrono::Duration`, rounded to the nearest nanosecond.
    ///
    /// Returns `None` for non-finite values or values outside chrono's range.
    pub fn to_chrono(&self) -> Option<chrono::Duration> {
        let seconds = self.seconds();
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1e9).round();
        if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
            return None;
        }
        let base = chrono::Duration::try_seconds(whole as i64)?;
        base.checked_add(&chrono::Duration::nanoseconds(nanos as i64))
    }
}

impl Quantity for Duration {
    type Unit = DurationUnit;
    const KIND: QuantityKind = QuantityKind::Duration;

    fn in_unit(value: f64, unit: DurationUnit) -> Self {
        Duration::new(value, unit)
    }

    fn default_unit(system: UnitSystem) -> DurationUnit {
        system.duration_unit()
    }
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Duration::parse(s)
    }
}

/// Durations render the same in every unit system.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_interval(self.seconds(), false))
    }
}

// ── chrono interop ────────────────────────────────────────────────────────

/// Total seconds of a `chrono::Duration`, keeping sub-second precision.
fn chrono_seconds(delta: &chrono::Duration) -> f64 {
    const NANOS_PER_SECOND: f64 = 1e9;
    match delta.num_nanoseconds() {
        Some(ns) => ns as f64 / NANOS_PER_SECOND,
        // Fallback for durations that do not fit in i64 nanoseconds.
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

impl From<chrono::Duration> for Duration {
    #[inline]
    fn from(delta: chrono::Duration) -> Self {
        Self::from_seconds(chrono_seconds(&delta))
    }
}

impl From<Seconds> for Duration {
    #[inline]
    fn from(seconds: Seconds) -> Self {
        Self::from_quantity(seconds)
    }
}

impl From<Duration> for Seconds {
    #[inline]
    fn from(duration: Duration) -> Self {
        duration.seconds
    }
}

impl PartialEq<chrono::Duration> for Duration {
    fn eq(&self, other: &chrono::Duration) -> bool {
        self.seconds() == chrono_seconds(other)
    }
}

impl PartialOrd<chrono::Duration> for Duration {
    fn partial_cmp(&self, other: &chrono::Duration) -> Option<Ordering> {
        self.seconds().partial_cmp(&chrono_seconds(other))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════════

impl Add for Duration {
    type Output = Duration;
    #[inline]
    fn add(self, rhs: Duration) -> Duration {
        Duration::from_quantity(self.seconds + rhs.seconds)
    }
}

impl Sub for Duration {
    type Output = Duration;
    #[inline]
    fn sub(self, rhs: Duration) -> Duration {
        Duration::from_quantity(self.seconds - rhs.seconds)
    }
}

impl Neg for Duration {
    type Output = Duration;
    #[inline]
    fn neg(self) -> Duration {
        Duration::from_seconds(-self.seconds())
    }
}

impl Mul<f64> for Duration {
    type Output = Duration;
    #[inline]
    fn mul(self, rhs: f64) -> Duration {
        Duration::from_seconds(self.seconds() * rhs)
    }
}

impl Mul<Duration> for f64 {
    type Output = Duration;
    #[inline]
    fn mul(self, rhs: Duration) -> Duration {
        rhs * self
    }
}

/// Time × speed = distance covered.
impl Mul<Speed> for Duration {
    type Output = Distance;
    #[inline]
    fn mul(self, rhs: Speed) -> Distance {
        rhs * self
    }
}

impl Div<f64> for Duration {
    type Output = Duration;
    #[inline]
    fn div(self, rhs: f64) -> Duration {
        Duration::from_seconds(self.seconds() / rhs)
    }
}

/// Ratio of two durations.
impl Div for Duration {
    type Output = f64;
    #[inline]
    fn div(self, rhs: Duration) -> f64 {
        (self.seconds / rhs.seconds).simplify().value()
    }
}

/// Time ÷ distance = average pace.
impl Div<Distance> for Duration {
    type Output = Pace;
    #[inline]
    fn div(self, rhs: Distance) -> Pace {
        Pace::from_seconds_per_km(self.seconds() / rhs.km())
    }
}

/// Time ÷ pace = distance covered.
impl Div<Pace> for Duration {
    type Output = Distance;
    #[inline]
    fn div(self, rhs: Pace) -> Distance {
        Distance::from_km(self.seconds() / rhs.seconds_per_km())
    }
}

impl Div<Distance> for chrono::Duration {
    type Output = Pace;
    #[inline]
    fn div(self, rhs: Distance) -> Pace {
        Duration::from(self) / rhs
    }
}

impl Div<Pace> for chrono::Duration {
    type Output = Distance;
    #[inline]
    fn div(self, rhs: Pace) -> Distance {
        Duration::from(self) / rhs
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Duration> for Duration {
    fn sum<I: Iterator<Item = &'a Duration>>(iter: I) -> Duration {
        iter.copied().sum()
    }
}

#[cfg(feature = "serde")]
canonical_serde!(Duration, seconds, from_seconds);

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
