// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Speed, stored canonically in km/h.
//!
//! Unlike [`Distance`] and [`Pace`], a speed always renders in km/h: the
//! active unit system only picks the unit a bare number is read in.

use crate::constants::{KM_IN_MILE, M_IN_KM, SECONDS_IN_HOUR};
use crate::distance::Distance;
use crate::duration::Duration;
use crate::error::{Error, ParseFailure, Result};
use crate::pace::Pace;
use crate::quantity::Quantity;
use crate::unit_system::{get_unit_system, QuantityKind, UnitSystem};
use qtty::velocity::Velocity;
use qtty::{Kilometer, Kilometers, Second};
use regex::Regex;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::LazyLock;

/// Units a [`Speed`] can be expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpeedUnit {
    /// Kilometres per hour.
    KmH,
    /// Miles per hour.
    Mph,
    /// Metres per second.
    MS,
}

impl SpeedUnit {
    /// Canonical unit name.
    pub const fn name(self) -> &'static str {
        match self {
            SpeedUnit::KmH => "km_h",
            SpeedUnit::Mph => "mph",
            SpeedUnit::MS => "m_s",
        }
    }

    /// km/h per one of this unit.
    #[inline]
    fn km_h_factor(self) -> f64 {
        match self {
            SpeedUnit::KmH => 1.0,
            SpeedUnit::Mph => KM_IN_MILE,
            SpeedUnit::MS => SECONDS_IN_HOUR / M_IN_KM,
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "kmh" | "km/h" => Some(SpeedUnit::KmH),
            "mph" | "mi/h" => Some(SpeedUnit::Mph),
            "m/s" => Some(SpeedUnit::MS),
            _ => None,
        }
    }
}

static SPEED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?P<value>\d+(?:\.\d*)?|\.\d+)\s*(?P<unit>kmh|km/h|mph|mi/h|m/s)?$").ok());

// ═══════════════════════════════════════════════════════════════════════════
// Speed
// ═══════════════════════════════════════════════════════════════════════════

/// Distance per unit of time. May be infinite.
///
/// Held as plain km/h; [`Speed::km_s`] gives the qtty velocity.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Speed {
    km_h: f64,
}

impl Speed {
    /// Standing still; the identity for summation.
    pub const ZERO: Speed = Speed::from_km_h(0.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a value in `unit`.
    #[inline]
    pub fn new(value: f64, unit: SpeedUnit) -> Self {
        Self::from_km_h(value * unit.km_h_factor())
    }

    /// Create from km/h.
    #[inline]
    pub const fn from_km_h(km_h: f64) -> Self {
        Self { km_h }
    }

    /// Create from miles per hour.
    #[inline]
    pub fn from_mph(mph: f64) -> Self {
        Self::new(mph, SpeedUnit::Mph)
    }

    /// Create from metres per second.
    #[inline]
    pub fn from_m_s(m_s: f64) -> Self {
        Self::new(m_s, SpeedUnit::MS)
    }

    /// Create from a kilometres-per-second velocity.
    #[inline]
    pub fn from_km_s(velocity: Velocity<Kilometer, Second>) -> Self {
        Self::from_km_h(velocity.value() * SECONDS_IN_HOUR)
    }

    /// Parse `<number>[ ]<unit>`, where the unit is one of `kmh`, `km/h`,
    /// `mph`, `mi/h`, `m/s` and defaults to km/h.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for anything else.
    pub fn parse(text: &str) -> Result<Self> {
        let fail = || Error::parse(QuantityKind::Speed, text, ParseFailure::Malformed);
        let caps = SPEED.as_ref().and_then(|re| re.captures(text)).ok_or_else(fail)?;
        let value: f64 = caps["value"]
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(fail)?;
        let unit = match caps.name("unit") {
            Some(m) => SpeedUnit::from_suffix(m.as_str()).ok_or_else(fail)?,
            None => SpeedUnit::KmH,
        };
        Ok(Self::new(value, unit))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Kilometres per hour.
    #[inline]
    pub const fn km_h(&self) -> f64 {
        self.km_h
    }

    /// Miles per hour.
    #[inline]
    pub fn mph(&self) -> f64 {
        self.value_in(SpeedUnit::Mph)
    }

    /// Metres per second.
    #[inline]
    pub fn m_s(&self) -> f64 {
        self.value_in(SpeedUnit::MS)
    }

    /// Value expressed in `unit`.
    #[inline]
    pub fn value_in(&self, unit: SpeedUnit) -> f64 {
        self.km_h / unit.km_h_factor()
    }

    /// The same speed as a kilometres-per-second velocity.
    #[inline]
    pub fn km_s(&self) -> Velocity<Kilometer, Second> {
        Velocity::new(self.km_h / SECONDS_IN_HOUR)
    }

    /// Equivalent pace: `3600 / km_h` seconds per kilometre.
    #[inline]
    pub fn to_pace(&self) -> Pace {
        Pace::from_seconds_per_km(SECONDS_IN_HOUR / self.km_h)
    }

    /// Render with two decimals in km/h.
    ///
    /// `system` is accepted for symmetry with the other quantities; speed
    /// renders the same in both systems.
    pub fn format_in(&self, _system: UnitSystem) -> String {
        format!("{:.2} km/h", self.km_h)
    }
}

impl Quantity for Speed {
    type Unit = SpeedUnit;
    const KIND: QuantityKind = QuantityKind::Speed;

    fn in_unit(value: f64, unit: SpeedUnit) -> Self {
        Speed::new(value, unit)
    }

    fn default_unit(system: UnitSystem) -> SpeedUnit {
        system.speed_unit()
    }
}

impl FromStr for Speed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Speed::parse(s)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_in(get_unit_system()))
    }
}

impl From<Pace> for Speed {
    #[inline]
    fn from(pace: Pace) -> Self {
        pace.to_speed()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════════

impl Add for Speed {
    type Output = Speed;
    #[inline]
    fn add(self, rhs: Speed) -> Speed {
        Speed::from_km_h(self.km_h + rhs.km_h)
    }
}

impl Sub for Speed {
    type Output = Speed;
    #[inline]
    fn sub(self, rhs: Speed) -> Speed {
        Speed::from_km_h(self.km_h - rhs.km_h)
    }
}

impl Neg for Speed {
    type Output = Speed;
    #[inline]
    fn neg(self) -> Speed {
        Speed::from_km_h(-self.km_h)
    }
}

impl Mul<f64> for Speed {
    type Output = Speed;
    #[inline]
    fn mul(self, rhs: f64) -> Speed {
        Speed::from_km_h(self.km_h * rhs)
    }
}

impl Mul<Speed> for f64 {
    type Output = Speed;
    #[inline]
    fn mul(self, rhs: Speed) -> Speed {
        rhs * self
    }
}

/// Speed × time = distance covered.
impl Mul<Duration> for Speed {
    type Output = Distance;
    #[inline]
    fn mul(self, rhs: Duration) -> Distance {
        Distance::from_kilometers(Kilometers::new(self.km_s().value() * rhs.seconds()))
    }
}

impl Div<f64> for Speed {
    type Output = Speed;
    #[inline]
    fn div(self, rhs: f64) -> Speed {
        Speed::from_km_h(self.km_h / rhs)
    }
}

/// Ratio of two speeds.
impl Div for Speed {
    type Output = f64;
    #[inline]
    fn div(self, rhs: Speed) -> f64 {
        self.km_h / rhs.km_h
    }
}

impl Sum for Speed {
    fn sum<I: Iterator<Item = Speed>>(iter: I) -> Speed {
        iter.fold(Speed::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Speed> for Speed {
    fn sum<I: Iterator<Item = &'a Speed>>(iter: I) -> Speed {
        iter.copied().sum()
    }
}

#[cfg(feature = "serde")]
canonical_serde!(Speed, km_h, from_km_h);

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
