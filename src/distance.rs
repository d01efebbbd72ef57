// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Distance, stored canonically in kilometres.
//!
//! ```rust
//! use run42195::{Distance, UnitSystem, MARATHON};
//!
//! let leg: Distance = "1760yd".parse().unwrap();
//! assert!((leg.mi() - 1.0).abs() < 1e-12);
//!
//! let _imperial = UnitSystem::Imperial.scope();
//! assert_eq!(MARATHON.to_string(), "26.22 mi");
//! ```

use crate::constants::{FEET_IN_KM, KM_IN_MILE, M_IN_KM, YARDS_IN_KM};
use crate::duration::Duration;
use crate::error::{Error, ParseFailure, Result};
use crate::pace::Pace;
use crate::quantity::Quantity;
use crate::speed::Speed;
use crate::unit_system::{get_unit_system, QuantityKind, UnitSystem};
use qtty::velocity::Velocity;
use qtty::{Kilometer, Kilometers, Second, Simplify};
use regex::Regex;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::LazyLock;

/// Units a [`Distance`] can be expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    Km,
    Mi,
    M,
    Yd,
    Ft,
}

impl DistanceUnit {
    /// Canonical unit name, also the text suffix accepted by the parser.
    pub const fn name(self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Mi => "mi",
            DistanceUnit::M => "m",
            DistanceUnit::Yd => "yd",
            DistanceUnit::Ft => "ft",
        }
    }

    /// Kilometres per one of this unit.
    #[inline]
    fn km_factor(self) -> f64 {
        match self {
            DistanceUnit::Km => 1.0,
            DistanceUnit::Mi => KM_IN_MILE,
            DistanceUnit::M => 1.0 / M_IN_KM,
            DistanceUnit::Yd => 1.0 / YARDS_IN_KM,
            DistanceUnit::Ft => 1.0 / FEET_IN_KM,
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "km" => Some(DistanceUnit::Km),
            "mi" => Some(DistanceUnit::Mi),
            "m" => Some(DistanceUnit::M),
            "yd" => Some(DistanceUnit::Yd),
            "ft" => Some(DistanceUnit::Ft),
            _ => None,
        }
    }
}

static DISTANCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?P<value>\d+(?:\.\d*)?|\.\d+)\s*(?P<unit>km|mi|m|yd|ft)?$").ok());

// ═══════════════════════════════════════════════════════════════════════════
// Distance
// ═══════════════════════════════════════════════════════════════════════════

/// A length covered on foot.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Distance {
    km: Kilometers,
}

impl Distance {
    /// The marathon distance, 42.195 km.
    pub const MARATHON: Distance = crate::constants::MARATHON;

    /// The half-marathon distance, 21.0975 km.
    pub const HALF_MARATHON: Distance = crate::constants::HALF_MARATHON;

    /// Zero distance.
    pub const ZERO: Distance = Distance::from_km(0.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a value in `unit`.
    #[inline]
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self::from_km(value * unit.km_factor())
    }

    /// Create from kilometres.
    #[inline]
    pub const fn from_km(km: f64) -> Self {
        Self {
            km: Kilometers::new(km),
        }
    }

    /// Create from a [`Kilometers`] quantity.
    #[inline]
    pub const fn from_kilometers(km: Kilometers) -> Self {
        Self { km }
    }

    /// Create from miles.
    #[inline]
    pub fn from_mi(mi: f64) -> Self {
        Self::new(mi, DistanceUnit::Mi)
    }

    /// Create from metres.
    #[inline]
    pub fn from_m(m: f64) -> Self {
        Self::new(m, DistanceUnit::M)
    }

    /// Create from yards.
    #[inline]
    pub fn from_yd(yd: f64) -> Self {
        Self::new(yd, DistanceUnit::Yd)
    }

    /// Create from feet.
    #[inline]
    pub fn from_ft(ft: f64) -> Self {
        Self::new(ft, DistanceUnit::Ft)
    }

    /// Parse `<number>[ ]<unit>`, where the unit is one of `km`, `mi`, `m`,
    /// `yd`, `ft` and defaults to `km`.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for anything else, including signed numbers.
    pub fn parse(text: &str) -> Result<Self> {
        let fail = || Error::parse(QuantityKind::Distance, text, ParseFailure::Malformed);
        let caps = DISTANCE.as_ref().and_then(|re| re.captures(text)).ok_or_else(fail)?;
        let value: f64 = caps["value"]
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(fail)?;
        let unit = match caps.name("unit") {
            Some(m) => DistanceUnit::from_suffix(m.as_str()).ok_or_else(fail)?,
            None => DistanceUnit::Km,
        };
        Ok(Self::new(value, unit))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The underlying [`Kilometers`] quantity.
    #[inline]
    pub const fn quantity(&self) -> Kilometers {
        self.km
    }

    /// Kilometres.
    #[inline]
    pub const fn km(&self) -> f64 {
        self.km.value()
    }

    /// Miles.
    #[inline]
    pub fn mi(&self) -> f64 {
        self.value_in(DistanceUnit::Mi)
    }

    /// Metres.
    #[inline]
    pub fn m(&self) -> f64 {
        self.km() * M_IN_KM
    }

    /// Yards.
    #[inline]
    pub fn yd(&self) -> f64 {
        self.km() * YARDS_IN_KM
    }

    /// Feet.
    #[inline]
    pub fn ft(&self) -> f64 {
        self.km() * FEET_IN_KM
    }

    /// Value expressed in `unit`.
    #[inline]
    pub fn value_in(&self, unit: DistanceUnit) -> f64 {
        self.km() / unit.km_factor()
    }

    /// Render with two decimals in the distance unit of `system`.
    pub fn format_in(&self, system: UnitSystem) -> String {
        let unit = system.distance_unit();
        format!("{:.2} {}", self.value_in(unit), unit.name())
    }
}

impl Quantity for Distance {
    type Unit = DistanceUnit;
    const KIND: QuantityKind = QuantityKind::Distance;

    fn in_unit(value: f64, unit: DistanceUnit) -> Self {
        Distance::new(value, unit)
    }

    fn default_unit(system: UnitSystem) -> DistanceUnit {
        system.distance_unit()
    }
}

impl FromStr for Distance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Distance::parse(s)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_in(get_unit_system()))
    }
}

impl From<Kilometers> for Distance {
    #[inline]
    fn from(km: Kilometers) -> Self {
        Self::from_kilometers(km)
    }
}

impl From<Distance> for Kilometers {
    #[inline]
    fn from(distance: Distance) -> Self {
        distance.km
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════════

impl Add for Distance {
    type Output = Distance;
    #[inline]
    fn add(self, rhs: Distance) -> Distance {
        Distance::from_kilometers(self.km + rhs.km)
    }
}

impl Sub for Distance {
    type Output = Distance;
    #[inline]
    fn sub(self, rhs: Distance) -> Distance {
        Distance::from_kilometers(self.km - rhs.km)
    }
}

impl Neg for Distance {
    type Output = Distance;
    #[inline]
    fn neg(self) -> Distance {
        Distance::from_km(-self.km())
    }
}

impl Mul<f64> for Distance {
    type Output = Distance;
    #[inline]
    fn mul(self, rhs: f64) -> Distance {
        Distance::from_km(self.km() * rhs)
    }
}

impl Mul<Distance> for f64 {
    type Output = Distance;
    #[inline]
    fn mul(self, rhs: Distance) -> Distance {
        rhs * self
    }
}

/// Distance × pace = time needed to cover it.
impl Mul<Pace> for Distance {
    type Output = Duration;
    #[inline]
    fn mul(self, rhs: Pace) -> Duration {
        Duration::from_seconds(self.km() * rhs.seconds_per_km())
    }
}

impl Div<f64> for Distance {
    type Output = Distance;
    #[inline]
    fn div(self, rhs: f64) -> Distance {
        Distance::from_km(self.km() / rhs)
    }
}

/// Ratio of two distances.
impl Div for Distance {
    type Output = f64;
    #[inline]
    fn div(self, rhs: Distance) -> f64 {
        (self.km / rhs.km).simplify().value()
    }
}

/// Distance ÷ time = average speed.
impl Div<Duration> for Distance {
    type Output = Speed;
    #[inline]
    fn div(self, rhs: Duration) -> Speed {
        let velocity: Velocity<Kilometer, Second> = self.km / rhs.quantity();
        Speed::from_km_s(velocity)
    }
}

/// Distance ÷ speed = time needed to cover it.
impl Div<Speed> for Distance {
    type Output = Duration;
    #[inline]
    fn div(self, rhs: Speed) -> Duration {
        Duration::from_seconds(self.km() / rhs.km_s().value())
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Distance {
        iter.fold(Distance::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Distance> for Distance {
    fn sum<I: Iterator<Item = &'a Distance>>(iter: I) -> Distance {
        iter.copied().sum()
    }
}

#[cfg(feature = "serde")]
canonical_serde!(Distance, km, from_km);

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
