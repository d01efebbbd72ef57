// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Shared behaviour of the four quantity types and the generic builders.
//!
//! Every quantity can be produced from three kinds of input, modelled by
//! [`QuantityInput`]:
//!
//! | Input | Route |
//! |-------|-------|
//! | text | the quantity's [`FromStr`] parser |
//! | bare number | [`Quantity::try_in_unit`] with the active system's default unit (or an explicit one) |
//! | existing value | returned unchanged |
//!
//! ```rust
//! use run42195::{distance, distance_in, DistanceUnit, UnitSystem};
//!
//! let _metric = UnitSystem::Metric.scope();
//! assert_eq!(distance(5.0).unwrap().km(), 5.0);
//! assert_eq!(distance("750 m").unwrap().m(), 750.0);
//! assert_eq!(distance_in(3.0, DistanceUnit::Km).unwrap().km(), 3.0);
//! assert!(distance_in("3 km", DistanceUnit::Km).is_err());
//! ```

use crate::distance::{Distance, DistanceUnit};
use crate::duration::{Duration, DurationUnit};
use crate::error::{Error, Result};
use crate::pace::{Pace, PaceUnit};
use crate::speed::{Speed, SpeedUnit};
use crate::unit_system::{get_unit_system, QuantityKind, UnitSystem};
use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════════════════════
// Quantity trait
// ═══════════════════════════════════════════════════════════════════════════

/// A running quantity backed by a single canonical `f64`.
///
/// Implementors provide the unit-qualified constructor and the per-system
/// default unit; the checked constructors are derived from those.
pub trait Quantity: Copy + FromStr<Err = Error> {
    /// Units this quantity can be constructed from.
    type Unit: Copy + fmt::Debug;

    /// Which family this quantity belongs to.
    const KIND: QuantityKind;

    /// Build from a value expressed in `unit`, without validation.
    fn in_unit(value: f64, unit: Self::Unit) -> Self;

    /// Unit a bare number is read in under `system`.
    fn default_unit(system: UnitSystem) -> Self::Unit;

    /// Build from a value expressed in `unit`.
    ///
    /// # Errors
    ///
    /// [`Error::NotANumber`] if `value` is NaN.
    fn try_in_unit(value: f64, unit: Self::Unit) -> Result<Self> {
        if value.is_nan() {
            return Err(Error::NotANumber { what: Self::KIND });
        }
        Ok(Self::in_unit(value, unit))
    }

    /// Build from exactly one unit-tagged value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] unless `parts` holds exactly one entry;
    /// [`Error::NotANumber`] if that entry's value is NaN.
    fn try_from_units(parts: &[(Self::Unit, f64)]) -> Result<Self> {
        match parts {
            [(unit, value)] => Self::try_in_unit(*value, *unit),
            [] => Err(Error::InvalidArgument(format!(
                "a {} needs exactly one unit argument, none given",
                Self::KIND
            ))),
            many => Err(Error::InvalidArgument(format!(
                "a {} needs exactly one unit argument, {} given",
                Self::KIND,
                many.len()
            ))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// QuantityInput
// ═══════════════════════════════════════════════════════════════════════════

/// Anything a builder accepts: text, a bare number or an existing value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityInput<'a, Q> {
    Text(&'a str),
    Number(f64),
    Existing(Q),
}

impl<'a, Q> From<&'a str> for QuantityInput<'a, Q> {
    fn from(text: &'a str) -> Self {
        QuantityInput::Text(text)
    }
}

impl<'a, Q> From<&'a String> for QuantityInput<'a, Q> {
    fn from(text: &'a String) -> Self {
        QuantityInput::Text(text.as_str())
    }
}

impl<Q> From<f64> for QuantityInput<'_, Q> {
    fn from(value: f64) -> Self {
        QuantityInput::Number(value)
    }
}

impl<Q> From<i32> for QuantityInput<'_, Q> {
    fn from(value: i32) -> Self {
        QuantityInput::Number(f64::from(value))
    }
}

macro_rules! existing_input {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for QuantityInput<'_, $ty> {
                fn from(value: $ty) -> Self {
                    QuantityInput::Existing(value)
                }
            }
        )*
    };
}

existing_input!(Distance, Duration, Pace, Speed);

impl From<chrono::Duration> for QuantityInput<'_, Duration> {
    fn from(value: chrono::Duration) -> Self {
        QuantityInput::Existing(Duration::from(value))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Builders
// ═══════════════════════════════════════════════════════════════════════════

/// Route `input` to the right constructor for `Q`.
///
/// A bare number is read in `unit` when given, otherwise in the active
/// unit system's default unit for `Q`.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] when `unit` is combined with text or an
///   existing value;
/// - the parser's [`Error::Parse`] for text;
/// - [`Error::NotANumber`] for a NaN number.
pub fn build<'a, Q: Quantity>(
    input: impl Into<QuantityInput<'a, Q>>,
    unit: Option<Q::Unit>,
) -> Result<Q> {
    match (input.into(), unit) {
        (QuantityInput::Text(text), None) => text.parse(),
        (QuantityInput::Number(value), unit) => {
            let unit = unit.unwrap_or_else(|| Q::default_unit(get_unit_system()));
            Q::try_in_unit(value, unit)
        }
        (QuantityInput::Existing(value), None) => Ok(value),
        (QuantityInput::Text(text), Some(unit)) => Err(Error::InvalidArgument(format!(
            "unit {unit:?} conflicts with {} text {text:?}",
            Q::KIND
        ))),
        (QuantityInput::Existing(_), Some(unit)) => Err(Error::InvalidArgument(format!(
            "unit {unit:?} conflicts with an existing {}",
            Q::KIND
        ))),
    }
}

/// Build a [`Distance`] from text, a number (default unit) or a distance.
///
/// # Errors
///
/// See [`build`].
pub fn distance<'a>(input: impl Into<QuantityInput<'a, Distance>>) -> Result<Distance> {
    build(input, None)
}

/// Build a [`Distance`] from a number in an explicit unit.
///
/// # Errors
///
/// See [`build`].
pub fn distance_in<'a>(
    input: impl Into<QuantityInput<'a, Distance>>,
    unit: DistanceUnit,
) -> Result<Distance> {
    build(input, Some(unit))
}

/// Build a [`Duration`] from text, a number of seconds, a `chrono::Duration`
/// or a duration.
///
/// # Errors
///
/// See [`build`].
pub fn duration<'a>(input: impl Into<QuantityInput<'a, Duration>>) -> Result<Duration> {
    build(input, None)
}

/// Build a [`Duration`] from a number in an explicit unit.
///
/// # Errors
///
/// See [`build`].
pub fn duration_in<'a>(
    input: impl Into<QuantityInput<'a, Duration>>,
    unit: DurationUnit,
) -> Result<Duration> {
    build(input, Some(unit))
}

/// Build a [`Pace`] from text, a number (default unit) or a pace.
///
/// # Errors
///
/// See [`build`].
pub fn pace<'a>(input: impl Into<QuantityInput<'a, Pace>>) -> Result<Pace> {
    build(input, None)
}

/// Build a [`Pace`] from a number in an explicit unit.
///
/// # Errors
///
/// See [`build`].
pub fn pace_in<'a>(input: impl Into<QuantityInput<'a, Pace>>, unit: PaceUnit) -> Result<Pace> {
    build(input, Some(unit))
}

/// Build a [`Speed`] from text, a number (default unit) or a speed.
///
/// # Errors
///
/// See [`build`].
pub fn speed<'a>(input: impl Into<QuantityInput<'a, Speed>>) -> Result<Speed> {
    build(input, None)
}

/// Build a [`Speed`] from a number in an explicit unit.
///
/// # Errors
///
/// See [`build`].
pub fn speed_in<'a>(input: impl Into<QuantityInput<'a, Speed>>, unit: SpeedUnit) -> Result<Speed> {
    build(input, Some(unit))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_numbers_follow_the_active_system() {
        {
            let _metric = UnitSystem::Metric.scope();
            assert_eq!(distance(1.0).unwrap(), Distance::from_km(1.0));
            assert_eq!(pace(240.0).unwrap().seconds_per_km(), 240.0);
            assert_eq!(speed(10).unwrap().km_h(), 10.0);
        }
        let _imperial = UnitSystem::Imperial.scope();
        assert_eq!(distance(1.0).unwrap(), Distance::from_mi(1.0));
        assert!((pace(480.0).unwrap().seconds_per_mile() - 480.0).abs() < 1e-9);
        assert!((speed(10).unwrap().mph() - 10.0).abs() < 1e-9);
        assert_eq!(duration(90).unwrap().seconds(), 90.0);
    }

    #[test]
    fn explicit_unit_overrides_default() {
        let _imperial = UnitSystem::Imperial.scope();
        assert_eq!(distance_in(2.0, DistanceUnit::Km).unwrap().km(), 2.0);
        assert_eq!(duration_in(2.0, DurationUnit::Minutes).unwrap().seconds(), 120.0);
        assert_eq!(pace_in(300.0, PaceUnit::PerKm).unwrap().seconds_per_km(), 300.0);
        assert!((speed_in(5.0, SpeedUnit::MS).unwrap().km_h() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn text_is_routed_to_the_parser() {
        let _metric = UnitSystem::Metric.scope();
        assert_eq!(distance("2 km").unwrap().km(), 2.0);
        assert_eq!(duration("1:00:01").unwrap().seconds(), 3_601.0);
        assert_eq!(pace("4:00").unwrap().seconds_per_km(), 240.0);
        assert_eq!(speed("8 km/h").unwrap().km_h(), 8.0);

        let owned = String::from("750 m");
        assert_eq!(distance(&owned).unwrap().m(), 750.0);
    }

    #[test]
    fn text_with_unit_is_rejected() {
        let err = distance_in("1 km", DistanceUnit::Mi).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(matches!(
            pace_in("4:00", PaceUnit::PerKm),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn existing_values_pass_through() {
        let marathon = crate::MARATHON;
        assert_eq!(distance(marathon).unwrap(), marathon);
        let p = Pace::from_seconds_per_km(250.0);
        assert_eq!(pace(p).unwrap(), p);
        assert!(matches!(
            speed_in(Speed::from_km_h(12.0), SpeedUnit::Mph),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn chrono_durations_are_accepted() {
        let d = duration(chrono::Duration::minutes(3)).unwrap();
        assert_eq!(d.seconds(), 180.0);
    }

    #[test]
    fn nan_numbers_are_rejected() {
        assert_eq!(
            speed(f64::NAN).unwrap_err(),
            Error::NotANumber {
                what: QuantityKind::Speed
            }
        );
    }

    #[test]
    fn exactly_one_unit_argument() {
        assert!(matches!(
            Distance::try_from_units(&[]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Distance::try_from_units(&[(DistanceUnit::Km, 1.0), (DistanceUnit::M, 1.0)]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Speed::try_from_units(&[(SpeedUnit::KmH, 1.0), (SpeedUnit::Mph, 1.0), (SpeedUnit::MS, 1.0)]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Pace::try_from_units(&[(PaceUnit::PerMile, f64::NAN)]),
            Err(Error::NotANumber { .. })
        ));
        let d = Distance::try_from_units(&[(DistanceUnit::Yd, 1_760.0)]).unwrap();
        assert!((d.mi() - 1.0).abs() < 1e-12);
    }
}
