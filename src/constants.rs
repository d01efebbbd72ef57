// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed conversion factors and standard race distances.
//!
//! Every factor answers "how many of unit X fit in one kilometre", so a
//! distance in X is `km * X_IN_KM` and a value in X converts back with
//! `x / X_IN_KM`.

use crate::distance::Distance;

/// Length of the international mile in kilometres.
pub const KM_IN_MILE: f64 = 1.609_344;

/// Miles in one kilometre.
pub const MILES_IN_KM: f64 = 1.0 / KM_IN_MILE;

/// Metres in one kilometre.
pub const M_IN_KM: f64 = 1_000.0;

/// Yards in one kilometre (1760 yd per mile).
pub const YARDS_IN_KM: f64 = MILES_IN_KM * 1_760.0;

/// Feet in one kilometre (3 ft per yard).
pub const FEET_IN_KM: f64 = YARDS_IN_KM * 3.0;

/// Seconds in one hour, used for pace ↔ speed conversion.
pub const SECONDS_IN_HOUR: f64 = 3_600.0;

/// Official marathon length in kilometres.
pub const MARATHON_IN_KM: f64 = 42.195;

/// Official half-marathon length in kilometres.
pub const HALF_MARATHON_IN_KM: f64 = 21.097_5;

/// The marathon distance.
pub const MARATHON: Distance = Distance::from_km(MARATHON_IN_KM);

/// The half-marathon distance.
pub const HALF_MARATHON: Distance = Distance::from_km(HALF_MARATHON_IN_KM);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imperial_factors_are_consistent() {
        assert!((MILES_IN_KM * KM_IN_MILE - 1.0).abs() < 1e-15);
        assert!((YARDS_IN_KM - 1_093.613_298).abs() < 1e-6);
        assert!((FEET_IN_KM - 3_280.839_895).abs() < 1e-6);
    }

    #[test]
    fn race_distances() {
        assert_eq!(MARATHON.km(), 42.195);
        assert!((HALF_MARATHON.mi() - 13.11).abs() < 0.01);
        assert_eq!(HALF_MARATHON * 2.0, MARATHON);
    }
}
