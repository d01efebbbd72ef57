// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Running quantities
//!
//! This crate provides typed values for endurance-running calculations and
//! renders them according to a metric or imperial unit system.
//!
//! # Core types
//!
//! | Type | Canonical value | Other units |
//! |------|-----------------|-------------|
//! | [`Distance`] | kilometres | mi, m, yd, ft |
//! | [`Duration`] | seconds | minutes, hours, `chrono::Duration` |
//! | [`Pace`] | seconds per km | seconds per mile |
//! | [`Speed`] | km/h | mph, m/s |
//!
//! Each type is built from a number in a unit, parsed from text, or produced
//! by arithmetic between quantities:
//!
//! | Expression | Result |
//! |------------|--------|
//! | `Distance * Pace` | [`Duration`] |
//! | `Duration / Distance` | [`Pace`] |
//! | `Duration / Pace` | [`Distance`] |
//! | `Distance / Duration` | [`Speed`] |
//! | `Distance / Speed` | [`Duration`] |
//! | `Speed * Duration` | [`Distance`] |
//! | `Q / Q` (same type) | `f64` ratio |
//!
//! # Unit systems
//!
//! [`get_unit_system`] returns the active [`UnitSystem`]: a thread-local
//! override opened with [`set_unit_system`] or [`UnitSystem::scope`], else
//! the `PY42195_UNIT_SYSTEM` environment variable, else metric.
//!
//! ```rust
//! use run42195::{duration, pace, UnitSystem, MARATHON};
//!
//! let _metric = UnitSystem::Metric.scope();
//!
//! let record = duration("2:00:35").unwrap() / MARATHON;
//! assert_eq!(record.to_string(), "2:51.5/km");
//!
//! let finish = MARATHON * pace("4:00").unwrap();
//! assert_eq!(finish.to_string(), "2:48:46.8");
//! ```

/// Serialise a quantity as its canonical `f64`.
#[cfg(feature = "serde")]
macro_rules! canonical_serde {
    ($ty:ty, $getter:ident, $ctor:ident) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_f64(self.$getter())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let v = <f64 as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::$ctor(v))
            }
        }
    };
}

pub mod constants;
mod distance;
mod duration;
mod error;
mod interval;
mod pace;
mod quantity;
mod speed;
mod unit_system;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use constants::{HALF_MARATHON, MARATHON};
pub use distance::{Distance, DistanceUnit};
pub use duration::{Duration, DurationUnit};
pub use error::{Error, ParseFailure, Result};
pub use interval::{format_interval, parse_interval};
pub use pace::{Pace, PaceUnit};
pub use quantity::{
    build, distance, distance_in, duration, duration_in, pace, pace_in, speed, speed_in, Quantity,
    QuantityInput,
};
pub use speed::{Speed, SpeedUnit};
pub use unit_system::{
    get_default_unit, get_unit_system, set_unit_system, QuantityKind, UnitSystem,
    UnitSystemGuard, IMPERIAL, METRIC, UNIT_SYSTEM_ENV,
};
