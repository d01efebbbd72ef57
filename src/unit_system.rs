// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Metric / imperial unit-system context.
//!
//! The active [`UnitSystem`] drives two things: how quantities render
//! through `Display`, and which unit a bare number is interpreted in by the
//! builders ([`distance`](crate::distance()), [`pace`](crate::pace()), …).
//!
//! Resolution order for [`get_unit_system`]:
//!
//! 1. the innermost scoped override on the **current thread**
//!    (see [`set_unit_system`] / [`UnitSystem::scope`]);
//! 2. the process default read once from `PY42195_UNIT_SYSTEM`;
//! 3. [`UnitSystem::Metric`].
//!
//! Overrides live in thread-local storage, so scopes opened on one thread
//! are never observed by another.
//!
//! ```rust
//! use run42195::{get_unit_system, UnitSystem};
//!
//! let _outer = UnitSystem::Metric.scope();
//! {
//!     let _inner = UnitSystem::Imperial.scope();
//!     assert_eq!(get_unit_system(), UnitSystem::Imperial);
//! }
//! assert_eq!(get_unit_system(), UnitSystem::Metric);
//! ```

use crate::distance::DistanceUnit;
use crate::duration::DurationUnit;
use crate::error::{Error, Result};
use crate::pace::PaceUnit;
use crate::speed::SpeedUnit;
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Name of the environment variable holding the process default.
pub const UNIT_SYSTEM_ENV: &str = "PY42195_UNIT_SYSTEM";

/// Token naming the metric system.
pub const METRIC: &str = "metric";

/// Token naming the imperial system.
pub const IMPERIAL: &str = "imperial";

// ═══════════════════════════════════════════════════════════════════════════
// UnitSystem
// ═══════════════════════════════════════════════════════════════════════════

/// The two supported display / default-unit regimes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// The token for this system (`"metric"` or `"imperial"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => METRIC,
            UnitSystem::Imperial => IMPERIAL,
        }
    }

    /// Resolve the process default from a raw environment value.
    ///
    /// A missing variable means metric. An unrecognised value is logged and
    /// also falls back to metric.
    pub fn from_env_value(raw: Option<&str>) -> Self {
        match raw {
            None => UnitSystem::Metric,
            Some(value) => value.trim().to_ascii_lowercase().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    variable = UNIT_SYSTEM_ENV,
                    value,
                    "unknown unit system, falling back to metric"
                );
                UnitSystem::Metric
            }),
        }
    }

    /// Make this system the active one on the current thread until the
    /// returned guard is dropped.
    #[must_use = "the override is reverted as soon as the guard is dropped"]
    pub fn scope(self) -> UnitSystemGuard {
        UnitSystemGuard::enter(self)
    }

    // ── default units ─────────────────────────────────────────────────

    /// Unit a bare number is read in when building a [`Distance`](crate::Distance).
    pub const fn distance_unit(self) -> DistanceUnit {
        match self {
            UnitSystem::Metric => DistanceUnit::Km,
            UnitSystem::Imperial => DistanceUnit::Mi,
        }
    }

    /// Unit a bare number is read in when building a [`Duration`](crate::Duration).
    pub const fn duration_unit(self) -> DurationUnit {
        DurationUnit::Seconds
    }

    /// Unit a bare number is read in when building a [`Pace`](crate::Pace).
    pub const fn pace_unit(self) -> PaceUnit {
        match self {
            UnitSystem::Metric => PaceUnit::PerKm,
            UnitSystem::Imperial => PaceUnit::PerMile,
        }
    }

    /// Unit a bare number is read in when building a [`Speed`](crate::Speed).
    pub const fn speed_unit(self) -> SpeedUnit {
        match self {
            UnitSystem::Metric => SpeedUnit::KmH,
            UnitSystem::Imperial => SpeedUnit::Mph,
        }
    }

    /// Canonical name of the default unit for `kind` in this system.
    pub const fn default_unit(self, kind: QuantityKind) -> &'static str {
        match kind {
            QuantityKind::Distance => self.distance_unit().name(),
            QuantityKind::Duration => self.duration_unit().name(),
            QuantityKind::Pace => self.pace_unit().name(),
            QuantityKind::Speed => self.speed_unit().name(),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            METRIC => Ok(UnitSystem::Metric),
            IMPERIAL => Ok(UnitSystem::Imperial),
            other => Err(Error::InvalidArgument(format!(
                "invalid unit system: {other:?} (expected {METRIC:?} or {IMPERIAL:?})"
            ))),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for UnitSystem {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for UnitSystem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = <&str>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// QuantityKind
// ═══════════════════════════════════════════════════════════════════════════

/// The four quantity families handled by the crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    Distance,
    Duration,
    Pace,
    Speed,
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuantityKind::Distance => "distance",
            QuantityKind::Duration => "duration",
            QuantityKind::Pace => "pace",
            QuantityKind::Speed => "speed",
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Context
// ═══════════════════════════════════════════════════════════════════════════

static PROCESS_DEFAULT: OnceLock<UnitSystem> = OnceLock::new();

thread_local! {
    static OVERRIDE: Cell<Option<UnitSystem>> = const { Cell::new(None) };
}

fn process_default() -> UnitSystem {
    *PROCESS_DEFAULT.get_or_init(|| {
        let raw = std::env::var(UNIT_SYSTEM_ENV).ok();
        let system = UnitSystem::from_env_value(raw.as_deref());
        tracing::debug!(%system, "resolved default unit system");
        system
    })
}

/// The unit system active on the current thread.
pub fn get_unit_system() -> UnitSystem {
    OVERRIDE.with(Cell::get).unwrap_or_else(process_default)
}

/// Override the unit system for the current thread by name.
///
/// The override lasts until the returned guard is dropped, at which point
/// the previous value is restored.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `system` is neither `"metric"` nor
/// `"imperial"`. No override is installed in that case.
pub fn set_unit_system(system: &str) -> Result<UnitSystemGuard> {
    let system: UnitSystem = system.parse()?;
    Ok(system.scope())
}

/// Canonical default unit name for `kind` under the active unit system.
pub fn get_default_unit(kind: QuantityKind) -> &'static str {
    get_unit_system().default_unit(kind)
}

/// RAII guard for a scoped unit-system override.
///
/// Dropping the guard restores exactly the value that was active when it
/// was created, including during unwinding. Guards are expected to drop in
/// reverse order of creation, which scoped `let` bindings guarantee; if an
/// outer guard is dropped first, the inner guard later reinstates the
/// outer override it captured. Guards are tied to the thread
/// that created them and cannot be sent elsewhere.
#[derive(Debug)]
pub struct UnitSystemGuard {
    active: UnitSystem,
    previous: Option<UnitSystem>,
    _not_send: PhantomData<*const ()>,
}

impl UnitSystemGuard {
    fn enter(system: UnitSystem) -> Self {
        let previous = OVERRIDE.with(|cell| cell.replace(Some(system)));
        tracing::trace!(%system, ?previous, "entered unit system scope");
        Self {
            active: system,
            previous,
            _not_send: PhantomData,
        }
    }

    /// The system this guard installed.
    pub fn system(&self) -> UnitSystem {
        self.active
    }
}

impl Drop for UnitSystemGuard {
    fn drop(&mut self) {
        OVERRIDE.with(|cell| cell.set(self.previous));
        tracing::trace!(system = %self.active, restored = ?self.previous, "left unit system scope");
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
