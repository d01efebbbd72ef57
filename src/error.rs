// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every constructor and parser in the crate.

use crate::unit_system::QuantityKind;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a piece of text was rejected by one of the parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// The text does not match the grammar at all.
    Malformed,
    /// Seconds ≥ 60 while a minute (or hour) group is present.
    SecondsOutOfRange,
    /// Minutes ≥ 60 while an hour group is present.
    MinutesOutOfRange,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ParseFailure::Malformed => "malformed input",
            ParseFailure::SecondsOutOfRange => "seconds must be below 60",
            ParseFailure::MinutesOutOfRange => "minutes must be below 60",
        })
    }
}

/// Errors raised by quantity constructors, parsers and the unit-system context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Wrong number of unit arguments, conflicting arguments, or an unknown
    /// unit-system name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A magnitude was supplied that is not a number (NaN).
    #[error("{what} magnitude is not a number")]
    NotANumber { what: QuantityKind },

    /// Text could not be turned into the requested quantity.
    #[error("cannot parse {input:?} as {kind}: {reason}")]
    Parse {
        kind: QuantityKind,
        input: String,
        reason: ParseFailure,
    },
}

impl Error {
    pub(crate) fn parse(kind: QuantityKind, input: &str, reason: ParseFailure) -> Self {
        Error::Parse {
            kind,
            input: input.to_owned(),
            reason,
        }
    }

    /// The parse failure reason, if this is a parse error.
    pub fn parse_failure(&self) -> Option<ParseFailure> {
        match self {
            Error::Parse { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message_names_kind_and_input() {
        let err = Error::parse(QuantityKind::Pace, "4:75", ParseFailure::SecondsOutOfRange);
        assert_eq!(
            err.to_string(),
            "cannot parse \"4:75\" as pace: seconds must be below 60"
        );
        assert_eq!(err.parse_failure(), Some(ParseFailure::SecondsOutOfRange));
    }

    #[test]
    fn non_parse_errors_have_no_failure_reason() {
        let err = Error::NotANumber {
            what: QuantityKind::Speed,
        };
        assert_eq!(err.to_string(), "speed magnitude is not a number");
        assert_eq!(err.parse_failure(), None);
    }
}
