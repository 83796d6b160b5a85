//! Error types returned across the engine's external interfaces.
//!
//! Mirrors the plain-enum-plus-manual-`Display` style used elsewhere in this
//! crate for errors that aren't raised as host exceptions (see
//! `tz::tzif::ErrorCause` for the precedent): no derive macro, just a flat
//! enum and a hand-written formatter.

use std::fmt;

/// All ways a query against the engine can fail.
///
/// None of these are thrown past the boundary; every public operation
/// returns a `Result<_, Error>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The zone name (canonical or alias) isn't present in the registry.
    NotFound(String),
    /// The instant or year requested falls outside the zone's tabulated
    /// horizon (`[Year::MIN, Year::MAX]`).
    OutOfRange,
    /// The civil date/time components don't form a valid calendar date
    /// (month 0, Feb 30, hour 24, ...).
    InvalidCivilTime,
    /// A rule's day-selector yields no valid date within its month. This
    /// indicates corrupt or malformed zone data, not a caller error.
    InvalidRuleDay,
    /// Two rules produced colliding UT instants with incompatible offsets.
    /// Also indicates corrupt zone data.
    InconsistentRuleSet,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(name) => write!(f, "no time zone found with name '{name}'"),
            Error::OutOfRange => write!(f, "instant or year is outside the supported range"),
            Error::InvalidCivilTime => write!(f, "civil date/time components are not valid"),
            Error::InvalidRuleDay => {
                write!(f, "rule day-selector yields no valid date in its month")
            }
            Error::InconsistentRuleSet => {
                write!(f, "two rules produce colliding instants with incompatible offsets")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
