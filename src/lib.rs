//! A time-zone transition engine resolving civil-time / instant conversions
//! against a compiled IANA time-zone database.
//!
//! The public surface is [`Registry`] and [`ZoneHandle`]: build a registry
//! from a zone/policy/rule table, look up a zone by name, and ask it for the
//! offset in effect at an epoch instant ([`ZoneHandle::info_for_epoch`]) or
//! the offset(s) that claim a civil time ([`ZoneHandle::info_for_local`]).

mod cache;
mod calendar;
mod era;
mod error;
mod expand;
mod model;
mod query;
mod registry;
#[cfg(test)]
mod scenarios;
mod transitions;

pub use error::{Error, Result};
pub use model::{
    ActiveTransition, Ambiguity, PolicyRef, TimeSuffix, ZoneEra, ZoneInfo, ZonePolicy, ZoneRule,
};
pub use registry::{Registry, ZoneHandle, ZoneSource};

pub use calendar::{Month, Weekday, Year};
