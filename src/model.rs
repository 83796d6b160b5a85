//! The engine's data model (§3): the typed, immutable representation of
//! compiled IANA zone/policy/rule tables that this crate consumes, plus
//! `ActiveTransition`, the only type that escapes the core.

use std::sync::Arc;

use crate::calendar::{Month, Year};

/// The reference frame a rule's `at` time, or an era's `until` time, is
/// expressed in. Rather than the source's loose `"w"`/`"s"`/`"u"` string
/// discriminators, this is an enum fixed up at table-build time (§9).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimeSuffix {
    Wall,
    Standard,
    Universal,
}

/// One recurring rule within a `ZonePolicy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRule {
    pub from_year: Year,
    /// Inclusive. `Year::MAX` represents an open-ended ("to infinity") rule.
    pub to_year: Year,
    pub in_month: Month,
    /// `0` means "the exact day of month given by `on_day_of_month`";
    /// `1..=7` is ISO Monday..Sunday, see [`crate::calendar::resolve_day_of_month`].
    pub on_day_of_week: u8,
    pub on_day_of_month: i16,
    pub at_seconds: i32,
    pub at_time_suffix: TimeSuffix,
    pub delta_seconds: i32,
    /// Abbreviation letter substituted into a `%s` format slot. The sentinel
    /// `"-"` signals "no letter" (substitutes to the empty string).
    pub letter: String,
}

impl ZoneRule {
    pub fn covers_year(&self, year: Year) -> bool {
        self.from_year <= year && year <= self.to_year
    }
}

/// A named, ordered collection of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePolicy {
    pub name: String,
    pub rules: Vec<ZoneRule>,
}

/// The `zone_policy` field's three-way discriminated union (§9, "Polymorphic
/// zone_policy field"): a named policy, a fixed DST delta with no rules, or
/// standard time only.
#[derive(Debug, Clone)]
pub enum PolicyRef {
    /// Named policy (`ZonePolicy`), source sentinel was a policy name.
    Policy(Arc<ZonePolicy>),
    /// Source sentinel `":"`: no named policy, use `rules_delta_seconds` as a
    /// single fixed DST offset.
    Fixed,
    /// Source sentinel `"-"`: standard time only, delta is always zero.
    None,
}

/// A contiguous segment of a zone's history with one standard offset and one
/// rule policy.
#[derive(Debug, Clone)]
pub struct ZoneEra {
    pub offset_seconds: i32,
    pub zone_policy: PolicyRef,
    /// The fixed DST delta in effect when `zone_policy` is `Fixed`. Ignored
    /// otherwise.
    pub rules_delta_seconds: i32,
    /// Abbreviation template: a literal, a `%s`-slot form, or a `STD/DST`
    /// slash form (resolved per §4.4 step 6).
    pub format: String,
    /// Exclusive upper bound of this era's validity. `until_year ==
    /// Year::MAX` signals "no upper bound" (final era, invariant 1)
    /// regardless of the month/day/seconds fields.
    pub until_year: Year,
    pub until_month: Month,
    pub until_day: u8,
    pub until_seconds: i32,
    pub until_time_suffix: TimeSuffix,
}

impl ZoneEra {
    pub fn is_open_ended(&self) -> bool {
        self.until_year == Year::MAX
    }
}

/// A zone's full history, or a pure alias pointing to one.
#[derive(Debug, Clone)]
pub struct ZoneInfo {
    pub name: String,
    pub eras: Vec<ZoneEra>,
    /// Set when this `ZoneInfo` is a pure alias ("link"). Eager link
    /// resolution at registry-build time (§9) guarantees this always points
    /// directly at the final, non-alias target; link chains are collapsed,
    /// never nested.
    pub link_target: Option<Arc<ZoneInfo>>,
}

impl ZoneInfo {
    pub fn is_link(&self) -> bool {
        self.link_target.is_some()
    }

    /// The `ZoneInfo` whose `eras` actually govern this zone: itself if
    /// canonical, or the link target if this is an alias.
    pub fn effective(&self) -> &ZoneInfo {
        self.link_target.as_deref().unwrap_or(self)
    }

    /// The display name of the zone this one ultimately resolves to.
    pub fn canonical_name(&self) -> &str {
        &self.effective().name
    }
}

/// A concrete instant at which the active offset, DST delta, or abbreviation
/// changes. The only type that escapes the core (§3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTransition {
    /// Epoch seconds, UT. `i64::MIN` is the "extends to -infinity" sentinel.
    pub start_instant: i64,
    /// Exclusive. `i64::MAX` is the "extends to +infinity" sentinel.
    pub until_instant: i64,
    pub utc_offset: i32,
    pub dst_offset: i32,
    pub abbreviation: String,
    /// `0` for the first occurrence of an ambiguous wall time, `1` for the
    /// second. Meaningful only for transitions returned from a fold/overlap
    /// resolution; otherwise always `0`.
    pub fold: u8,
}

impl ActiveTransition {
    pub fn total_offset(&self) -> i32 {
        self.utc_offset + self.dst_offset
    }
}

/// The three-way outcome of resolving a civil (local) time against a zone's
/// transitions (§4.5). Mirrors the shape of this crate's nearest Python
/// analogue distinction between unambiguous, skipped ("gap"), and repeated
/// ("fold") wall-clock times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ambiguity {
    Unambiguous(ActiveTransition),
    /// Spring-forward: no transition claims this local time. Holds
    /// `(before, after)` the gap.
    Gap(ActiveTransition, ActiveTransition),
    /// Fall-back: two transitions claim this local time. Holds
    /// `(earlier, later)`.
    Fold(ActiveTransition, ActiveTransition),
}
