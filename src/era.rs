//! Era selector (§4.3): picks the era records whose validity window overlaps
//! a target year and its immediate neighbors.

use crate::calendar::{days_from_epoch, Year};
use crate::error::Result;
use crate::model::{TimeSuffix, ZoneEra, ZoneInfo};

/// An era together with its resolved, half-open UT validity window.
#[derive(Debug, Clone)]
pub struct SelectedEra<'a> {
    pub era: &'a ZoneEra,
    pub start_instant: i64,
    pub until_instant: i64,
}

/// Resolve a `ZoneEra`'s `until_*` fields to a UT instant. `Year::MAX`
/// signals an open-ended (final) era, resolved to `i64::MAX`.
///
/// Like rule instants (§4.2), the wall/standard/universal suffix is
/// normalized against the offset in effect just before the boundary: this
/// era's own standard offset, plus whatever DST was last active under it.
/// Real-world era boundaries essentially always use the `s` or `u` suffix
/// (which don't need the DST term at all), so `last_dst_offset` is usually
/// `0` in practice; callers that have it available may supply it.
pub fn era_until_instant(era: &ZoneEra, last_dst_offset: i32) -> Result<i64> {
    if era.is_open_ended() {
        return Ok(i64::MAX);
    }
    let wall_days = days_from_epoch(era.until_year, era.until_month, era.until_day)?;
    let wall_instant = wall_days.seconds_at(era.until_seconds as i64);
    Ok(match era.until_time_suffix {
        TimeSuffix::Universal => wall_instant,
        TimeSuffix::Standard => wall_instant - era.offset_seconds as i64,
        TimeSuffix::Wall => wall_instant - era.offset_seconds as i64 - last_dst_offset as i64,
    })
}

/// For `zone` (after following any link) and target year `Y`, return the
/// eras whose half-open validity interval `[prev.until, this.until)`
/// intersects `[start_of(Y-1), start_of(Y+2))`.
pub fn select_eras_for_year<'a>(
    zone: &'a ZoneInfo,
    year: Year,
) -> Result<Vec<SelectedEra<'a>>> {
    let eras = &zone.effective().eras;

    let mut boundaries = Vec::with_capacity(eras.len());
    let mut prev_until = i64::MIN;
    for era in eras {
        let until = era_until_instant(era, 0)?;
        boundaries.push((prev_until, until));
        prev_until = until;
    }

    let window_start = year.saturating_add(-1).unix_days_at_jan1().seconds_at(0);
    let window_end = year.saturating_add(2).unix_days_at_jan1().seconds_at(0);

    let mut out = Vec::with_capacity(eras.len());
    for (era, (start, until)) in eras.iter().zip(boundaries) {
        if until > window_start && start < window_end {
            out.push(SelectedEra {
                era,
                start_instant: start,
                until_instant: until,
            });
        }
    }
    Ok(out)
}
