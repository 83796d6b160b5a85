//! Rule expander (§4.2): turns a policy's recurring rules into concrete UT
//! transition instants for a target year (and its immediate neighbors).

use crate::calendar::{days_from_epoch, resolve_day_of_month, Year};
use crate::error::{Error, Result};
use crate::model::{TimeSuffix, ZonePolicy, ZoneRule};

/// A single concrete transition instant produced by expanding one rule for
/// one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTransition {
    pub ut_instant: i64,
    pub dst_offset: i32,
    pub letter: String,
    pub from_year: Year,
}

/// Normalize one rule's wall-clock firing time, for the calendar year
/// `applies_in_year`, to a UT instant.
///
/// `era_offset_seconds` is the owning era's standard offset.
/// `running_dst_offset` is the DST delta in effect from the *previous*
/// transition in this era's chronological stream (bootstrap: `0`), needed to
/// normalize `w` (wall) suffixed rules per §4.2 step 3.
fn normalize_rule_instant(
    rule: &ZoneRule,
    applies_in_year: Year,
    era_offset_seconds: i32,
    running_dst_offset: i32,
) -> Result<i64> {
    let day = resolve_day_of_month(
        applies_in_year,
        rule.in_month,
        rule.on_day_of_week,
        rule.on_day_of_month,
    )?;
    let wall_days = days_from_epoch(applies_in_year, rule.in_month, day)?;
    let wall_instant = wall_days.seconds_at(rule.at_seconds as i64);

    Ok(match rule.at_time_suffix {
        TimeSuffix::Universal => wall_instant,
        TimeSuffix::Standard => wall_instant - era_offset_seconds as i64,
        TimeSuffix::Wall => {
            wall_instant - era_offset_seconds as i64 - running_dst_offset as i64
        }
    })
}

/// Expand every rule in `policy` whose `[from_year, to_year]` includes one of
/// `{year-1, year, year+1}` into UT-sorted candidates, resolving the `w`/`s`/`u`
/// bootstrap by walking the rules in calendar order and threading the
/// running DST offset through (the same technique real zic-derived
/// compilers use: ordering by wall-clock calendar position is what the
/// bootstrap in §4.2 step 3 presupposes, since the alternative (sorting by
/// the not-yet-computed UT instant) is circular).
///
/// Ties at identical `ut_instant` are resolved per the §4.2 tie-break: the
/// candidate with the larger `from_year` wins; if still tied, the one with a
/// non-zero `delta_seconds` wins; otherwise `InconsistentRuleSet`.
pub fn expand_policy_for_year(
    policy: &ZonePolicy,
    year: Year,
    era_offset_seconds: i32,
) -> Result<Vec<CandidateTransition>> {
    let neighborhood = [year.saturating_add(-1), year, year.saturating_add(1)];

    // Gather (rule, year-it-applies-in) pairs, sorted in wall-clock calendar
    // order: this is what a real rule stream fires in, independent of the
    // `w`/`s`/`u` suffix (which only perturbs things by at most a few hours).
    let mut pending: Vec<(&ZoneRule, Year)> = Vec::new();
    for probe_year in neighborhood {
        for rule in &policy.rules {
            if rule.covers_year(probe_year) {
                pending.push((rule, probe_year));
            }
        }
    }
    pending.sort_by_key(|(rule, probe_year)| {
        (
            probe_year.get(),
            rule.in_month.get(),
            rule.on_day_of_month,
            rule.at_seconds,
        )
    });

    let mut out = Vec::with_capacity(pending.len());
    let mut running_dst_offset = 0i32;
    for (rule, probe_year) in pending {
        let ut_instant =
            normalize_rule_instant(rule, probe_year, era_offset_seconds, running_dst_offset)?;
        out.push(CandidateTransition {
            ut_instant,
            dst_offset: rule.delta_seconds,
            letter: rule.letter.clone(),
            from_year: rule.from_year,
        });
        running_dst_offset = rule.delta_seconds;
    }

    out.sort_by_key(|c| c.ut_instant);
    resolve_ties(out)
}

fn resolve_ties(candidates: Vec<CandidateTransition>) -> Result<Vec<CandidateTransition>> {
    let mut out: Vec<CandidateTransition> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match out.last() {
            Some(prev) if prev.ut_instant == candidate.ut_instant => {
                let winner = if prev.from_year != candidate.from_year {
                    if prev.from_year > candidate.from_year {
                        prev.clone()
                    } else {
                        candidate
                    }
                } else if (prev.dst_offset != 0) != (candidate.dst_offset != 0) {
                    if prev.dst_offset != 0 {
                        prev.clone()
                    } else {
                        candidate
                    }
                } else {
                    return Err(Error::InconsistentRuleSet);
                };
                *out.last_mut().unwrap() = winner;
            }
            _ => out.push(candidate),
        }
    }
    Ok(out)
}
