//! Transition builder (§4.4): the component most of the engine's complexity
//! lives in. Merges era + expanded-rule output into a per-year ordered list
//! of `ActiveTransition` records with closed offset and abbreviation.

use crate::calendar::Year;
use crate::era::{select_eras_for_year, SelectedEra};
use crate::error::Result;
use crate::expand::{expand_policy_for_year, CandidateTransition};
use crate::model::{ActiveTransition, PolicyRef, ZoneInfo};

struct RawEvent {
    instant: i64,
    utc_offset: i32,
    dst_offset: i32,
    abbreviation: String,
}

/// Produce the stream of (instant, dst_offset, letter) events an era
/// contributes within its own validity window: one initial event at the
/// era's start carrying whatever DST state was active at that boundary
/// (found by scanning backward through the era's own rule candidates, or
/// `0`/no-letter if none precede it), plus every subsequent rule transition
/// strictly inside the window.
fn era_events(sel: &SelectedEra<'_>, year: Year) -> Result<Vec<(i64, i32, String)>> {
    match &sel.era.zone_policy {
        PolicyRef::None => Ok(vec![(sel.start_instant, 0, String::new())]),
        PolicyRef::Fixed => Ok(vec![(
            sel.start_instant,
            sel.era.rules_delta_seconds,
            String::new(),
        )]),
        PolicyRef::Policy(policy) => {
            let candidates: Vec<CandidateTransition> =
                expand_policy_for_year(policy, year, sel.era.offset_seconds)?;

            let initial = candidates
                .iter()
                .filter(|c| c.ut_instant <= sel.start_instant)
                .max_by_key(|c| c.ut_instant);
            let (init_dst, init_letter) = initial
                .map(|c| (c.dst_offset, c.letter.clone()))
                .unwrap_or((0, String::new()));

            let mut events = vec![(sel.start_instant, init_dst, init_letter)];
            for c in candidates {
                if c.ut_instant > sel.start_instant && c.ut_instant < sel.until_instant {
                    events.push((c.ut_instant, c.dst_offset, c.letter));
                }
            }
            Ok(events)
        }
    }
}

/// Resolve an era's abbreviation `format` template (§4.4 step 6):
/// - no slot and no slash: literal;
/// - slash form `STD/DST`: pick by whether `dst_offset == 0`;
/// - slot form (`%s`): substitute the rule letter, with the sentinel `-`
///   substituting to the empty string.
fn resolve_abbreviation(format: &str, letter: &str, dst_offset: i32) -> String {
    if let Some(slash_pos) = format.find('/') {
        let std_part = &format[..slash_pos];
        let dst_part = &format[slash_pos + 1..];
        if dst_offset == 0 {
            std_part.to_string()
        } else {
            dst_part.to_string()
        }
    } else if format.contains("%s") {
        let substitution = if letter == "-" { "" } else { letter };
        format.replacen("%s", substitution, 1)
    } else {
        format.to_string()
    }
}

/// Build the ordered `ActiveTransition` list for `zone` in calendar year
/// `year`, fully covering `[start_of(year), start_of(year+1))` plus one
/// sentinel transition extending into `year+1`.
pub fn build_transitions_for_year(zone: &ZoneInfo, year: Year) -> Result<Vec<ActiveTransition>> {
    let selected = select_eras_for_year(zone, year)?;

    let mut raw: Vec<RawEvent> = Vec::new();
    for sel in &selected {
        for (instant, dst_offset, letter) in era_events(sel, year)? {
            let abbreviation = resolve_abbreviation(&sel.era.format, &letter, dst_offset);
            raw.push(RawEvent {
                instant,
                utc_offset: sel.era.offset_seconds,
                dst_offset,
                abbreviation,
            });
        }
    }
    raw.sort_by_key(|e| e.instant);

    // When two events land on the same instant (an era boundary coinciding
    // exactly with a rule transition), the later-pushed one wins: selected
    // eras are already in chronological order, so a later era's event
    // reflects the up-to-date state.
    let mut compact: Vec<RawEvent> = Vec::with_capacity(raw.len());
    for event in raw {
        if let Some(last) = compact.last() {
            if last.instant == event.instant {
                compact.pop();
            }
        }
        compact.push(event);
    }

    let mut transitions: Vec<ActiveTransition> = Vec::with_capacity(compact.len());
    for (i, event) in compact.iter().enumerate() {
        let until = compact.get(i + 1).map(|e| e.instant).unwrap_or(i64::MAX);
        transitions.push(ActiveTransition {
            start_instant: event.instant,
            until_instant: until,
            utc_offset: event.utc_offset,
            dst_offset: event.dst_offset,
            abbreviation: event.abbreviation.clone(),
            fold: 0,
        });
    }

    // Step 5: compress maximal runs of constant (utc_offset, dst_offset, abbreviation).
    let mut compressed: Vec<ActiveTransition> = Vec::with_capacity(transitions.len());
    for t in transitions {
        if let Some(last) = compressed.last_mut() {
            if last.utc_offset == t.utc_offset
                && last.dst_offset == t.dst_offset
                && last.abbreviation == t.abbreviation
            {
                last.until_instant = t.until_instant;
                continue;
            }
        }
        compressed.push(t);
    }

    // Step 7: clip to the query window, keeping one sentinel transition past
    // start_of(year + 1). The ±∞ sentinels at the true ends of the zone's
    // supported horizon fall out naturally: the era selector seeds the
    // very first era's start at i64::MIN, and an open-ended final era
    // resolves its until to i64::MAX.
    let window_start = year.unix_days_at_jan1().seconds_at(0);
    let window_end = year.saturating_add(1).unix_days_at_jan1().seconds_at(0);

    let first_idx = compressed
        .iter()
        .position(|t| t.until_instant > window_start)
        .unwrap_or(0);
    let last_idx = compressed
        .iter()
        .position(|t| t.start_instant >= window_end)
        .unwrap_or(compressed.len() - 1);

    Ok(compressed[first_idx..=last_idx].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Month, Weekday};
    use crate::model::{TimeSuffix, ZoneEra, ZonePolicy, ZoneRule};
    use std::sync::Arc;

    fn la_zone() -> ZoneInfo {
        let us_policy = Arc::new(ZonePolicy {
            name: "US".to_string(),
            rules: vec![
                ZoneRule {
                    from_year: Year::new_unchecked(1987),
                    to_year: Year::MAX,
                    in_month: Month::April,
                    on_day_of_week: Weekday::Sunday.iso(),
                    on_day_of_month: 1,
                    at_seconds: 2 * 3600,
                    at_time_suffix: TimeSuffix::Wall,
                    delta_seconds: 3600,
                    letter: "D".to_string(),
                },
                ZoneRule {
                    from_year: Year::new_unchecked(1987),
                    to_year: Year::MAX,
                    in_month: Month::October,
                    on_day_of_week: Weekday::Sunday.iso(),
                    on_day_of_month: 0,
                    at_seconds: 2 * 3600,
                    at_time_suffix: TimeSuffix::Wall,
                    delta_seconds: 0,
                    letter: "S".to_string(),
                },
            ],
        });

        ZoneInfo {
            name: "America/Los_Angeles".to_string(),
            link_target: None,
            eras: vec![ZoneEra {
                offset_seconds: -8 * 3600,
                zone_policy: PolicyRef::Policy(us_policy),
                rules_delta_seconds: 0,
                format: "P%sT".to_string(),
                until_year: Year::MAX,
                until_month: Month::January,
                until_day: 1,
                until_seconds: 0,
                until_time_suffix: TimeSuffix::Universal,
            }],
        }
    }

    #[test]
    fn covers_the_year_with_no_gaps_or_overlaps() {
        let zone = la_zone();
        let transitions = build_transitions_for_year(&zone, Year::new_unchecked(2000)).unwrap();
        assert!(transitions.len() >= 2);
        for pair in transitions.windows(2) {
            assert_eq!(pair[0].until_instant, pair[1].start_instant);
        }
        for pair in transitions.windows(2) {
            assert!(pair[0].start_instant < pair[1].start_instant);
        }
    }

    #[test]
    fn spring_and_fall_abbreviations_resolve() {
        let zone = la_zone();
        let transitions = build_transitions_for_year(&zone, Year::new_unchecked(2000)).unwrap();

        let spring = transitions
            .iter()
            .find(|t| t.start_instant == 954_669_600)
            .expect("spring-forward transition present");
        assert_eq!(spring.abbreviation, "PDT");
        assert_eq!(spring.total_offset(), -7 * 3600);

        let fall = transitions
            .iter()
            .find(|t| t.start_instant == 972_810_000)
            .expect("fall-back transition present");
        assert_eq!(fall.abbreviation, "PST");
        assert_eq!(fall.total_offset(), -8 * 3600);
    }
}
