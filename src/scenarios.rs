//! End-to-end scenario tests against `America/Los_Angeles`, `US/Pacific`,
//! `Africa/Tunis`, and `Australia/Sydney`, in the spirit of
//! `bxparks/AceTimePython`'s `tests/test_acetz.py`. Each zone's tables here
//! are hand-built rather than read from a compiled zonedb; epoch literals
//! are independently derived from the civil dates under test rather than
//! copied, so they stay correct regardless of how the fixture tables are
//! constructed.

#![cfg(test)]

use std::sync::Arc;

use crate::calendar::{Month, Weekday, Year};
use crate::model::{PolicyRef, TimeSuffix, ZoneEra, ZonePolicy, ZoneRule};
use crate::registry::{Registry, ZoneSource};

/// America/Los_Angeles, 1987-2006 "US" rules (first Sunday in April /
/// last Sunday in October), plus its US/Pacific link.
fn us_policy() -> Arc<ZonePolicy> {
    Arc::new(ZonePolicy {
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
    })
}

/// Australia/Sydney, simplified current-era "AN" rules: DST starts last
/// Sunday of October and ends last Sunday of March, each at 02:00/03:00
/// wall clock.
fn sydney_policy() -> Arc<ZonePolicy> {
    Arc::new(ZonePolicy {
        name: "AN".to_string(),
        rules: vec![
            ZoneRule {
                from_year: Year::new_unchecked(1996),
                to_year: Year::MAX,
                in_month: Month::October,
                on_day_of_week: Weekday::Sunday.iso(),
                on_day_of_month: 0,
                at_seconds: 2 * 3600,
                at_time_suffix: TimeSuffix::Wall,
                delta_seconds: 3600,
                letter: "D".to_string(),
            },
            ZoneRule {
                from_year: Year::new_unchecked(1996),
                to_year: Year::MAX,
                in_month: Month::March,
                on_day_of_week: Weekday::Sunday.iso(),
                on_day_of_month: 0,
                at_seconds: 3 * 3600,
                at_time_suffix: TimeSuffix::Wall,
                delta_seconds: 0,
                letter: "S".to_string(),
            },
        ],
    })
}

fn open_ended_era(
    offset_seconds: i32,
    zone_policy: PolicyRef,
    rules_delta_seconds: i32,
    format: &str,
) -> ZoneEra {
    ZoneEra {
        offset_seconds,
        zone_policy,
        rules_delta_seconds,
        format: format.to_string(),
        until_year: Year::MAX,
        until_month: Month::January,
        until_day: 1,
        until_seconds: 0,
        until_time_suffix: TimeSuffix::Universal,
    }
}

fn scenario_registry() -> Registry {
    Registry::build(vec![
        (
            "America/Los_Angeles".to_string(),
            ZoneSource::Eras(vec![open_ended_era(
                -8 * 3600,
                PolicyRef::Policy(us_policy()),
                0,
                "P%sT",
            )]),
        ),
        (
            "US/Pacific".to_string(),
            ZoneSource::Link("America/Los_Angeles".to_string()),
        ),
        (
            "Africa/Tunis".to_string(),
            ZoneSource::Eras(vec![open_ended_era(3600, PolicyRef::None, 0, "CET")]),
        ),
        (
            "Australia/Sydney".to_string(),
            ZoneSource::Eras(vec![open_ended_era(
                10 * 3600,
                PolicyRef::Policy(sydney_policy()),
                0,
                "AE%sT",
            )]),
        ),
    ])
    .unwrap()
}

#[test]
fn scenario_1_la_standard_time() {
    let registry = scenario_registry();
    let zone = registry.get_zone("America/Los_Angeles").unwrap();
    let (transition, epoch) = zone
        .info_for_civil(Year::new_unchecked(2000), Month::January, 2, 3, 4, 5, 0)
        .unwrap();
    assert_eq!(transition.total_offset(), -28800);
    assert_eq!(transition.abbreviation, "PST");
    assert_eq!(epoch, 946_811_045);
}

#[test]
fn scenario_2_la_spring_forward_boundary() {
    let registry = scenario_registry();
    let zone = registry.get_zone("America/Los_Angeles").unwrap();

    let after = zone.info_for_epoch(954_669_600).unwrap();
    assert_eq!(after.abbreviation, "PDT");
    assert_eq!(after.total_offset(), -25200);

    let before = zone.info_for_epoch(954_669_599).unwrap();
    assert_eq!(before.abbreviation, "PST");
    assert_eq!(before.total_offset(), -28800);
}

#[test]
fn scenario_3_la_fall_back_overlap() {
    let registry = scenario_registry();
    let zone = registry.get_zone("America/Los_Angeles").unwrap();

    let (early, epoch_early) = zone
        .info_for_civil(Year::new_unchecked(2000), Month::October, 29, 1, 59, 59, 0)
        .unwrap();
    assert_eq!(early.abbreviation, "PDT");
    assert_eq!(early.total_offset(), -25200);
    assert_eq!(epoch_early, 972_809_999);

    let (late, epoch_late) = zone
        .info_for_civil(Year::new_unchecked(2000), Month::October, 29, 1, 59, 59, 1)
        .unwrap();
    assert_eq!(late.abbreviation, "PST");
    assert_eq!(late.total_offset(), -28800);
    assert_eq!(epoch_late, 972_813_599);

    assert_eq!(epoch_late - epoch_early, 3600);
}

#[test]
fn scenario_4_la_fall_back_gap_crossing() {
    let registry = scenario_registry();
    let zone = registry.get_zone("America/Los_Angeles").unwrap();
    let (transition, _) = zone
        .info_for_civil(Year::new_unchecked(2000), Month::October, 29, 2, 0, 0, 0)
        .unwrap();
    assert_eq!(transition.abbreviation, "PST");
    assert_eq!(transition.total_offset(), -28800);
}

#[test]
fn scenario_5_us_pacific_alias_matches_los_angeles() {
    let registry = scenario_registry();
    let canonical = registry.get_zone("America/Los_Angeles").unwrap();
    let alias = registry.get_zone("US/Pacific").unwrap();

    let (want, _) = canonical
        .info_for_civil(Year::new_unchecked(2000), Month::April, 2, 3, 0, 0, 0)
        .unwrap();
    let (got, _) = alias
        .info_for_civil(Year::new_unchecked(2000), Month::April, 2, 3, 0, 0, 0)
        .unwrap();

    assert_eq!(got, want);
    assert_eq!(alias.name(), "US/Pacific");
    assert_eq!(alias.canonical_name(), "America/Los_Angeles");
}

#[test]
fn scenario_6_tunis_no_dst_window() {
    let registry = scenario_registry();
    let zone = registry.get_zone("Africa/Tunis").unwrap();
    let (transition, _) = zone
        .info_for_civil(Year::new_unchecked(2006), Month::January, 1, 0, 0, 0, 0)
        .unwrap();
    assert_eq!(transition.abbreviation, "CET");
    assert_eq!(transition.total_offset(), 3600);
    assert_eq!(transition.dst_offset, 0);
}

#[test]
fn scenario_7_sydney_southern_hemisphere_fall_back() {
    let registry = scenario_registry();
    let zone = registry.get_zone("Australia/Sydney").unwrap();
    let (transition, _) = zone
        .info_for_civil(Year::new_unchecked(2000), Month::March, 26, 2, 0, 0, 1)
        .unwrap();
    assert_eq!(transition.abbreviation, "AEST");
    assert_eq!(transition.total_offset(), 36000);
    assert_eq!(transition.dst_offset, 0);
}
