use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tzengine::{
    Month, PolicyRef, Registry, TimeSuffix, Weekday, Year, ZoneEra, ZonePolicy, ZoneRule,
    ZoneSource,
};

fn la_registry() -> Registry {
    let us_policy = std::sync::Arc::new(ZonePolicy {
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

    let sources = vec![(
        "America/Los_Angeles".to_string(),
        ZoneSource::Eras(vec![ZoneEra {
            offset_seconds: -8 * 3600,
            zone_policy: PolicyRef::Policy(us_policy),
            rules_delta_seconds: 0,
            format: "P%sT".to_string(),
            until_year: Year::MAX,
            until_month: Month::January,
            until_day: 1,
            until_seconds: 0,
            until_time_suffix: TimeSuffix::Universal,
        }]),
    )];
    Registry::build(sources).unwrap()
}

fn bench_info_for_epoch(c: &mut Criterion) {
    let registry = la_registry();
    let zone = registry.get_zone("America/Los_Angeles").unwrap();
    let epoch_seconds = black_box(954_669_600i64);
    c.bench_function("info_for_epoch", |b| {
        b.iter(|| zone.info_for_epoch(black_box(epoch_seconds)).unwrap())
    });
}

fn bench_info_for_local(c: &mut Criterion) {
    let registry = la_registry();
    let zone = registry.get_zone("America/Los_Angeles").unwrap();
    let local_seconds = black_box(951993600i64);
    c.bench_function("info_for_local", |b| {
        b.iter(|| zone.info_for_local(black_box(local_seconds)).unwrap())
    });
}

criterion_group!(benches, bench_info_for_epoch, bench_info_for_local);
criterion_main!(benches);
