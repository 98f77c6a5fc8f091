use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use planetary_parade::{AnalyticEphemeris, Body, EphemerisOracle, Observer, TimeRange};

fn charleston() -> Observer {
    Observer::new(32.27, -79.94, 100.0, None).unwrap()
}

/// One altitude per body at a fixed instant.
fn bench_apparent_altitude(c: &mut Criterion) {
    let eph = AnalyticEphemeris::default();
    let site = charleston();
    let instant = Utc.with_ymd_and_hms(2022, 6, 24, 9, 44, 0).unwrap();

    c.bench_function("apparent_altitude/all_bodies", |b| {
        b.iter(|| {
            for body in Body::ALL {
                let alt = eph
                    .apparent_altitude(black_box(&instant), &site, body)
                    .unwrap();
                black_box(alt);
            }
        })
    });
}

/// Sunrise/sunset search over one month, hourly grid.
fn bench_sunrise_sunset_month(c: &mut Criterion) {
    let eph = AnalyticEphemeris::default();
    let site = charleston();
    let start = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

    c.bench_function("find_sunrise_sunset/one_month", |b| {
        b.iter_batched(
            || TimeRange::new(start, start + Duration::days(31)),
            |range| {
                let events = eph.find_sunrise_sunset(&range, &site).unwrap();
                black_box(events);
            },
            BatchSize::SmallInput,
        )
    });
}

/// Moon rise search, the fastest mover.
fn bench_moon_risings(c: &mut Criterion) {
    let eph = AnalyticEphemeris::default();
    let site = charleston();
    let start = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
    let range = TimeRange::new(start, start + Duration::days(31));

    c.bench_function("find_risings/moon_one_month", |b| {
        b.iter(|| {
            let rises = eph.find_risings(black_box(&range), Body::Moon, &site);
            black_box(rises.ok());
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_apparent_altitude, bench_sunrise_sunset_month, bench_moon_risings
);
criterion_main!(benches);
