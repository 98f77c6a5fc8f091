#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use camino::Utf8Path;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::US::Eastern;
use planetary_parade::{
    Body, EphemerisOracle, Observer, ParadeConfig, ParadeError, SunEvent, TimeRange,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// US/Eastern wall-clock time as a UTC instant.
pub fn local_utc(day: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap());
    Eastern
        .from_local_datetime(&naive)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

/// Config with the cache pointed at `dir` (or disabled when `None`).
pub fn test_config(dir: Option<&Utf8Path>) -> ParadeConfig {
    ParadeConfig {
        start_year: 2021,
        end_year: 2021,
        cache_enabled: dir.is_some(),
        cache_dir: dir.map(|d| d.to_path_buf()),
        ..ParadeConfig::default()
    }
}

pub type AltitudeFn = fn(&DateTime<Utc>, &Observer, Body) -> f64;

/// Altitude that varies with the instant, the body and the observer latitude.
pub fn wavy(instant: &DateTime<Utc>, observer: &Observer, body: Body) -> f64 {
    let minutes = (instant.timestamp() / 60) as f64;
    let phase = minutes / 113.0 + body as usize as f64 * 0.7;
    35.0 * phase.sin() + (observer.latitude - 32.27) / 3.0
}

/// Oracle with a sunrise at 07:12 and a sunset at 17:45 (US/Eastern) every day
/// from `first` to `last`, and altitudes from `altitude`.
pub struct ScriptedOracle {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub altitude: AltitudeFn,
    pub calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new(first: NaiveDate, last: NaiveDate, altitude: AltitudeFn) -> Self {
        ScriptedOracle {
            first,
            last,
            altitude,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EphemerisOracle for ScriptedOracle {
    fn find_sunrise_sunset(
        &self,
        range: &TimeRange,
        _observer: &Observer,
    ) -> Result<Vec<SunEvent>, ParadeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut events = Vec::new();
        let mut day = self.first;
        while day <= self.last {
            events.push(SunEvent::rise(local_utc(day, 7, 12)));
            events.push(SunEvent::set(local_utc(day, 17, 45)));
            day += Duration::days(1);
        }
        events.retain(|e| range.contains(&e.instant));
        Ok(events)
    }

    fn find_risings(
        &self,
        range: &TimeRange,
        _body: Body,
        _observer: &Observer,
    ) -> Result<Vec<DateTime<Utc>>, ParadeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut day = self.first;
        let mut out = Vec::new();
        while day <= self.last {
            out.push(local_utc(day, 9, 30));
            day += Duration::days(1);
        }
        out.retain(|t| range.contains(t));
        Ok(out)
    }

    fn find_settings(
        &self,
        range: &TimeRange,
        _body: Body,
        _observer: &Observer,
    ) -> Result<Vec<DateTime<Utc>>, ParadeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut day = self.first;
        let mut out = Vec::new();
        while day <= self.last {
            out.push(local_utc(day, 20, 15));
            day += Duration::days(1);
        }
        out.retain(|t| range.contains(t));
        Ok(out)
    }

    fn apparent_altitude(
        &self,
        instant: &DateTime<Utc>,
        observer: &Observer,
        body: Body,
    ) -> Result<f64, ParadeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((self.altitude)(instant, observer, body))
    }
}
