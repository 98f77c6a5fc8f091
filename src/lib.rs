//! # planetary_parade
//!
//! Find the days on which several planets share the sky.
//!
//! For a fixed observer and a span of years, the crate samples the altitude of the
//! naked-eye planets, Uranus, Neptune and the Moon at four daily checkpoints
//! (morning twilight, sunrise, sunset, evening twilight) and counts, per body group,
//! how many of them stand above the horizon and above a "treeline" elevation.
//!
//! ## Pipeline
//!
//! ```text
//! EphemerisOracle ─▶ EventExtractor ─▶ AltitudeSampler ─▶ TableCache ─▶ Aggregator ─▶ ReportFilter
//!  (sun crossings)    (local days)       (altitudes)       (JSON)        (counts)       (selection)
//! ```
//!
//! [`Parade`](crate::parade::Parade) wires the stages together from a
//! [`ParadeConfig`](crate::config::ParadeConfig):
//!
//! ```rust, no_run
//! use planetary_parade::{Parade, ParadeConfig, ParadeError, VisibilityColumn};
//!
//! fn main() -> Result<(), ParadeError> {
//!     let config = ParadeConfig {
//!         start_year: 2021,
//!         end_year: 2022,
//!         ..ParadeConfig::default()
//!     };
//!     let outcome = Parade::new(config)?.run()?;
//!     let column: VisibilityColumn = "visible_evening_above_horizon".parse()?;
//!     for date in outcome.consolidated.dates_where(&column, 5) {
//!         println!("{date}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The astronomy lives behind the [`EphemerisOracle`](crate::ephemeris::EphemerisOracle)
//! trait; the bundled [`AnalyticEphemeris`](crate::ephemeris::analytic::AnalyticEphemeris)
//! needs no external data.

pub mod aggregation;
pub mod bodies;
pub mod cache;
pub mod config;
pub mod constants;
pub mod earth_orientation;
pub mod ephemeris;
pub mod events;
pub mod observers;
pub mod parade;
pub mod parade_errors;
pub mod progress;
pub mod report;
pub mod sampler;
pub mod table;
pub mod time;

pub use aggregation::{Aggregator, ConsolidatedTable, ThresholdKind, VisibilityColumn};
pub use bodies::{Body, BodyGroup, Checkpoint};
pub use cache::{CacheKey, CacheKeyPolicy, DiskCache, TableCache};
pub use config::ParadeConfig;
pub use ephemeris::analytic::AnalyticEphemeris;
pub use ephemeris::{EphemerisOracle, SunEvent, TimeRange};
pub use observers::Observer;
pub use parade::{Parade, ParadeOutcome};
pub use parade_errors::ParadeError;
pub use report::{contiguous_ranges, ParadeReport, ReportFilter};
pub use table::{DayEvents, DayRecord, VisibilityTable};
pub use time::DateRange;

#[cfg(test)]
pub(crate) mod unit_test_global {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
    use chrono_tz::US::Eastern;

    use crate::bodies::Body;
    use crate::constants::Degree;
    use crate::ephemeris::{EphemerisOracle, SunEvent, TimeRange};
    use crate::observers::Observer;
    use crate::parade_errors::ParadeError;

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn charleston() -> Observer {
        Observer::new(32.27, -79.94, 100.0, Some("Charleston".into())).unwrap()
    }

    /// US/Eastern wall-clock time as a UTC instant.
    pub(crate) fn local_utc(day: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
        let naive = day.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap());
        Eastern
            .from_local_datetime(&naive)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    /// Deterministic altitude depending on body and instant.
    pub(crate) fn wavy_altitude(instant: &DateTime<Utc>, body: Body) -> Degree {
        let phase = (instant.timestamp() / 60) as f64 / 97.0 + body as usize as f64;
        40.0 * phase.sin()
    }

    /// Oracle answering from fixed lists of events.
    pub(crate) struct ScriptedOracle {
        pub events: Vec<SunEvent>,
        pub risings: Vec<(Body, DateTime<Utc>)>,
        pub settings: Vec<(Body, DateTime<Utc>)>,
        pub altitude: fn(&DateTime<Utc>, Body) -> Degree,
        pub fail_altitudes: bool,
        /// Calls to `find_risings` or `find_settings`.
        pub separate_searches: AtomicUsize,
        /// Calls to `find_risings_and_settings`.
        pub combined_searches: AtomicUsize,
    }

    impl Default for ScriptedOracle {
        fn default() -> Self {
            ScriptedOracle {
                events: Vec::new(),
                risings: Vec::new(),
                settings: Vec::new(),
                altitude: wavy_altitude,
                fail_altitudes: false,
                separate_searches: AtomicUsize::new(0),
                combined_searches: AtomicUsize::new(0),
            }
        }
    }

    impl ScriptedOracle {
        /// Sunrise at 07:12 and sunset at 17:45 local on each date.
        pub(crate) fn daily(dates: &[NaiveDate]) -> Self {
            let mut oracle = ScriptedOracle::default();
            for &d in dates {
                oracle.push_event(SunEvent::rise(local_utc(d, 7, 12)));
                oracle.push_event(SunEvent::set(local_utc(d, 17, 45)));
            }
            oracle
        }

        pub(crate) fn push_event(&mut self, event: SunEvent) {
            self.events.push(event);
            self.events.sort_by_key(|e| e.instant);
        }

        pub(crate) fn push_rising(&mut self, body: Body, instant: DateTime<Utc>) {
            self.risings.push((body, instant));
        }

        pub(crate) fn push_setting(&mut self, body: Body, instant: DateTime<Utc>) {
            self.settings.push((body, instant));
        }
    }

    fn select(list: &[(Body, DateTime<Utc>)], range: &TimeRange, body: Body) -> Vec<DateTime<Utc>> {
        list.iter()
            .filter(|(b, t)| *b == body && range.contains(t))
            .map(|(_, t)| *t)
            .collect()
    }

    impl EphemerisOracle for ScriptedOracle {
        fn find_sunrise_sunset(
            &self,
            range: &TimeRange,
            _observer: &Observer,
        ) -> Result<Vec<SunEvent>, ParadeError> {
            Ok(self
                .events
                .iter()
                .filter(|e| range.contains(&e.instant))
                .copied()
                .collect())
        }

        fn find_risings(
            &self,
            range: &TimeRange,
            body: Body,
            _observer: &Observer,
        ) -> Result<Vec<DateTime<Utc>>, ParadeError> {
            self.separate_searches.fetch_add(1, Ordering::SeqCst);
            Ok(select(&self.risings, range, body))
        }

        fn find_settings(
            &self,
            range: &TimeRange,
            body: Body,
            _observer: &Observer,
        ) -> Result<Vec<DateTime<Utc>>, ParadeError> {
            self.separate_searches.fetch_add(1, Ordering::SeqCst);
            Ok(select(&self.settings, range, body))
        }

        fn find_risings_and_settings(
            &self,
            range: &TimeRange,
            body: Body,
            _observer: &Observer,
        ) -> Result<(Vec<DateTime<Utc>>, Vec<DateTime<Utc>>), ParadeError> {
            self.combined_searches.fetch_add(1, Ordering::SeqCst);
            Ok((
                select(&self.risings, range, body),
                select(&self.settings, range, body),
            ))
        }

        fn apparent_altitude(
            &self,
            instant: &DateTime<Utc>,
            _observer: &Observer,
            body: Body,
        ) -> Result<Degree, ParadeError> {
            if self.fail_altitudes {
                return Err(ParadeError::OracleUnavailable("scripted failure".into()));
            }
            Ok((self.altitude)(instant, body))
        }
    }
}
