//! Run configuration.
//!
//! [`ParadeConfig`] gathers every parameter of a run. Its [`Default`] reproduces the
//! historical setup: Charleston (SC) area, years 1800 to 2199, a 30-minute twilight
//! offset, a 10° treeline and all eight bodies.

use camino::Utf8PathBuf;
use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::bodies::Body;
use crate::cache::CacheKeyPolicy;
use crate::constants::{
    Degree, Meter, DEFAULT_DUSK_MINUTES, DEFAULT_ELEVATION, DEFAULT_END_YEAR, DEFAULT_LATITUDE,
    DEFAULT_LONGITUDE, DEFAULT_PAD_DAYS, DEFAULT_START_YEAR, DEFAULT_TIMEZONE, DEFAULT_TREELINE,
};
use crate::observers::Observer;
use crate::parade_errors::ParadeError;
use crate::time::DateRange;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParadeConfig {
    pub start_year: i32,
    /// Last year included in the range.
    pub end_year: i32,
    /// Offset between sunrise and the morning checkpoint (and sunset and evening).
    pub dusk_minutes: i64,
    pub latitude: Degree,
    pub longitude: Degree,
    pub elevation_m: Meter,
    pub treeline_degrees: Degree,
    /// IANA time zone name of the observer.
    pub timezone: String,
    pub pad_days: u32,
    pub bodies: Vec<Body>,
    pub record_rise_set: bool,
    pub cache_enabled: bool,
    /// Cache directory; the user cache directory when `None`.
    pub cache_dir: Option<Utf8PathBuf>,
    pub cache_key_policy: CacheKeyPolicy,
}

impl Default for ParadeConfig {
    fn default() -> Self {
        ParadeConfig {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            dusk_minutes: DEFAULT_DUSK_MINUTES,
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            elevation_m: DEFAULT_ELEVATION,
            treeline_degrees: DEFAULT_TREELINE,
            timezone: DEFAULT_TIMEZONE.to_string(),
            pad_days: DEFAULT_PAD_DAYS,
            bodies: Body::ALL.to_vec(),
            record_rise_set: false,
            cache_enabled: true,
            cache_dir: None,
            cache_key_policy: CacheKeyPolicy::Full,
        }
    }
}

impl ParadeConfig {
    /// Check every field; the first problem found is returned.
    pub fn validate(&self) -> Result<(), ParadeError> {
        if self.start_year > self.end_year {
            return Err(ParadeError::InvalidConfiguration(format!(
                "start year {} is after end year {}",
                self.start_year, self.end_year
            )));
        }
        if self.dusk_minutes <= 0 {
            return Err(ParadeError::InvalidConfiguration(format!(
                "dusk offset must be strictly positive, got {} min",
                self.dusk_minutes
            )));
        }
        if !self.treeline_degrees.is_finite() || !(0.0..90.0).contains(&self.treeline_degrees) {
            return Err(ParadeError::InvalidConfiguration(format!(
                "treeline angle {} is outside [0, 90)",
                self.treeline_degrees
            )));
        }
        if self.bodies.is_empty() {
            return Err(ParadeError::InvalidConfiguration(
                "no body to track".into(),
            ));
        }
        self.observer()?;
        self.tz()?;
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz, ParadeError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ParadeError::UnknownTimeZone(self.timezone.clone()))
    }

    pub fn observer(&self) -> Result<Observer, ParadeError> {
        Observer::new(self.latitude, self.longitude, self.elevation_m, None)
    }

    pub fn dusk_offset(&self) -> Duration {
        Duration::minutes(self.dusk_minutes)
    }

    /// January 1st of `start_year` to January 1st of the year after `end_year`.
    pub fn date_range(&self) -> Result<DateRange, ParadeError> {
        DateRange::from_years(self.start_year, self.end_year)
    }

    /// Tracked bodies, deduplicated, in reporting order.
    pub fn tracked_bodies(&self) -> Vec<Body> {
        let mut bodies = self.bodies.clone();
        bodies.sort();
        bodies.dedup();
        bodies
    }
}
