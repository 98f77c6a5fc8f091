//! # Ephemeris oracle
//!
//! Everything the pipeline needs to know about the sky goes through the
//! [`EphemerisOracle`] trait:
//!
//! | Query                    | Answer                                                  |
//! |--------------------------|---------------------------------------------------------|
//! | `find_sunrise_sunset`    | every sunrise/sunset crossing in a window, in time order |
//! | `find_risings`           | every rise of one body in a window                      |
//! | `find_settings`          | every set of one body in a window                       |
//! | `apparent_altitude`      | topocentric altitude of a body at an instant (degrees)  |
//!
//! Implementations must be `Send + Sync`: the altitude sampler queries one shared
//! oracle from several rayon workers, and the oracle's state (loaded ephemeris data,
//! step sizes) is read-only while it answers.
//!
//! The crate ships [`AnalyticEphemeris`](crate::ephemeris::analytic::AnalyticEphemeris),
//! a self-contained low-precision implementation. Tests plug in scripted oracles.

use chrono::{DateTime, Utc};

use crate::bodies::Body;
use crate::constants::Degree;
use crate::observers::Observer;
use crate::parade_errors::ParadeError;

pub mod analytic;
mod kepler;
mod moon;
pub(crate) mod search;

/// Half-open window of UTC instants `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        TimeRange { start, end }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

/// A sunrise (`is_rise == true`) or sunset crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunEvent {
    pub instant: DateTime<Utc>,
    pub is_rise: bool,
}

impl SunEvent {
    pub fn rise(instant: DateTime<Utc>) -> Self {
        SunEvent {
            instant,
            is_rise: true,
        }
    }

    pub fn set(instant: DateTime<Utc>) -> Self {
        SunEvent {
            instant,
            is_rise: false,
        }
    }
}

pub trait EphemerisOracle: Send + Sync {
    /// Sunrise and sunset crossings inside `range`, sorted by instant.
    fn find_sunrise_sunset(
        &self,
        range: &TimeRange,
        observer: &Observer,
    ) -> Result<Vec<SunEvent>, ParadeError>;

    /// Instants at which `body` rises above its horizon inside `range`.
    fn find_risings(
        &self,
        range: &TimeRange,
        body: Body,
        observer: &Observer,
    ) -> Result<Vec<DateTime<Utc>>, ParadeError>;

    /// Instants at which `body` sets below its horizon inside `range`.
    fn find_settings(
        &self,
        range: &TimeRange,
        body: Body,
        observer: &Observer,
    ) -> Result<Vec<DateTime<Utc>>, ParadeError>;

    /// Risings and settings of `body` inside `range`, in that order.
    ///
    /// Oracles able to find both from one search should override this; the rise/set
    /// recording stage only calls this method.
    fn find_risings_and_settings(
        &self,
        range: &TimeRange,
        body: Body,
        observer: &Observer,
    ) -> Result<(Vec<DateTime<Utc>>, Vec<DateTime<Utc>>), ParadeError> {
        Ok((
            self.find_risings(range, body, observer)?,
            self.find_settings(range, body, observer)?,
        ))
    }

    /// Apparent topocentric altitude of `body` seen by `observer` at `instant`, in degrees.
    fn apparent_altitude(
        &self,
        instant: &DateTime<Utc>,
        observer: &Observer,
        body: Body,
    ) -> Result<Degree, ParadeError>;
}
