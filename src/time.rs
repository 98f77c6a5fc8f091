use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::{JulianCenturies, DAYS_PER_CENTURY, DPI, J2000_JD, MJD, T2000};
use crate::ephemeris::TimeRange;
use crate::parade_errors::ParadeError;

/// MJD of the Unix epoch (1970-01-01T00:00:00 UTC)
const MJD_UNIX_EPOCH: f64 = 40_587.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Requested span of calendar dates.
///
/// The boundary instants `t0` and `t1` are midnight UTC of the first and last date.
/// The event extractor keeps only local days between `start` and `last_kept`, which
/// equals `end` unless the range was built with [`DateRange::from_years`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    last_kept: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ParadeError> {
        if start > end {
            return Err(ParadeError::InvalidConfiguration(format!(
                "range start {start} is after range end {end}"
            )));
        }
        Ok(DateRange {
            start,
            end,
            last_kept: end,
        })
    }

    /// Range covering the calendar years `start_year..=end_year`.
    ///
    /// The search window ends on January 1st of the year after `end_year`, so that
    /// the sunset of December 31st is always captured, but the kept dates stop at
    /// December 31st of `end_year` whatever the observer's time zone.
    pub fn from_years(start_year: i32, end_year: i32) -> Result<Self, ParadeError> {
        let out_of_range =
            |year: i32| ParadeError::InvalidConfiguration(format!("year {year} is out of range"));
        let first_january =
            |year: i32| NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| out_of_range(year));
        let last_kept =
            NaiveDate::from_ymd_opt(end_year, 12, 31).ok_or_else(|| out_of_range(end_year))?;

        let mut range = DateRange::new(first_january(start_year)?, first_january(end_year + 1)?)?;
        range.last_kept = last_kept;
        Ok(range)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Last local date the extractor may keep.
    pub fn last_kept(&self) -> NaiveDate {
        self.last_kept
    }

    pub fn t0(&self) -> DateTime<Utc> {
        midnight_utc(self.start)
    }

    pub fn t1(&self) -> DateTime<Utc> {
        midnight_utc(self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.last_kept
    }

    /// Instant window widened by `pad_days` on both sides.
    pub fn padded(&self, pad_days: u32) -> TimeRange {
        let pad = Days::new(pad_days as u64);
        let start = self.start.checked_sub_days(pad).unwrap_or(NaiveDate::MIN);
        let end = self.end.checked_add_days(pad).unwrap_or(NaiveDate::MAX);
        TimeRange::new(midnight_utc(start), midnight_utc(end))
    }

    /// Textual form of the boundary instants, used to address cached tables.
    pub fn key_text(&self) -> String {
        format!(
            "{}_{}",
            self.t0().format("%Y%m%dT%H%M%SZ"),
            self.t1().format("%Y%m%dT%H%M%SZ")
        )
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// 00:00:00 UTC of a calendar date.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

/// Convert a UTC instant to the observer's civil time, keeping the UTC offset in effect.
pub fn to_local(instant: &DateTime<Utc>, tz: &Tz) -> DateTime<FixedOffset> {
    instant.with_timezone(tz).fixed_offset()
}

/// Convert a UTC instant into a hifitime [`Epoch`] (millisecond resolution).
pub fn utc_to_epoch(instant: &DateTime<Utc>) -> Epoch {
    Epoch::from_unix_milliseconds(instant.timestamp_millis() as f64)
}

/// Julian centuries since J2000.0 on the TT scale, the argument of the ephemeris series.
pub fn julian_centuries_tt(instant: &DateTime<Utc>) -> JulianCenturies {
    (utc_to_epoch(instant).to_jde_tt_days() - J2000_JD) / DAYS_PER_CENTURY
}

/// Modified Julian Date of a UTC instant, used as a stand-in for UT1.
///
/// |UT1 − UTC| stays below 0.9 s, i.e. well under a second of sidereal rotation,
/// which is negligible for altitudes sampled at fixed checkpoints.
pub fn mjd_ut(instant: &DateTime<Utc>) -> MJD {
    MJD_UNIX_EPOCH + instant.timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Greenwich Mean Sidereal Time in radians for an MJD on the UT1 scale.
///
/// IAU 1982 polynomial for GMST at 0h UT1, plus the rotation accumulated during
/// the fraction of the day (sidereal/solar rate ratio `RAP`).
/// The result is normalized to `[0, 2π)`.
pub fn gmst(tjm: MJD) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let day_start = tjm.floor();
    let t = (day_start - T2000) / DAYS_PER_CENTURY;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / 86400.0;
    let rotation = (tjm - day_start) * DPI * RAP;

    (gmst0 + rotation).rem_euclid(DPI)
}
