//! # Event extraction and local-day binning
//!
//! Turns the oracle's sunrise/sunset crossings (UTC instants) into one [`DayEvents`]
//! per **local calendar date** of the observer.
//!
//! ## Algorithm
//!
//! 1. Query `find_sunrise_sunset` once over the requested range widened by
//!    `pad_days` on each side.
//! 2. Convert every instant to the observer's time zone and bin it under its local
//!    date. A second rise (or set) on the same date overwrites the first.
//! 3. Drop the smallest and the largest date: the padded window cuts them.
//! 4. Drop dates outside the requested range (`start..=last_kept`).
//! 5. Keep only dates holding both a sunrise and a sunset; the others (polar day or
//!    night) are logged and skipped.
//!
//! `morning = sunrise − dusk_offset` and `evening = sunset + dusk_offset`.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use chrono_tz::Tz;

use crate::ephemeris::EphemerisOracle;
use crate::observers::Observer;
use crate::parade_errors::ParadeError;
use crate::table::DayEvents;
use crate::time::{to_local, DateRange};

#[derive(Debug, Default, Clone, Copy)]
struct PartialDay {
    sunrise: Option<DateTime<FixedOffset>>,
    sunset: Option<DateTime<FixedOffset>>,
}

pub struct EventExtractor<'a, O: EphemerisOracle + ?Sized> {
    oracle: &'a O,
    observer: &'a Observer,
    timezone: Tz,
    dusk_offset: Duration,
    pad_days: u32,
}

impl<'a, O: EphemerisOracle + ?Sized> EventExtractor<'a, O> {
    /// Build an extractor.
    ///
    /// Errors
    /// ----------
    /// * [`ParadeError::InvalidConfiguration`] if `dusk_offset` is not strictly positive.
    pub fn new(
        oracle: &'a O,
        observer: &'a Observer,
        timezone: Tz,
        dusk_offset: Duration,
        pad_days: u32,
    ) -> Result<Self, ParadeError> {
        if dusk_offset <= Duration::zero() {
            return Err(ParadeError::InvalidConfiguration(format!(
                "dusk offset must be strictly positive, got {} min",
                dusk_offset.num_minutes()
            )));
        }
        Ok(EventExtractor {
            oracle,
            observer,
            timezone,
            dusk_offset,
            pad_days,
        })
    }

    /// Local days of `range` with their four checkpoint instants.
    ///
    /// Errors
    /// ----------
    /// * Any oracle failure.
    /// * [`ParadeError::EmptyRangeResult`] if no complete day survives the trimming.
    pub fn extract(&self, range: &DateRange) -> Result<BTreeMap<NaiveDate, DayEvents>, ParadeError> {
        let window = range.padded(self.pad_days);
        let crossings = self.oracle.find_sunrise_sunset(&window, self.observer)?;

        let mut binned: BTreeMap<NaiveDate, PartialDay> = BTreeMap::new();
        for event in crossings {
            let local = to_local(&event.instant, &self.timezone);
            let day = binned.entry(local.date_naive()).or_default();
            if event.is_rise {
                day.sunrise = Some(local);
            } else {
                day.sunset = Some(local);
            }
        }

        binned.pop_first();
        binned.pop_last();
        binned.retain(|date, _| range.contains(*date));

        let mut days = BTreeMap::new();
        for (date, partial) in binned {
            match (partial.sunrise, partial.sunset) {
                (Some(sunrise), Some(sunset)) => {
                    days.insert(
                        date,
                        DayEvents {
                            sunrise,
                            sunset,
                            morning: sunrise - self.dusk_offset,
                            evening: sunset + self.dusk_offset,
                        },
                    );
                }
                (sunrise, sunset) => log::warn!(
                    "dropping {date}: missing {}",
                    match (sunrise, sunset) {
                        (None, None) => "sunrise and sunset",
                        (None, _) => "sunrise",
                        _ => "sunset",
                    }
                ),
            }
        }

        if days.is_empty() {
            return Err(ParadeError::EmptyRangeResult {
                start: range.start(),
                end: range.end(),
            });
        }
        log::debug!("{} local days extracted for {range}", days.len());
        Ok(days)
    }
}
