//! # Altitude sampling
//!
//! Fills a [`VisibilityTable`] from the extracted [`DayEvents`]: for every day, every
//! [`Checkpoint`] and every tracked [`Body`] the oracle is asked for the apparent
//! altitude at the checkpoint instant.
//!
//! Samples are independent, so days are distributed over rayon's thread pool; the
//! result is collected into an ordered map and does not depend on scheduling.
//! The first oracle failure aborts the whole stage.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use rayon::prelude::*;

use crate::bodies::{Body, Checkpoint};
use crate::ephemeris::{EphemerisOracle, TimeRange};
use crate::observers::Observer;
use crate::parade_errors::ParadeError;
use crate::progress::StageProgress;
use crate::table::{DayEvents, DayRecord, VisibilityTable};
use crate::time::to_local;

pub struct AltitudeSampler<'a, O: EphemerisOracle + ?Sized> {
    oracle: &'a O,
    observer: &'a Observer,
    bodies: &'a [Body],
}

impl<'a, O: EphemerisOracle + ?Sized> AltitudeSampler<'a, O> {
    pub fn new(oracle: &'a O, observer: &'a Observer, bodies: &'a [Body]) -> Self {
        AltitudeSampler {
            oracle,
            observer,
            bodies,
        }
    }

    fn sample_day(&self, events: DayEvents) -> Result<DayRecord, ParadeError> {
        let mut record = DayRecord::new(events);
        for checkpoint in Checkpoint::ALL {
            let instant = events.instant(checkpoint).with_timezone(&Utc);
            for &body in self.bodies {
                let altitude = self.oracle.apparent_altitude(&instant, self.observer, body)?;
                record.set_altitude(body, checkpoint, altitude);
            }
        }
        Ok(record)
    }

    /// Sample every checkpoint of every day.
    pub fn sample(
        &self,
        days: BTreeMap<NaiveDate, DayEvents>,
    ) -> Result<VisibilityTable, ParadeError> {
        let progress = StageProgress::new(days.len(), "altitudes");

        let records = days
            .into_par_iter()
            .map(|(date, events)| {
                let record = self.sample_day(events);
                progress.inc();
                record.map(|r| (date, r))
            })
            .collect::<Result<BTreeMap<_, _>, ParadeError>>()?;

        progress.finish();
        Ok(VisibilityTable::new(self.bodies.to_vec(), records))
    }

    /// Store the local rise and set time of day of every tracked body.
    ///
    /// Each body is searched once over `window` with
    /// [`EphemerisOracle::find_risings_and_settings`]. Instants falling on a date absent
    /// from the table are ignored; a second rise (or set) on the same date replaces
    /// the first.
    pub fn record_rise_set(
        &self,
        table: &mut VisibilityTable,
        window: &TimeRange,
        timezone: &Tz,
    ) -> Result<(), ParadeError> {
        let progress = StageProgress::new(self.bodies.len(), "rise/set");

        let found = self
            .bodies
            .par_iter()
            .map(|&body| {
                let (rises, sets) =
                    self.oracle.find_risings_and_settings(window, body, self.observer)?;
                progress.inc();
                Ok((body, rises, sets))
            })
            .collect::<Result<Vec<_>, ParadeError>>()?;

        let days = table.days_mut();
        for (body, rises, sets) in found {
            for instant in rises {
                let local = to_local(&instant, timezone);
                if let Some(record) = days.get_mut(&local.date_naive()) {
                    record.set_rise(body, local.time());
                }
            }
            for instant in sets {
                let local = to_local(&instant, timezone);
                if let Some(record) = days.get_mut(&local.date_naive()) {
                    record.set_set(body, local.time());
                }
            }
        }

        progress.finish();
        Ok(())
    }
}
