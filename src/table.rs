//! # Per-day visibility records
//!
//! The [`VisibilityTable`] is the product of the extraction and sampling stages and the
//! unit stored in the cache. It maps each retained **local calendar date** to a
//! [`DayRecord`]:
//!
//! - the four checkpoint instants of the day ([`DayEvents`]),
//! - the altitude of every tracked body at every checkpoint,
//! - optionally, the local time of day at which each body rises and sets.
//!
//! Altitudes are addressed by `(body, checkpoint)`; there is no positional or
//! name-based column lookup.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::bodies::{Body, Checkpoint};
use crate::constants::Degree;

/// The four checkpoint instants of one local day, in local time.
///
/// `morning < sunrise` and `sunset < evening` hold for every value built by the
/// event extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEvents {
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    pub morning: DateTime<FixedOffset>,
    pub evening: DateTime<FixedOffset>,
}

impl DayEvents {
    pub fn instant(&self, checkpoint: Checkpoint) -> DateTime<FixedOffset> {
        match checkpoint {
            Checkpoint::Morning => self.morning,
            Checkpoint::Evening => self.evening,
            Checkpoint::Sunrise => self.sunrise,
            Checkpoint::Sunset => self.sunset,
        }
    }
}

/// Local times of day at which a body rises and sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiseSetTimes {
    pub rise: Option<NaiveTime>,
    pub set: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub events: DayEvents,
    altitudes: BTreeMap<Body, BTreeMap<Checkpoint, Degree>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    rise_set: BTreeMap<Body, RiseSetTimes>,
}

impl DayRecord {
    pub fn new(events: DayEvents) -> Self {
        DayRecord {
            events,
            altitudes: BTreeMap::new(),
            rise_set: BTreeMap::new(),
        }
    }

    pub fn altitude(&self, body: Body, checkpoint: Checkpoint) -> Option<Degree> {
        self.altitudes.get(&body)?.get(&checkpoint).copied()
    }

    pub fn set_altitude(&mut self, body: Body, checkpoint: Checkpoint, altitude: Degree) {
        self.altitudes
            .entry(body)
            .or_default()
            .insert(checkpoint, altitude);
    }

    pub fn rise_set(&self, body: Body) -> Option<&RiseSetTimes> {
        self.rise_set.get(&body)
    }

    pub fn set_rise(&mut self, body: Body, time: NaiveTime) {
        self.rise_set.entry(body).or_default().rise = Some(time);
    }

    pub fn set_set(&mut self, body: Body, time: NaiveTime) {
        self.rise_set.entry(body).or_default().set = Some(time);
    }
}

/// Ordered mapping `date → DayRecord`, plus the list of tracked bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityTable {
    bodies: Vec<Body>,
    days: BTreeMap<NaiveDate, DayRecord>,
}

impl VisibilityTable {
    pub fn new(bodies: Vec<Body>, days: BTreeMap<NaiveDate, DayRecord>) -> Self {
        VisibilityTable { bodies, days }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn days(&self) -> &BTreeMap<NaiveDate, DayRecord> {
        &self.days
    }

    pub(crate) fn days_mut(&mut self) -> &mut BTreeMap<NaiveDate, DayRecord> {
        &mut self.days
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&DayRecord> {
        self.days.get(date)
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.days.keys()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
