//! # Threshold aggregation
//!
//! Collapses the per-body altitudes of a [`VisibilityTable`] into per-group counts.
//!
//! For every day, every [`Checkpoint`] and every [`BodyGroup`] two counts are produced:
//!
//! | kind             | counted bodies                        |
//! |------------------|---------------------------------------|
//! | `above_horizon`  | altitude **strictly** greater than 0° |
//! | `above_treeline` | altitude strictly greater than the treeline angle |
//!
//! Groups are restricted to the bodies actually tracked by the table, so with the
//! default body list `all = visible + telescopic + moon` holds for every cell.
//!
//! Column names follow the `{group}_{checkpoint}_{kind}` pattern, e.g.
//! `visible_evening_above_horizon`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bodies::{Body, BodyGroup, Checkpoint};
use crate::constants::Degree;
use crate::parade_errors::ParadeError;
use crate::table::VisibilityTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThresholdKind {
    AboveHorizon,
    AboveTreeline,
}

impl ThresholdKind {
    pub const ALL: [ThresholdKind; 2] = [ThresholdKind::AboveHorizon, ThresholdKind::AboveTreeline];

    pub fn name(&self) -> &'static str {
        match self {
            ThresholdKind::AboveHorizon => "above_horizon",
            ThresholdKind::AboveTreeline => "above_treeline",
        }
    }
}

/// One column of the consolidated table.
///
/// Ordering is checkpoint first, then group, then kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisibilityColumn {
    pub checkpoint: Checkpoint,
    pub group: BodyGroup,
    pub kind: ThresholdKind,
}

impl VisibilityColumn {
    pub fn new(group: BodyGroup, checkpoint: Checkpoint, kind: ThresholdKind) -> Self {
        VisibilityColumn {
            checkpoint,
            group,
            kind,
        }
    }

    /// Every column, sorted.
    pub fn all() -> Vec<VisibilityColumn> {
        let mut columns: Vec<_> = Checkpoint::ALL
            .into_iter()
            .flat_map(|checkpoint| {
                BodyGroup::ALL.into_iter().flat_map(move |group| {
                    ThresholdKind::ALL
                        .into_iter()
                        .map(move |kind| VisibilityColumn::new(group, checkpoint, kind))
                })
            })
            .collect();
        columns.sort();
        columns
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VisibilityColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.group, self.checkpoint, self.kind.name())
    }
}

impl FromStr for VisibilityColumn {
    type Err = ParadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ParadeError::UnknownColumn(s.to_string());
        let mut parts = s.trim().splitn(3, '_');
        let (Some(group), Some(checkpoint), Some(kind)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(unknown());
        };

        let group = BodyGroup::ALL
            .into_iter()
            .find(|g| g.name() == group)
            .ok_or_else(unknown)?;
        let checkpoint = Checkpoint::ALL
            .into_iter()
            .find(|c| c.name() == checkpoint)
            .ok_or_else(unknown)?;
        let kind = ThresholdKind::ALL
            .into_iter()
            .find(|k| k.name() == kind)
            .ok_or_else(unknown)?;

        Ok(VisibilityColumn::new(group, checkpoint, kind))
    }
}

/// One row of counts per date, one count per [`VisibilityColumn`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedTable {
    columns: Vec<VisibilityColumn>,
    rows: BTreeMap<NaiveDate, Vec<u8>>,
}

impl ConsolidatedTable {
    pub fn columns(&self) -> &[VisibilityColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &BTreeMap<NaiveDate, Vec<u8>> {
        &self.rows
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.rows.keys()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn index_of(&self, column: &VisibilityColumn) -> Option<usize> {
        self.columns.binary_search(column).ok()
    }

    pub fn get(&self, date: &NaiveDate, column: &VisibilityColumn) -> Option<u8> {
        let idx = self.index_of(column)?;
        self.rows.get(date).map(|row| row[idx])
    }

    /// Named counts of one date, in column order.
    pub fn row(&self, date: &NaiveDate) -> Option<Vec<(VisibilityColumn, u8)>> {
        let row = self.rows.get(date)?;
        Some(self.columns.iter().copied().zip(row.iter().copied()).collect())
    }

    /// Dates whose `column` count is at least `min_count`, in order.
    pub fn dates_where(&self, column: &VisibilityColumn, min_count: u8) -> Vec<NaiveDate> {
        let Some(idx) = self.index_of(column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter(|(_, row)| row[idx] >= min_count)
            .map(|(date, _)| *date)
            .collect()
    }
}

/// Counts bodies above the horizon and above the treeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregator {
    treeline: Degree,
}

impl Aggregator {
    pub fn new(treeline: Degree) -> Self {
        Aggregator { treeline }
    }

    pub fn treeline(&self) -> Degree {
        self.treeline
    }

    /// Build the consolidated table.
    ///
    /// Errors
    /// ----------
    /// * [`ParadeError::ColumnMismatch`] if a tracked body lacks an altitude at some
    ///   checkpoint of some day. No partial table is returned.
    pub fn aggregate(&self, table: &VisibilityTable) -> Result<ConsolidatedTable, ParadeError> {
        let columns = VisibilityColumn::all();
        let tracked: Vec<Body> = table.bodies().to_vec();

        let mut rows = BTreeMap::new();
        for (date, record) in table.days() {
            let mut row = vec![0u8; columns.len()];

            for checkpoint in Checkpoint::ALL {
                let mut altitudes = Vec::with_capacity(tracked.len());
                for &body in &tracked {
                    let altitude = record.altitude(body, checkpoint).ok_or(
                        ParadeError::ColumnMismatch {
                            date: *date,
                            body,
                            checkpoint,
                        },
                    )?;
                    altitudes.push((body, altitude));
                }

                for (idx, column) in columns.iter().enumerate() {
                    if column.checkpoint != checkpoint {
                        continue;
                    }
                    let threshold = match column.kind {
                        ThresholdKind::AboveHorizon => 0.0,
                        ThresholdKind::AboveTreeline => self.treeline,
                    };
                    row[idx] = altitudes
                        .iter()
                        .filter(|(body, alt)| column.group.contains(*body) && *alt > threshold)
                        .count() as u8;
                }
            }

            rows.insert(*date, row);
        }

        log::debug!("aggregated {} days over {} columns", rows.len(), columns.len());
        Ok(ConsolidatedTable { columns, rows })
    }
}

#[cfg(test)]
mod aggregation_test {
    use super::*;
    use crate::table::{DayEvents, DayRecord};
    use crate::unit_test_global::{date, local_utc};
    use chrono::FixedOffset;

    fn events(day: NaiveDate) -> DayEvents {
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let at = |h, m| local_utc(day, h, m).with_timezone(&est);
        DayEvents {
            sunrise: at(7, 12),
            sunset: at(17, 45),
            morning: at(6, 42),
            evening: at(18, 15),
        }
    }

    /// Same altitude at every checkpoint for each body.
    fn table_with(bodies: &[Body], altitudes: &[Degree]) -> VisibilityTable {
        let day = date(2021, 1, 2);
        let mut record = DayRecord::new(events(day));
        for (&body, &alt) in bodies.iter().zip(altitudes) {
            for checkpoint in Checkpoint::ALL {
                record.set_altitude(body, checkpoint, alt);
            }
        }
        VisibilityTable::new(bodies.to_vec(), BTreeMap::from([(day, record)]))
    }

    fn count(table: &ConsolidatedTable, name: &str) -> u8 {
        table
            .get(&date(2021, 1, 2), &name.parse().unwrap())
            .unwrap()
    }

    #[test]
    fn test_counts_per_group() {
        // Mercury..Saturn, Uranus, Neptune, Moon
        let alts = [5.0, 15.0, -3.0, 30.0, 0.0, 12.0, -1.0, 45.0];
        let table = Aggregator::new(10.0)
            .aggregate(&table_with(&Body::ALL, &alts))
            .unwrap();

        assert_eq!(count(&table, "visible_evening_above_horizon"), 3);
        assert_eq!(count(&table, "visible_evening_above_treeline"), 2);
        assert_eq!(count(&table, "telescopic_morning_above_horizon"), 1);
        assert_eq!(count(&table, "moon_sunset_above_treeline"), 1);
        assert_eq!(count(&table, "all_sunrise_above_horizon"), 5);
        assert_eq!(count(&table, "all_sunrise_above_treeline"), 4);
    }

    #[test]
    fn test_zero_altitude_is_not_counted() {
        let table = Aggregator::new(0.0)
            .aggregate(&table_with(&[Body::Venus], &[0.0]))
            .unwrap();
        assert_eq!(count(&table, "visible_morning_above_horizon"), 0);
        assert_eq!(count(&table, "all_morning_above_horizon"), 0);
    }

    #[test]
    fn test_treeline_boundary_is_strict() {
        let table = Aggregator::new(10.0)
            .aggregate(&table_with(&[Body::Mars], &[10.0]))
            .unwrap();
        assert_eq!(count(&table, "visible_sunset_above_horizon"), 1);
        assert_eq!(count(&table, "visible_sunset_above_treeline"), 0);
    }

    #[test]
    fn test_groups_restricted_to_tracked_bodies() {
        let table = Aggregator::new(10.0)
            .aggregate(&table_with(&[Body::Jupiter, Body::Moon], &[20.0, 20.0]))
            .unwrap();
        assert_eq!(count(&table, "visible_evening_above_treeline"), 1);
        assert_eq!(count(&table, "telescopic_evening_above_horizon"), 0);
        assert_eq!(count(&table, "all_evening_above_horizon"), 2);
    }

    #[test]
    fn test_missing_altitude_is_a_mismatch() {
        let day = date(2021, 1, 2);
        let mut record = DayRecord::new(events(day));
        for checkpoint in Checkpoint::ALL {
            record.set_altitude(Body::Venus, checkpoint, 5.0);
        }
        record.set_altitude(Body::Mars, Checkpoint::Morning, 5.0);
        let table = VisibilityTable::new(vec![Body::Venus, Body::Mars], BTreeMap::from([(day, record)]));

        assert_eq!(
            Aggregator::new(10.0).aggregate(&table),
            Err(ParadeError::ColumnMismatch {
                date: day,
                body: Body::Mars,
                checkpoint: Checkpoint::Evening
            })
        );
    }

    #[test]
    fn test_dates_where() {
        let alts = [5.0, 15.0, 3.0, 30.0, 1.0, 12.0, -1.0, 45.0];
        let table = Aggregator::new(10.0)
            .aggregate(&table_with(&Body::ALL, &alts))
            .unwrap();
        let column = "visible_evening_above_horizon".parse().unwrap();
        assert_eq!(table.dates_where(&column, 5), vec![date(2021, 1, 2)]);
        assert!(table.dates_where(&column, 6).is_empty());
    }

    #[test]
    fn test_column_names_round_trip() {
        let columns = VisibilityColumn::all();
        assert_eq!(columns.len(), 32);
        for column in &columns {
            assert_eq!(column.name().parse::<VisibilityColumn>().unwrap(), *column);
        }
        let col: VisibilityColumn = "visible_evening_above_horizon".parse().unwrap();
        assert_eq!(
            col,
            VisibilityColumn::new(
                BodyGroup::Visible,
                Checkpoint::Evening,
                ThresholdKind::AboveHorizon
            )
        );
        assert_eq!(col.to_string(), "visible_evening_above_horizon");
    }

    #[test]
    fn test_unknown_columns() {
        for bad in ["", "visible", "visible_noon_above_horizon", "planets_evening_above_horizon", "all_sunset_below"] {
            assert_eq!(
                bad.parse::<VisibilityColumn>(),
                Err(ParadeError::UnknownColumn(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_columns_sorted_by_checkpoint_first() {
        let columns = VisibilityColumn::all();
        assert_eq!(columns[0].checkpoint, Checkpoint::Morning);
        assert_eq!(columns[31].checkpoint, Checkpoint::Sunset);
        assert!(columns.windows(2).all(|w| w[0] < w[1]));
    }
}
