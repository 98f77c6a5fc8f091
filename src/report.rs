//! # Report
//!
//! Read-only selection over a [`ConsolidatedTable`] and its rendering.
//!
//! * [`ReportFilter`] keeps the dates whose count in one column reaches a minimum.
//! * [`contiguous_ranges`] groups sorted dates into runs of consecutive days.
//! * [`ParadeReport`] is a `Display` adaptor printing the selection as a
//!   [`comfy-table`](https://docs.rs/comfy-table/latest/comfy_table/) table: the date,
//!   the four local checkpoint times, and every count of the filter's checkpoint.

use std::fmt;

use chrono::{Duration, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::aggregation::{ConsolidatedTable, VisibilityColumn};
use crate::bodies::Checkpoint;
use crate::table::VisibilityTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFilter {
    pub column: VisibilityColumn,
    pub min_count: u8,
}

impl ReportFilter {
    pub fn new(column: VisibilityColumn, min_count: u8) -> Self {
        ReportFilter { column, min_count }
    }

    pub fn select(&self, table: &ConsolidatedTable) -> Vec<NaiveDate> {
        table.dates_where(&self.column, self.min_count)
    }
}

/// Group dates into inclusive `(first, last)` runs of consecutive days.
///
/// The input is sorted first; a gap of more than one day starts a new run.
pub fn contiguous_ranges(dates: &[NaiveDate]) -> Vec<(NaiveDate, NaiveDate)> {
    let mut sorted = dates.to_vec();
    sorted.sort();
    sorted.dedup();

    let mut ranges: Vec<(NaiveDate, NaiveDate)> = Vec::new();
    for date in sorted {
        match ranges.last_mut() {
            Some((_, last)) if date - *last <= Duration::days(1) => *last = date,
            _ => ranges.push((date, date)),
        }
    }
    ranges
}

/// Display adaptor for the selected days.
pub struct ParadeReport<'a> {
    visibility: &'a VisibilityTable,
    consolidated: &'a ConsolidatedTable,
    filter: ReportFilter,
    ranges: bool,
}

impl<'a> ParadeReport<'a> {
    pub fn new(
        visibility: &'a VisibilityTable,
        consolidated: &'a ConsolidatedTable,
        filter: ReportFilter,
    ) -> Self {
        ParadeReport {
            visibility,
            consolidated,
            filter,
            ranges: false,
        }
    }

    /// Also print the selected dates as contiguous ranges.
    pub fn with_ranges(mut self, ranges: bool) -> Self {
        self.ranges = ranges;
        self
    }

    fn table(&self, dates: &[NaiveDate]) -> Table {
        let checkpoint = self.filter.column.checkpoint;
        let columns: Vec<VisibilityColumn> = self
            .consolidated
            .columns()
            .iter()
            .copied()
            .filter(|c| c.checkpoint == checkpoint)
            .collect();

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Disabled);

        let mut header = vec![Cell::new("Date")];
        header.extend(Checkpoint::ALL.iter().map(|c| Cell::new(c.name())));
        header.extend(columns.iter().map(|c| Cell::new(c.name())));
        table.set_header(header);

        for date in dates {
            let mut cells = vec![Cell::new(date)];
            match self.visibility.get(date) {
                Some(record) => cells.extend(Checkpoint::ALL.iter().map(|&c| {
                    Cell::new(record.events.instant(c).format("%H:%M"))
                        .set_alignment(CellAlignment::Right)
                })),
                None => cells.extend(Checkpoint::ALL.iter().map(|_| Cell::new("-"))),
            }
            cells.extend(columns.iter().map(|column| {
                let count = self
                    .consolidated
                    .get(date, column)
                    .map_or_else(|| "-".to_string(), |n| n.to_string());
                Cell::new(count).set_alignment(CellAlignment::Right)
            }));
            table.add_row(Row::from(cells));
        }
        table
    }
}

impl fmt::Display for ParadeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dates = self.filter.select(self.consolidated);
        writeln!(
            f,
            "{} day(s) with {} >= {}",
            dates.len(),
            self.filter.column,
            self.filter.min_count
        )?;
        if dates.is_empty() {
            return Ok(());
        }
        writeln!(f, "{}", self.table(&dates))?;

        if self.ranges {
            writeln!(f, "Contiguous ranges:")?;
            for (first, last) in contiguous_ranges(&dates) {
                if first == last {
                    writeln!(f, "  {first}")?;
                } else {
                    writeln!(f, "  {first} .. {last} ({} days)", (last - first).num_days() + 1)?;
                }
            }
        }
        Ok(())
    }
}
