use chrono::NaiveDate;
use thiserror::Error;

use crate::bodies::{Body, Checkpoint};

#[derive(Error, Debug)]
pub enum ParadeError {
    #[error("Ephemeris oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("No usable day between {start} and {end} once the boundary days are trimmed")]
    EmptyRangeResult { start: NaiveDate, end: NaiveDate },

    #[error("Altitude of {body} at {checkpoint} is missing for {date}")]
    ColumnMismatch {
        date: NaiveDate,
        body: Body,
        checkpoint: Checkpoint,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Unknown visibility column: {0}")]
    UnknownColumn(String),

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unable to (de)serialize the visibility table: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),
}

impl PartialEq for ParadeError {
    fn eq(&self, other: &Self) -> bool {
        use ParadeError::*;
        match (self, other) {
            (OracleUnavailable(a), OracleUnavailable(b)) => a == b,
            (
                EmptyRangeResult { start: s1, end: e1 },
                EmptyRangeResult { start: s2, end: e2 },
            ) => s1 == s2 && e1 == e2,
            (
                ColumnMismatch {
                    date: d1,
                    body: b1,
                    checkpoint: c1,
                },
                ColumnMismatch {
                    date: d2,
                    body: b2,
                    checkpoint: c2,
                },
            ) => d1 == d2 && b1 == b2 && c1 == c2,
            (InvalidConfiguration(a), InvalidConfiguration(b)) => a == b,
            (UnknownTimeZone(a), UnknownTimeZone(b)) => a == b,
            (UnknownColumn(a), UnknownColumn(b)) => a == b,
            (RootFindingError(a), RootFindingError(b)) => a == b,
            (Utf8PathError(a), Utf8PathError(b)) => a == b,

            // Not comparable: equal when the variant matches
            (IoError(_), IoError(_)) => true,
            (SerializationError(_), SerializationError(_)) => true,

            _ => false,
        }
    }
}
