//! Dataset record parsing.
//!
//! The dataset is one fact per line:
//!
//! ```text
//! (flight 2025 08 09 JFK ATL 100 0900 1100)
//! ```
//!
//! with fields year, month, day, source, destination, cost, takeoff and
//! landing. Cost is a whole number of cents and is stored unscaled, so the
//! `100` above is a one-dollar fare. Lines that are not flight facts are
//! skipped; flight facts that are malformed are dropped. Neither is fatal
//! to a load.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::domain::{AirportCode, FlightFact, InvalidAirportCode};

/// Head symbol of a flight fact.
const FLIGHT_HEAD: &str = "flight";

/// Number of whitespace-separated fields in a flight fact, head included.
const FLIGHT_FIELDS: usize = 9;

/// Why a flight record was dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Record has the wrong number of fields
    #[error("expected 9 fields, found {0}")]
    FieldCount(usize),

    /// Cost is not a non-negative integer
    #[error("invalid cost {0:?}")]
    InvalidCost(String),

    /// Year, month and day don't form a calendar date
    #[error("invalid date {0}")]
    InvalidDate(String),

    /// Source or destination is not an airport code
    #[error(transparent)]
    InvalidAirport(#[from] InvalidAirportCode),
}

/// Counts from parsing a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Flight records turned into facts.
    pub accepted: usize,
    /// Flight records dropped as malformed.
    pub dropped: usize,
    /// Lines that were blank or not flight records.
    pub skipped: usize,
}

/// Parse one dataset line.
///
/// Returns `Ok(None)` for lines that are not flight facts (blank lines,
/// comments, other fact kinds). A leading `!` is tolerated.
pub fn parse_record(line: &str) -> Result<Option<FlightFact>, RecordError> {
    let line = line.trim();
    let line = line.strip_prefix('!').map(str::trim_start).unwrap_or(line);

    let Some(body) = line.strip_prefix('(') else {
        return Ok(None);
    };
    let body = body.strip_suffix(')').unwrap_or(body);

    let fields: Vec<&str> = body.split_whitespace().collect();
    if fields.first() != Some(&FLIGHT_HEAD) {
        return Ok(None);
    }
    if fields.len() != FLIGHT_FIELDS {
        return Err(RecordError::FieldCount(fields.len()));
    }

    let date = parse_date(fields[1], fields[2], fields[3])?;
    let source = AirportCode::parse_normalized(fields[4])?;
    let destination = AirportCode::parse_normalized(fields[5])?;
    let cost: u64 = fields[6]
        .parse()
        .map_err(|_| RecordError::InvalidCost(fields[6].to_string()))?;

    Ok(Some(FlightFact::new(
        date,
        source,
        destination,
        cost,
        fields[7],
        fields[8],
    )))
}

fn parse_date(year: &str, month: &str, day: &str) -> Result<NaiveDate, RecordError> {
    let invalid = || RecordError::InvalidDate(format!("{year}-{month}-{day}"));

    let y: i32 = year.parse().map_err(|_| invalid())?;
    let m: u32 = month.parse().map_err(|_| invalid())?;
    let d: u32 = day.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
}

/// Parse every line of a dataset, dropping malformed records.
pub fn parse_lines<I, S>(lines: I) -> (Vec<FlightFact>, LoadReport)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut facts = Vec::new();
    let mut report = LoadReport::default();

    for (idx, line) in lines.into_iter().enumerate() {
        match parse_record(line.as_ref()) {
            Ok(Some(fact)) => {
                facts.push(fact);
                report.accepted += 1;
            }
            Ok(None) => report.skipped += 1,
            Err(e) => {
                debug!(line = idx + 1, error = %e, "dropped flight record");
                report.dropped += 1;
            }
        }
    }

    (facts, report)
}
