//! Clock time handling for flight schedules.
//!
//! Schedules carry takeoff and landing as compact 24-hour "HHMM" strings,
//! with leading zeros sometimes dropped ("930" is "0930"). Two entry points
//! exist: [`ClockTime::parse_strict`] validates a time of day, while
//! [`parse_clock`] and [`flight_duration`] do plain pad-and-split
//! arithmetic on any digit string ("2400" is 1440 minutes) and degrade to
//! fixed values on non-digits. A single bad record must not break a search.

use std::fmt;

use tracing::trace;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Duration assumed for a flight whose times cannot be interpreted.
pub const DEFAULT_DURATION_MINS: u32 = 240;

/// Error returned when parsing an invalid clock string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid clock time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day, stored as minutes since midnight (0..1440).
///
/// # Examples
///
/// ```
/// use flight_server::domain::ClockTime;
///
/// let t = ClockTime::parse_strict("0930").unwrap();
/// assert_eq!(t.minutes(), 570);
///
/// // Missing leading zeros are padded
/// assert_eq!(ClockTime::parse_strict("930").unwrap(), t);
///
/// assert!(ClockTime::parse_strict("2460").is_err());
/// assert!(ClockTime::parse_strict("ab12").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Create a clock time from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self((hour * 60 + minute) as u16))
    }

    /// Parse an "HHMM" clock string, left-padding to four digits.
    pub fn parse_strict(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeError::new("empty clock string"));
        }
        if s.len() > 4 {
            return Err(TimeError::new("expected at most 4 digits"));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::new("expected digits only"));
        }

        let padded = format!("{s:0>4}");
        let hour: u32 = padded[..2]
            .parse()
            .map_err(|_| TimeError::new("invalid hour digits"))?;
        let minute: u32 = padded[2..]
            .parse()
            .map_err(|_| TimeError::new("invalid minute digits"))?;

        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        self.0 as u32
    }

    /// Returns the hour (0-23).
    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    /// Returns the minute (0-59).
    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour(), self.minute())
    }
}

/// Pad-and-split arithmetic on a digit string.
///
/// The string is left-padded to four digits; the first two are hours and
/// the rest minutes, with no range check ("2400" is 1440, "0975" is 615).
/// `None` for empty input, non-digits, or values too large for `u32`.
fn clock_arithmetic(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let padded = format!("{s:0>4}");
    let hours: u32 = padded[..2].parse().ok()?;
    let minutes: u32 = padded[2..].parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Minutes since midnight for an "HHMM" string; 0 when not a digit string
/// or too large to represent.
///
/// Hours and minutes are not range checked, so "2400" is 1440. Use
/// [`ClockTime::parse_strict`] to validate a time of day.
pub fn parse_clock(s: &str) -> u32 {
    clock_arithmetic(s).unwrap_or_else(|| {
        trace!(input = s, "clock fell back to 0");
        0
    })
}

/// Flight duration in minutes between takeoff and landing clocks.
///
/// A landing earlier than takeoff is taken to be on the next day. Empty or
/// non-numeric clocks, and any result outside `0..=1440`, yield
/// [`DEFAULT_DURATION_MINS`]. Total: never panics, always in `0..=1440`.
///
/// # Examples
///
/// ```
/// use flight_server::domain::{flight_duration, DEFAULT_DURATION_MINS};
///
/// assert_eq!(flight_duration("0900", "1100"), 120);
/// assert_eq!(flight_duration("2300", "0100"), 120);
/// assert_eq!(flight_duration("2200", "2400"), 120);
/// assert_eq!(flight_duration("", "1100"), DEFAULT_DURATION_MINS);
/// ```
pub fn flight_duration(takeoff: &str, landing: &str) -> u32 {
    let (Some(takeoff_mins), Some(landing_mins)) =
        (clock_arithmetic(takeoff), clock_arithmetic(landing))
    else {
        trace!(takeoff, landing, "duration fell back to default");
        return DEFAULT_DURATION_MINS;
    };

    let mut duration = landing_mins as i64 - takeoff_mins as i64;
    if duration < 0 {
        duration += MINUTES_PER_DAY as i64;
    }

    if !(0..=MINUTES_PER_DAY as i64).contains(&duration) {
        trace!(takeoff, landing, duration, "duration out of range");
        return DEFAULT_DURATION_MINS;
    }

    duration as u32
}

/// Ground time between a landing and a later takeoff, in minutes.
///
/// Both arguments are minutes since midnight, as from [`parse_clock`]. A
/// takeoff earlier than the landing is on the next day. A gap still
/// negative after that (landing clocks past "4800") counts as zero.
pub fn layover_minutes(landing: u32, takeoff: u32) -> u32 {
    let mut gap = takeoff as i64 - landing as i64;
    if gap < 0 {
        gap += MINUTES_PER_DAY as i64;
    }
    u32::try_from(gap.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_clocks() {
        let t = ClockTime::parse_strict("0000").unwrap();
        assert_eq!(t.minutes(), 0);

        let t = ClockTime::parse_strict("2359").unwrap();
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);

        let t = ClockTime::parse_strict("1430").unwrap();
        assert_eq!(t.minutes(), 14 * 60 + 30);
    }

    #[test]
    fn parse_pads_short_clocks() {
        assert_eq!(ClockTime::parse_strict("930").unwrap().minutes(), 570);
        assert_eq!(ClockTime::parse_strict("45").unwrap().minutes(), 45);
        assert_eq!(ClockTime::parse_strict("5").unwrap().minutes(), 5);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(ClockTime::parse_strict("").is_err());
        assert!(ClockTime::parse_strict("   ").is_err());
        assert!(ClockTime::parse_strict("12:30").is_err());
        assert!(ClockTime::parse_strict("12345").is_err());
        assert!(ClockTime::parse_strict("2400").is_err());
        assert!(ClockTime::parse_strict("1260").is_err());
        assert!(ClockTime::parse_strict("-100").is_err());
        assert!(ClockTime::parse_strict("noon").is_err());
    }

    #[test]
    fn parse_clock_falls_back_to_zero() {
        assert_eq!(parse_clock("1230"), 750);
        assert_eq!(parse_clock("930"), 570);
        assert_eq!(parse_clock("xx"), 0);
        assert_eq!(parse_clock("12:30"), 0);
        assert_eq!(parse_clock(""), 0);
    }

    #[test]
    fn parse_clock_does_not_range_check() {
        assert_eq!(parse_clock("2400"), 1440);
        assert_eq!(parse_clock("0975"), 9 * 60 + 75);
        assert_eq!(parse_clock("12345"), 12 * 60 + 345);
        assert_eq!(parse_clock("99999999999999"), 0);
    }

    #[test]
    fn display_is_four_digits() {
        let t = ClockTime::from_hm(7, 5).unwrap();
        assert_eq!(t.to_string(), "0705");
        assert_eq!(format!("{:?}", t), "ClockTime(0705)");
    }

    #[test]
    fn from_hm_bounds() {
        assert!(ClockTime::from_hm(23, 59).is_some());
        assert!(ClockTime::from_hm(24, 0).is_none());
        assert!(ClockTime::from_hm(0, 60).is_none());
    }

    #[test]
    fn same_day_duration() {
        assert_eq!(flight_duration("0900", "1100"), 120);
        assert_eq!(flight_duration("1230", "1500"), 150);
        assert_eq!(flight_duration("1200", "1200"), 0);
    }

    #[test]
    fn overnight_duration_wraps() {
        assert_eq!(flight_duration("2330", "0115"), 105);
        assert_eq!(flight_duration("0001", "0000"), 1439);
    }

    #[test]
    fn malformed_duration_uses_default() {
        assert_eq!(flight_duration("", ""), DEFAULT_DURATION_MINS);
        assert_eq!(flight_duration("0900", ""), DEFAULT_DURATION_MINS);
        assert_eq!(flight_duration("abcd", "1100"), DEFAULT_DURATION_MINS);
        assert_eq!(flight_duration("0900", "9999"), DEFAULT_DURATION_MINS);
    }

    #[test]
    fn out_of_range_clocks_use_arithmetic() {
        assert_eq!(flight_duration("2200", "2400"), 120);
        assert_eq!(flight_duration("2400", "0100"), 60);
        assert_eq!(flight_duration("0900", "0975"), 75);
        assert_eq!(flight_duration("0000", "2400"), 1440);
    }

    #[test]
    fn layover_same_day() {
        assert_eq!(layover_minutes(parse_clock("1100"), parse_clock("1230")), 90);
    }

    #[test]
    fn layover_overnight() {
        assert_eq!(layover_minutes(parse_clock("2300"), parse_clock("0130")), 150);
        assert_eq!(layover_minutes(parse_clock("2400"), parse_clock("0130")), 90);
    }

    #[test]
    fn layover_equal_clocks_is_zero() {
        assert_eq!(layover_minutes(480, 480), 0);
    }

    #[test]
    fn layover_from_far_future_landing_is_zero() {
        assert_eq!(layover_minutes(parse_clock("9999"), 0), 0);
    }
}
