//! UTC calendar timestamps and conversion to ephemeris time.
//!
//! [`UtcTimestamp`] is the wall-clock input of the pipeline. It is turned
//! into ephemeris time (ET, TDB seconds past J2000) by a [`TimeConverter`],
//! which needs the leap seconds table of an LSK kernel.
use std::{fmt, str::FromStr};

use hifitime::{Duration, Epoch, TimeScale};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, digit1, space1},
    combinator::{all_consuming, map_res, opt},
    sequence::preceded,
    IResult, Parser,
};

use crate::{barytrack_errors::BaryTrackError, constants::EtSeconds};

/// Conversion from UTC calendar timestamps to ephemeris time.
pub trait TimeConverter {
    fn utc_to_et(&self, timestamp: &UtcTimestamp) -> Result<EtSeconds, BaryTrackError>;
}

/// Calendar date and time of day in UTC, to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcTimestamp {
    pub(crate) year: i32,
    pub(crate) month: u8,
    pub(crate) day: u8,
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
}

impl UtcTimestamp {
    /// Build a timestamp, rejecting impossible calendar dates and times.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, BaryTrackError> {
        Epoch::maybe_from_gregorian(year, month, day, hour, minute, second, 0, TimeScale::TAI)
            .map_err(|e| {
                BaryTrackError::InvalidTimestamp(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} ({e})"
                ))
            })?;

        Ok(UtcTimestamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Midnight of the given calendar day.
    pub fn from_date(year: i32, month: u8, day: u8) -> Result<Self, BaryTrackError> {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Current UTC time from the system clock, truncated to the second.
    pub fn now() -> Result<Self, BaryTrackError> {
        let now = Epoch::now().map_err(|e| BaryTrackError::InvalidTimestamp(e.to_string()))?;
        let (year, month, day, hour, minute, second, _) = now.to_gregorian_utc();
        Self::new(year, month, day, hour, minute, second.min(59))
    }

    pub fn at_midnight(&self) -> Self {
        UtcTimestamp {
            hour: 0,
            minute: 0,
            second: 0,
            ..*self
        }
    }

    /// Shift by a number of calendar days, keeping the time of day.
    pub fn add_days(&self, days: f64) -> Result<Self, BaryTrackError> {
        let shifted = self.to_uniform_epoch() + Duration::from_days(days);
        let (year, month, day, hour, minute, second, _) = shifted.to_gregorian_tai();
        Self::new(year, month, day, hour, minute, second)
    }

    /// Calendar fields read on a uniform scale (no leap seconds).
    pub(crate) fn to_uniform_epoch(self) -> Epoch {
        Epoch::from_gregorian(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            0,
            TimeScale::TAI,
        )
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn date(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }

    pub fn time_of_day(&self) -> (u8, u8, u8) {
        (self.hour, self.minute, self.second)
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for UtcTimestamp {
    type Err = BaryTrackError;

    /// Parse `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, ((year, month, day), time)) = all_consuming(timestamp)
            .parse(s.trim())
            .map_err(|_| BaryTrackError::InvalidTimestamp(s.to_string()))?;
        let (hour, minute, second) = time.unwrap_or_default();

        Self::new(year, month, day, hour, minute, second)
    }
}

/// One or two digit calendar field.
fn field(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(1, 2, |c: char| c.is_ascii_digit()),
        u8::from_str,
    )
    .parse(input)
}

fn calendar_date(input: &str) -> IResult<&str, (i32, u8, u8)> {
    let (input, year) = map_res(digit1, i32::from_str).parse(input)?;
    let (input, month) = preceded(char('-'), field).parse(input)?;
    let (input, day) = preceded(char('-'), field).parse(input)?;
    Ok((input, (year, month, day)))
}

fn time_of_day(input: &str) -> IResult<&str, (u8, u8, u8)> {
    let (input, hour) = field(input)?;
    let (input, minute) = preceded(char(':'), field).parse(input)?;
    let (input, second) = preceded(char(':'), field).parse(input)?;
    Ok((input, (hour, minute, second)))
}

type Fields = ((i32, u8, u8), Option<(u8, u8, u8)>);

fn timestamp(input: &str) -> IResult<&str, Fields> {
    (
        calendar_date,
        opt(preceded(alt((tag("T"), space1)), time_of_day)),
    )
        .parse(input)
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let ts: UtcTimestamp = "2000-01-01 00:00:00".parse().unwrap();
        assert_eq!(ts, UtcTimestamp::new(2000, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(ts.to_string(), "2000-01-01 00:00:00");

        let iso: UtcTimestamp = "2021-06-30T23:59:58".parse().unwrap();
        assert_eq!(iso.to_string(), "2021-06-30 23:59:58");

        let spaced: UtcTimestamp = "  1999-7-4  6:05:09 ".parse().unwrap();
        assert_eq!(spaced, UtcTimestamp::new(1999, 7, 4, 6, 5, 9).unwrap());

        let date_only: UtcTimestamp = "2024-02-29".parse().unwrap();
        assert_eq!(date_only.to_string(), "2024-02-29 00:00:00");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for bad in [
            "",
            "2000-01",
            "2000-13-01",
            "2023-02-29",
            "2000-01-01 24:00:00",
            "2000-01-01 12:00",
            "2000/01/01",
            "abcd-01-01",
            "2000-01-01x00:00:00",
            "2000-001-01",
            "2000-01-01 00:00:00 UTC",
        ] {
            assert!(
                matches!(
                    bad.parse::<UtcTimestamp>(),
                    Err(BaryTrackError::InvalidTimestamp(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_at_midnight() {
        let ts = UtcTimestamp::new(2024, 3, 15, 17, 42, 9).unwrap();
        assert_eq!(ts.at_midnight(), UtcTimestamp::from_date(2024, 3, 15).unwrap());
        assert_eq!(ts.time_of_day(), (17, 42, 9));
    }

    #[test]
    fn test_add_days() {
        let start = UtcTimestamp::from_date(2000, 1, 1).unwrap();
        // 10000 days after 2000-01-01
        assert_eq!(
            start.add_days(10_000.0).unwrap(),
            UtcTimestamp::from_date(2027, 5, 19).unwrap()
        );

        let ts = UtcTimestamp::new(2016, 12, 31, 12, 30, 0).unwrap();
        assert_eq!(
            ts.add_days(1.0).unwrap(),
            UtcTimestamp::new(2017, 1, 1, 12, 30, 0).unwrap()
        );
        assert_eq!(
            ts.add_days(-366.0).unwrap(),
            UtcTimestamp::new(2015, 12, 31, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_ordering_follows_calendar() {
        let a = UtcTimestamp::new(1999, 12, 31, 23, 59, 59).unwrap();
        let b = UtcTimestamp::from_date(2000, 1, 1).unwrap();
        assert!(a < b);
        assert_eq!(b.date(), (2000, 1, 1));
    }

    #[test]
    fn test_now_is_valid() {
        let now = UtcTimestamp::now().unwrap();
        assert!(now.year() >= 2024);
        assert_eq!(now, now.to_string().parse().unwrap());
    }
}
