//! Leap seconds table read from an LSK kernel.
//!
//! The `DELTET/DELTA_AT` variable lists `(ΔAT, @date)` pairs: from `date`
//! onwards, `TAI - UTC = ΔAT` seconds. A UTC timestamp is converted to ET as
//!
//! ```text
//! TAI = UTC + ΔAT(UTC)
//! ET  = TAI + 32.184 s + periodic TDB terms      (hifitime)
//! ```
use std::str::FromStr;

use hifitime::Duration;
use log::warn;
use nom::{
    branch::alt,
    character::complete::{alpha1, char, digit1},
    combinator::{all_consuming, map_opt, map_res},
    sequence::preceded,
    IResult, Parser,
};

use crate::{
    barytrack_errors::BaryTrackError,
    constants::EtSeconds,
    time::{TimeConverter, UtcTimestamp},
};

use super::text_kernel::{KernelPool, KernelValue};

pub const DELTA_AT_VARIABLE: &str = "DELTET/DELTA_AT";

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeapSecondEntry {
    /// First UTC day on which `delta_at` applies.
    pub effective: (i32, u8, u8),
    /// TAI - UTC in seconds.
    pub delta_at: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeapSecondTable {
    entries: Vec<LeapSecondEntry>,
}

impl LeapSecondTable {
    /// Build the table from the `DELTET/DELTA_AT` variable of a kernel pool.
    pub fn from_pool(pool: &KernelPool) -> Result<Self, BaryTrackError> {
        let values = pool.get(DELTA_AT_VARIABLE).ok_or_else(|| {
            BaryTrackError::InvalidLeapSecondTable(format!("{DELTA_AT_VARIABLE} is not defined"))
        })?;
        Self::from_values(values)
    }

    pub fn from_values(values: &[KernelValue]) -> Result<Self, BaryTrackError> {
        if values.is_empty() || values.len() % 2 != 0 {
            return Err(BaryTrackError::InvalidLeapSecondTable(format!(
                "expected (ΔAT, @date) pairs, found {} values",
                values.len()
            )));
        }

        let entries = values
            .chunks_exact(2)
            .map(|pair| match pair {
                [KernelValue::Number(delta_at), KernelValue::Date(date)] => Ok(LeapSecondEntry {
                    effective: parse_lsk_date(date)?,
                    delta_at: *delta_at,
                }),
                other => Err(BaryTrackError::InvalidLeapSecondTable(format!(
                    "malformed pair {other:?}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if entries
            .windows(2)
            .any(|pair| pair[1].effective <= pair[0].effective)
        {
            return Err(BaryTrackError::InvalidLeapSecondTable(
                "dates are not strictly increasing".into(),
            ));
        }

        Ok(LeapSecondTable { entries })
    }

    pub fn entries(&self) -> &[LeapSecondEntry] {
        &self.entries
    }

    /// TAI - UTC at `timestamp`.
    ///
    /// Timestamps before the first entry use the first value.
    pub fn delta_at(&self, timestamp: &UtcTimestamp) -> f64 {
        let date = timestamp.date();
        match self
            .entries
            .iter()
            .rev()
            .find(|entry| entry.effective <= date)
        {
            Some(entry) => entry.delta_at,
            None => {
                warn!("{timestamp} precedes the leap seconds table, using its first ΔAT value");
                self.entries[0].delta_at
            }
        }
    }
}

impl TimeConverter for LeapSecondTable {
    fn utc_to_et(&self, timestamp: &UtcTimestamp) -> Result<EtSeconds, BaryTrackError> {
        let tai = timestamp.to_uniform_epoch() + Duration::from_seconds(self.delta_at(timestamp));
        Ok(tai.to_et_seconds())
    }
}

/// Month given by its three letter name or its number.
fn month(input: &str) -> IResult<&str, u8> {
    alt((
        map_opt(alpha1, |name: &str| {
            MONTHS
                .iter()
                .position(|month| month.eq_ignore_ascii_case(name))
                .map(|index| index as u8 + 1)
        }),
        map_res(digit1, u8::from_str),
    ))
    .parse(input)
}

fn lsk_date(input: &str) -> IResult<&str, (i32, u8, u8)> {
    let (input, year) = map_res(digit1, i32::from_str).parse(input)?;
    let (input, month) = preceded(char('-'), month).parse(input)?;
    let (input, day) = preceded(char('-'), map_res(digit1, u8::from_str)).parse(input)?;
    Ok((input, (year, month, day)))
}

/// Parse an LSK date such as `1972-JAN-1` (numeric months also accepted).
fn parse_lsk_date(date: &str) -> Result<(i32, u8, u8), BaryTrackError> {
    let invalid = || BaryTrackError::InvalidLeapSecondTable(format!("invalid date @{date}"));

    let (_, (year, month, day)) = all_consuming(lsk_date)
        .parse(date.trim())
        .map_err(|_| invalid())?;
    UtcTimestamp::from_date(year, month, day).map_err(|_| invalid())?;
    Ok((year, month, day))
}
