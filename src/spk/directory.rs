//! Directory footer of a Chebyshev SPK segment (types 2 and 3).
//!
//! The last four words of such a segment are:
//!
//! * `init`: start epoch of the first record (ET seconds past J2000),
//! * `intlen`: time span covered by each record (seconds),
//! * `rsize`: record size in **double precision words**, not bytes,
//! * `n_records`: number of records in the segment.
//!
//! A DAF address counts 8-byte words starting at 1, so the footer starts at
//! byte `(end_addr - 4) * 8`.

use std::io::{Read, Seek, SeekFrom};

use hifitime::{Duration, Epoch};
use nom::{number::complete::le_f64, IResult};

use crate::{barytrack_errors::BaryTrackError, constants::DAF_WORD_BYTES};

#[derive(Debug, PartialEq, Clone)]
pub struct DirectoryData {
    pub init: f64,
    pub intlen: f64,
    pub rsize: usize,
    pub n_records: usize,
}

impl DirectoryData {
    /// Read the footer of the segment ending at `end_addr` (1-based word address).
    pub fn parse<R: Read + Seek>(file: &mut R, end_addr: usize) -> Result<Self, BaryTrackError> {
        if end_addr < 4 {
            return Err(BaryTrackError::InvalidDafFile(format!(
                "segment end address {end_addr} leaves no room for a directory"
            )));
        }
        let directory_offset_bytes = (end_addr - 4) * DAF_WORD_BYTES;
        let mut dir_buf = [0u8; 4 * DAF_WORD_BYTES];
        file.seek(SeekFrom::Start(directory_offset_bytes as u64))?;
        file.read_exact(&mut dir_buf)?;

        let (_, (init, intlen, rsize, n_records)) = parse_footer(dir_buf.as_slice())
            .map_err(|_| BaryTrackError::InvalidDafFile("truncated segment directory".into()))?;

        if intlen <= 0.0 || rsize < 3.0 || n_records < 1.0 {
            return Err(BaryTrackError::InvalidDafFile(format!(
                "inconsistent segment directory: intlen={intlen}, rsize={rsize}, n={n_records}"
            )));
        }

        Ok(DirectoryData {
            init,
            intlen,
            rsize: rsize as usize,
            n_records: n_records as usize,
        })
    }

    /// 0-based index of the record covering `et_seconds`, clamped to the
    /// last record so the segment end epoch stays inside the data.
    pub fn record_index(&self, et_seconds: f64) -> usize {
        let idx = ((et_seconds - self.init) / self.intlen).floor();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(self.n_records - 1)
        }
    }
}

fn parse_footer(input: &[u8]) -> IResult<&[u8], (f64, f64, f64, f64)> {
    let (input, init) = le_f64(input)?;
    let (input, intlen) = le_f64(input)?;
    let (input, rsize) = le_f64(input)?;
    let (input, n_records) = le_f64(input)?;
    Ok((input, (init, intlen, rsize, n_records)))
}

impl std::fmt::Display for DirectoryData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let epoch = Epoch::from_et_seconds(self.init);
        let record_length = Duration::from_seconds(self.intlen);

        writeln!(f, "+----------------+----------------------------+")?;
        writeln!(f, "| {:<14} | {:<26} |", "Field", "Value")?;
        writeln!(f, "+----------------+----------------------------+")?;
        writeln!(f, "| {:<14} | {:<26} |", "init (epoch)", epoch.to_string())?;
        writeln!(f, "| {:<14} | {:<26} |", "intlen", record_length.to_string())?;
        writeln!(f, "| {:<14} | {:<26} |", "rsize", self.rsize)?;
        writeln!(f, "| {:<14} | {:<26} |", "n_records", self.n_records)?;
        writeln!(f, "+----------------+----------------------------+")
    }
}
