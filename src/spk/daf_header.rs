//! DAF (Double Precision Array File) file record parsing.
//!
//! The first 1024-byte record of a DAF container (an SPK kernel here) holds
//! the structural metadata needed to walk the file:
//!
//! * **`idword`**: format identifier, `"DAF/SPK"` for trajectory kernels.
//! * **`nd`** / **`ni`**: number of double / integer components of each
//!   array summary (`2` and `6` for SPK).
//! * **`fward`** / **`bward`**: record numbers (1-based) of the first and last
//!   summary record of the doubly linked summary list.
//! * **`free`**: first free address, in double precision words.
//! * **`locfmt`**: numeric encoding of the file (`"LTL-IEEE"` or `"BIG-IEEE"`).
//!
//! Integers are decoded little-endian; [`DAFHeader::validate_spk`] rejects any
//! other binary format before the rest of the file is interpreted.

use std::fmt;

use nom::{bytes::complete::take, number::complete::le_i32, IResult};

use crate::barytrack_errors::BaryTrackError;

#[derive(Debug, PartialEq, Clone)]
pub struct DAFHeader {
    pub idword: String,
    pub internal_filename: String,
    pub nd: i32,
    pub ni: i32,
    pub fward: i32,
    pub bward: i32,
    pub free: i32,
    pub locfmt: String,
}

impl DAFHeader {
    /// Parse the first 1024-byte DAF record.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: bytes starting at the beginning of the file.
    ///
    /// Return
    /// ----------
    /// * `(remaining, header)` with trailing padding removed from the text fields.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, id_word) = take(8usize)(input)?; // "DAF/SPK "
        let (input, nd) = le_i32(input)?;
        let (input, ni) = le_i32(input)?;
        let (input, ifname) = take(60usize)(input)?;
        let (input, fward) = le_i32(input)?;
        let (input, bward) = le_i32(input)?;
        let (input, free) = le_i32(input)?;
        let (input, locfmt) = take(8usize)(input)?;
        // reserved area, FTP validation string and trailing nulls
        let (input, _) = take(603usize + 28 + 297)(input)?;
        Ok((
            input,
            DAFHeader {
                idword: String::from_utf8_lossy(id_word).trim().to_string(),
                internal_filename: String::from_utf8_lossy(ifname).trim().to_string(),
                nd,
                ni,
                fward,
                bward,
                free,
                locfmt: String::from_utf8_lossy(locfmt).trim().to_string(),
            },
        ))
    }

    /// Check that the header describes a little-endian SPK file with a
    /// usable summary layout.
    pub fn validate_spk(&self) -> Result<(), BaryTrackError> {
        if self.idword != "DAF/SPK" {
            return Err(BaryTrackError::InvalidDafFile(format!(
                "unexpected id word {:?}",
                self.idword
            )));
        }
        if self.locfmt != "LTL-IEEE" {
            return Err(BaryTrackError::UnsupportedBinaryFormat(self.locfmt.clone()));
        }
        if self.nd != 2 || self.ni != 6 {
            return Err(BaryTrackError::InvalidDafFile(format!(
                "SPK summaries must have ND=2 and NI=6, found ND={} NI={}",
                self.nd, self.ni
            )));
        }
        if self.fward < 2 {
            return Err(BaryTrackError::InvalidDafFile(format!(
                "invalid first summary record {}",
                self.fward
            )));
        }
        Ok(())
    }

    /// Summary size in double precision words: `ND + ceil(NI / 2)`.
    pub fn summary_words(&self) -> usize {
        self.nd as usize + (self.ni as usize).div_ceil(2)
    }
}

impl fmt::Display for DAFHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 18;
        const VALUE_WIDTH: usize = 50;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );

        let rows = [
            ("ID Word", self.idword.clone()),
            ("Internal Name", self.internal_filename.clone()),
            ("ND / NI", format!("{} doubles, {} integers", self.nd, self.ni)),
            (
                "Summary records",
                format!("first {}, last {}", self.fward, self.bward),
            ),
            ("Free Addr", self.free.to_string()),
            ("Binary Format", self.locfmt.clone()),
        ];

        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<LABEL_WIDTH$}| {:<VALUE_WIDTH$}|",
            "DAF File Header", ""
        )?;
        writeln!(f, "{border}")?;
        for (label, value) in rows {
            writeln!(f, "| {label:<LABEL_WIDTH$}| {value:<VALUE_WIDTH$}|")?;
        }
        writeln!(f, "{border}")
    }
}
