//! Loader for NAIF SPK trajectory kernels.
//!
//! # What this module does
//! 1. Reads the **DAF file record** to discover the binary layout and checks
//!    the file is a little-endian SPK.
//! 2. Walks the **summary records** through their forward chain to discover
//!    every segment (`target`, `center`, frame, type, coverage, addresses).
//! 3. Uses each segment **directory** to obtain `rsize` and `n_records`.
//! 4. Loads all **ephemeris records** (Chebyshev coefficients) in memory.
//!
//! Segments keep their file order: when two segments cover the same body and
//! epoch, the one stored last wins, as in the NAIF toolkit.
//!
//! # Units & time scales
//! * Times are ET/TDB seconds from J2000.
//! * Positions are kilometers, velocities km/s, in the segment frame.
use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
};

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use nalgebra::Vector3;
use nom::{number::complete::le_f64, IResult};

use crate::{
    barytrack_errors::BaryTrackError,
    constants::{DAF_RECORD_BYTES, DAF_WORD_BYTES},
};

use super::{
    daf_header::DAFHeader, directory::DirectoryData, ephemeris_record::EphemerisRecord,
    spk_type::SpkDataType, summary_record::Summary,
};

/// NAIF code of the inertial J2000 frame, the only segment frame accepted.
pub const J2000_FRAME_CODE: i32 = 1;

/// Upper bound on the number of summary records followed in one file.
const MAX_SUMMARY_RECORDS: usize = 10_000;

/// One decoded SPK segment.
#[derive(Debug, Clone)]
pub struct SpkSegment {
    pub summary: Summary,
    pub data_type: SpkDataType,
    pub directory: DirectoryData,
    records: Vec<EphemerisRecord>,
}

impl SpkSegment {
    /// Position (km) and velocity (km/s) of `summary.target` relative to
    /// `summary.center` at `et_seconds`, or `None` outside the segment coverage.
    pub fn evaluate(&self, et_seconds: f64) -> Option<(Vector3<f64>, Vector3<f64>)> {
        if !self.summary.covers(et_seconds) {
            return None;
        }
        self.records
            .get(self.directory.record_index(et_seconds))
            .map(|record| record.interpolate(et_seconds))
    }

    pub fn records(&self) -> &[EphemerisRecord] {
        &self.records
    }
}

/// In-memory content of one SPK file.
#[derive(Debug, Clone)]
pub struct SpkFile {
    pub(crate) path: Utf8PathBuf,
    pub(crate) daf_header: DAFHeader,
    pub(crate) segments: Vec<SpkSegment>,
}

impl SpkFile {
    /// Load and decode an SPK file.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: filesystem location of the kernel.
    ///
    /// Return
    /// ----------
    /// * The decoded file, or the first I/O or format error met.
    pub fn read(path: &Utf8Path) -> Result<Self, BaryTrackError> {
        let mut file = BufReader::new(File::open(path)?);
        let mut spk = Self::from_reader(&mut file)?;
        spk.path = path.to_path_buf();
        Ok(spk)
    }

    /// Decode an SPK from any seekable byte source.
    pub fn from_reader<R: Read + Seek>(file: &mut R) -> Result<Self, BaryTrackError> {
        // --- DAF file record (first 1024 bytes)
        let mut buffer = [0u8; DAF_RECORD_BYTES];
        file.seek(SeekFrom::Start(0))?;
        file.read_exact(&mut buffer)?;
        let (_, daf_header) = DAFHeader::parse(&buffer)
            .map_err(|_| BaryTrackError::InvalidDafFile("truncated file record".into()))?;
        daf_header.validate_spk()?;

        let summary_words = daf_header.summary_words();
        let mut segments = Vec::new();
        let mut next_record = daf_header.fward as usize;
        let mut visited = 0;

        // --- Summary records, following the forward chain
        while next_record != 0 {
            visited += 1;
            if visited > MAX_SUMMARY_RECORDS {
                return Err(BaryTrackError::InvalidDafFile(
                    "summary record chain does not terminate".into(),
                ));
            }

            file.seek(SeekFrom::Start(
                ((next_record - 1) * DAF_RECORD_BYTES) as u64,
            ))?;
            file.read_exact(&mut buffer)?;

            let (_, (next, nsum)) = parse_control_words(&buffer).map_err(|_| {
                BaryTrackError::InvalidDafFile("truncated summary record".into())
            })?;

            for i in 0..nsum {
                let start = 3 * DAF_WORD_BYTES + i * summary_words * DAF_WORD_BYTES;
                let end = start + summary_words * DAF_WORD_BYTES;
                let summary_bytes = buffer.get(start..end).ok_or_else(|| {
                    BaryTrackError::InvalidDafFile(format!("summary count {nsum} overflows record"))
                })?;
                let (_, summary) = Summary::parse(summary_bytes)
                    .map_err(|_| BaryTrackError::InvalidDafFile("truncated summary".into()))?;

                segments.push(Self::load_segment(file, summary)?);
            }

            next_record = next;
        }

        Ok(SpkFile {
            path: Utf8PathBuf::new(),
            daf_header,
            segments,
        })
    }

    fn load_segment<R: Read + Seek>(
        file: &mut R,
        summary: Summary,
    ) -> Result<SpkSegment, BaryTrackError> {
        let data_type = SpkDataType::from_i32(summary.data_type)?;
        if summary.frame_id != J2000_FRAME_CODE {
            return Err(BaryTrackError::UnsupportedSegmentFrame(summary.frame_id));
        }
        if summary.initial_addr < 1 || summary.final_addr < summary.initial_addr {
            return Err(BaryTrackError::InvalidDafFile(format!(
                "invalid segment addresses {}..{}",
                summary.initial_addr, summary.final_addr
            )));
        }

        let directory = DirectoryData::parse(file, summary.final_addr as usize)?;
        check_segment_span(&summary, &directory)?;
        let records = EphemerisRecord::parse(
            file,
            summary.initial_addr as usize,
            directory.rsize,
            directory.n_records,
            data_type,
        )?;

        debug!(
            "SPK segment {} wrt {}: type {}, {} records, ET [{}, {}]",
            summary.target,
            summary.center,
            summary.data_type,
            records.len(),
            summary.start_epoch,
            summary.end_epoch
        );

        Ok(SpkSegment {
            summary,
            data_type,
            directory,
            records,
        })
    }

    pub fn segments(&self) -> &[SpkSegment] {
        &self.segments
    }

    pub fn header(&self) -> &DAFHeader {
        &self.daf_header
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Human-readable table of the file header and of every segment.
    pub fn info(&self) -> String {
        let mut out = format!("+{:-^78}+\n", format!(" {} ", self.path));
        out.push_str(&self.daf_header.to_string());
        for segment in &self.segments {
            out.push_str(&segment.summary.to_string());
            out.push_str(&segment.directory.to_string());
        }
        out
    }
}

/// The records and the 4-word directory must fill the summary's address
/// range exactly.
fn check_segment_span(summary: &Summary, directory: &DirectoryData) -> Result<(), BaryTrackError> {
    let span = (summary.final_addr - summary.initial_addr) as usize + 1;
    let expected = directory
        .rsize
        .checked_mul(directory.n_records)
        .and_then(|words| words.checked_add(4));

    if expected == Some(span) {
        Ok(())
    } else {
        Err(BaryTrackError::InvalidDafFile(format!(
            "segment {} wrt {}: {} records of {} words do not fit addresses {}..{}",
            summary.target,
            summary.center,
            directory.n_records,
            directory.rsize,
            summary.initial_addr,
            summary.final_addr
        )))
    }
}

/// Read `NEXT` and `NSUM` from the three control words of a summary record.
fn parse_control_words(input: &[u8]) -> IResult<&[u8], (usize, usize)> {
    let (input, next) = le_f64(input)?;
    let (input, _prev) = le_f64(input)?;
    let (input, nsum) = le_f64(input)?;
    Ok((input, (next.max(0.0) as usize, nsum.max(0.0) as usize)))
}

#[cfg(test)]
mod test_spk_data {
    use std::io::Cursor;

    use approx::assert_relative_eq;

    use super::*;

    /// Build a minimal SPK holding one type 2 segment with `n` records of
    /// degree 1: `x(τ) = a + b τ`, `y = 0`, `z = 0`.
    fn single_segment_spk(frame: i32, data_type: i32) -> Vec<u8> {
        segment_with_directory(frame, data_type, 2.0)
    }

    /// Same file with the directory's record count set to `n_records`.
    fn segment_with_directory(frame: i32, data_type: i32, n_records: f64) -> Vec<u8> {
        let mut file = vec![0u8; 3 * DAF_RECORD_BYTES];

        // --- file record
        file[..8].copy_from_slice(b"DAF/SPK ");
        file[8..12].copy_from_slice(&2i32.to_le_bytes());
        file[12..16].copy_from_slice(&6i32.to_le_bytes());
        file[16..76].fill(b' ');
        file[76..80].copy_from_slice(&2i32.to_le_bytes());
        file[80..84].copy_from_slice(&2i32.to_le_bytes());
        file[88..96].copy_from_slice(b"LTL-IEEE");

        // --- segment data, starting at word 385 (after three records)
        let mut words: Vec<f64> = Vec::new();
        for (mid, a) in [(50.0, 1000.0), (150.0, 2000.0)] {
            words.extend_from_slice(&[mid, 50.0, a, 10.0, 0.0, 0.0, 0.0, 0.0]);
        }
        words.extend_from_slice(&[0.0, 100.0, 8.0, n_records]);
        let start_addr = 3 * DAF_RECORD_BYTES / DAF_WORD_BYTES + 1;
        let end_addr = start_addr + words.len() - 1;
        for w in &words {
            file.extend_from_slice(&w.to_le_bytes());
        }

        // --- summary record (record 2)
        let base = DAF_RECORD_BYTES;
        file[base..base + 8].copy_from_slice(&0.0f64.to_le_bytes());
        file[base + 8..base + 16].copy_from_slice(&0.0f64.to_le_bytes());
        file[base + 16..base + 24].copy_from_slice(&1.0f64.to_le_bytes());
        let mut summary = Vec::new();
        summary.extend_from_slice(&0.0f64.to_le_bytes());
        summary.extend_from_slice(&200.0f64.to_le_bytes());
        for v in [10, 0, frame, data_type, start_addr as i32, end_addr as i32] {
            summary.extend_from_slice(&v.to_le_bytes());
        }
        file[base + 24..base + 24 + summary.len()].copy_from_slice(&summary);
        file
    }

    #[test]
    fn test_read_single_segment() {
        let spk = SpkFile::from_reader(&mut Cursor::new(single_segment_spk(1, 2))).unwrap();
        assert_eq!(spk.segments().len(), 1);

        let segment = &spk.segments()[0];
        assert_eq!(segment.summary.target, 10);
        assert_eq!(segment.directory.n_records, 2);
        assert_eq!(segment.records().len(), 2);

        // second record, τ = 0.5
        let (position, velocity) = segment.evaluate(175.0).unwrap();
        assert_relative_eq!(position.x, 2005.0, epsilon = 1e-9);
        assert_relative_eq!(velocity.x, 10.0 / 50.0, epsilon = 1e-12);
        assert!(segment.evaluate(250.0).is_none());
    }

    #[test]
    fn test_reject_non_j2000_segment() {
        let result = SpkFile::from_reader(&mut Cursor::new(single_segment_spk(17, 2)));
        assert!(matches!(
            result,
            Err(BaryTrackError::UnsupportedSegmentFrame(17))
        ));
    }

    #[test]
    fn test_reject_unsupported_type() {
        let result = SpkFile::from_reader(&mut Cursor::new(single_segment_spk(1, 13)));
        assert!(matches!(
            result,
            Err(BaryTrackError::UnsupportedSpkDataType(13))
        ));
    }

    #[test]
    fn test_info_lists_segments() {
        let spk = SpkFile::from_reader(&mut Cursor::new(single_segment_spk(1, 2))).unwrap();
        let info = spk.info();
        assert!(info.contains("DAF/SPK"));
        assert!(info.contains("| Sun "));
        assert!(info.contains("n_records"));
    }

    #[test]
    fn test_reject_directory_inconsistent_with_addresses() {
        for n_records in [1.0, 3.0, 1.0e17] {
            let result = SpkFile::from_reader(&mut Cursor::new(segment_with_directory(
                1, 2, n_records,
            )));
            assert!(
                matches!(result, Err(BaryTrackError::InvalidDafFile(_))),
                "n_records = {n_records}"
            );
        }
    }
}
