#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use camino::{Utf8Path, Utf8PathBuf};
use nalgebra::Vector3;

use barytrack::{
    barytrack_errors::BaryTrackError,
    config::KernelSet,
    constants::{EtSeconds, LightTime, VLIGHT},
    ephemeris::{EphemerisQuery, StateVector},
    frames::ReferenceFrame,
    plot::TrajectoryPresenter,
    spk::naif_ids::NaifBody,
};

/// Coverage of every synthetic segment, in ET seconds.
pub const SEGMENT_START: f64 = -1.0e9;
pub const RECORD_LENGTH: f64 = 1.0e8;
pub const N_RECORDS: usize = 20;
pub const SEGMENT_END: f64 = SEGMENT_START + N_RECORDS as f64 * RECORD_LENGTH;

/// Degree 1 type 2 records: mid, radius and 2 coefficients per axis.
const RSIZE: usize = 2 + 3 * 2;
const RECORD_BYTES: usize = 1024;

pub const SUN_RADIUS_KM: f64 = 696_000.0;

/// Segment of a body in uniform motion relative to its center (J2000).
#[derive(Debug, Clone, Copy)]
pub struct LinearSegment {
    pub target: i32,
    pub center: i32,
    /// Position at ET 0 (km).
    pub position: Vector3<f64>,
    /// Constant velocity (km/s).
    pub velocity: Vector3<f64>,
}

impl LinearSegment {
    pub fn state_at(&self, et: EtSeconds) -> StateVector {
        StateVector::new(self.position + self.velocity * et, self.velocity)
    }
}

pub fn sun_wrt_ssb() -> LinearSegment {
    LinearSegment {
        target: 10,
        center: 0,
        position: Vector3::new(-7.1e5, -3.2e5, -1.1e5),
        velocity: Vector3::new(0.0062, -0.0075, -0.0032),
    }
}

pub fn emb_wrt_ssb() -> LinearSegment {
    LinearSegment {
        target: 3,
        center: 0,
        position: Vector3::new(-2.65e7, 1.33e8, 5.77e7),
        velocity: Vector3::new(-29.8, -4.9, -2.1),
    }
}

pub fn earth_wrt_emb() -> LinearSegment {
    LinearSegment {
        target: 399,
        center: 3,
        position: Vector3::new(-2.9e3, -3.6e3, -1.5e3),
        velocity: Vector3::new(0.0009, -0.0007, -0.0003),
    }
}

pub fn default_segments() -> Vec<LinearSegment> {
    vec![sun_wrt_ssb(), emb_wrt_ssb(), earth_wrt_emb()]
}

/// Little-endian DAF/SPK image holding one type 2 segment per entry.
///
/// Layout: file record, one summary record, one name record, then the
/// segments (records followed by their directory) from word 385.
pub fn spk_bytes(segments: &[LinearSegment]) -> Vec<u8> {
    assert!(segments.len() <= 25, "one summary record holds 25 summaries");

    let mut data_words: Vec<f64> = Vec::new();
    let mut summaries = Vec::new();
    let mut next_addr = 3 * RECORD_BYTES / 8 + 1;

    for segment in segments {
        let start_addr = next_addr;
        let radius = RECORD_LENGTH / 2.0;
        for k in 0..N_RECORDS {
            let mid = SEGMENT_START + (k as f64 + 0.5) * RECORD_LENGTH;
            let at_mid = segment.position + segment.velocity * mid;
            data_words.extend([mid, radius]);
            for axis in 0..3 {
                data_words.extend([at_mid[axis], segment.velocity[axis] * radius]);
            }
        }
        data_words.extend([SEGMENT_START, RECORD_LENGTH, RSIZE as f64, N_RECORDS as f64]);

        let end_addr = start_addr + N_RECORDS * RSIZE + 4 - 1;
        summaries.push((segment, start_addr, end_addr));
        next_addr = end_addr + 1;
    }

    let mut file = vec![0u8; 3 * RECORD_BYTES];

    // --- file record
    file[0..8].copy_from_slice(b"DAF/SPK ");
    file[8..12].copy_from_slice(&2i32.to_le_bytes());
    file[12..16].copy_from_slice(&6i32.to_le_bytes());
    file[16..76].fill(b' ');
    file[16..29].copy_from_slice(b"SYNTHETIC SPK");
    file[76..80].copy_from_slice(&2i32.to_le_bytes());
    file[80..84].copy_from_slice(&2i32.to_le_bytes());
    file[84..88].copy_from_slice(&(next_addr as i32).to_le_bytes());
    file[88..96].copy_from_slice(b"LTL-IEEE");

    // --- summary record
    let base = RECORD_BYTES;
    file[base..base + 8].copy_from_slice(&0.0f64.to_le_bytes());
    file[base + 8..base + 16].copy_from_slice(&0.0f64.to_le_bytes());
    file[base + 16..base + 24].copy_from_slice(&(summaries.len() as f64).to_le_bytes());
    for (i, (segment, start_addr, end_addr)) in summaries.iter().enumerate() {
        let mut offset = base + 24 + i * 40;
        for value in [SEGMENT_START, SEGMENT_END] {
            file[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
            offset += 8;
        }
        for value in [
            segment.target,
            segment.center,
            1,
            2,
            *start_addr as i32,
            *end_addr as i32,
        ] {
            file[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
            offset += 4;
        }
    }

    // --- name record
    file[2 * RECORD_BYTES..3 * RECORD_BYTES].fill(b' ');

    for word in data_words {
        file.extend_from_slice(&word.to_le_bytes());
    }
    file
}

pub const LSK_TEXT: &str = r"KPL/LSK

Leap seconds kernel used by the integration tests.

\begindata

DELTET/DELTA_T_A       =   32.184
DELTET/K               =    1.657D-3
DELTET/EB              =    1.671D-2
DELTET/M               = (  6.239996D0   1.99096871D-7 )

DELTET/DELTA_AT        = ( 10,   @1972-JAN-1
                           11,   @1972-JUL-1
                           12,   @1973-JAN-1
                           13,   @1974-JAN-1
                           14,   @1975-JAN-1
                           15,   @1976-JAN-1
                           16,   @1977-JAN-1
                           17,   @1978-JAN-1
                           18,   @1979-JAN-1
                           19,   @1980-JAN-1
                           20,   @1981-JUL-1
                           21,   @1982-JUL-1
                           22,   @1983-JUL-1
                           23,   @1985-JUL-1
                           24,   @1988-JAN-1
                           25,   @1990-JAN-1
                           26,   @1991-JAN-1
                           27,   @1992-JUL-1
                           28,   @1993-JUL-1
                           29,   @1994-JUL-1
                           30,   @1996-JAN-1
                           31,   @1997-JUL-1
                           32,   @1999-JAN-1
                           33,   @2006-JAN-1
                           34,   @2009-JAN-1
                           35,   @2012-JUL-1
                           36,   @2015-JUL-1
                           37,   @2017-JAN-1 )

\begintext
";

pub const PCK_TEXT: &str = r"KPL/PCK

Planetary constants used by the integration tests.

\begindata

BODY10_RADII      = ( 696000.     696000.      696000.     )
BODY399_RADII     = ( 6378.1366   6378.1366    6356.7519   )
BODY10_POLE_RA    = ( 286.13       0.          0. )

\begintext
";

/// Write the three default kernels in `dir` and return their locations.
pub fn write_kernels(dir: &Utf8Path, segments: &[LinearSegment]) -> KernelSet {
    let kernels = KernelSet::in_dir(dir);
    std::fs::write(&kernels.leap_seconds, LSK_TEXT).unwrap();
    std::fs::write(&kernels.trajectory, spk_bytes(segments)).unwrap();
    std::fs::write(&kernels.planetary_constants, PCK_TEXT).unwrap();
    kernels
}

/// Temporary directory holding the default synthetic kernels.
pub fn synthetic_kernels() -> (tempfile::TempDir, KernelSet) {
    let dir = tempfile::tempdir().unwrap();
    let root = utf8_dir(&dir);
    let kernels = write_kernels(&root, &default_segments());
    (dir, kernels)
}

pub fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}

/// Deterministic ephemeris: the target circles the observer in the XY plane.
pub struct FakeEphemeris {
    pub orbit_radius: f64,
    pub period: f64,
    /// Queries at or after this epoch fail.
    pub fail_from: Option<EtSeconds>,
    /// Value of every `BODY10_RADII` component.
    pub sun_radius: f64,
    pub calls: Cell<usize>,
}

impl Default for FakeEphemeris {
    fn default() -> Self {
        FakeEphemeris {
            orbit_radius: 1.0e6,
            period: 12.0 * 365.25 * 86_400.0,
            fail_from: None,
            sun_radius: SUN_RADIUS_KM,
            calls: Cell::new(0),
        }
    }
}

impl EphemerisQuery for FakeEphemeris {
    fn state(
        &self,
        target: NaifBody,
        et: EtSeconds,
        _frame: ReferenceFrame,
        _observer: NaifBody,
    ) -> Result<(StateVector, LightTime), BaryTrackError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_from.is_some_and(|limit| et >= limit) {
            return Err(BaryTrackError::NoSegmentCoverage {
                body: target.to_id(),
                et,
            });
        }

        let omega = std::f64::consts::TAU / self.period;
        let (sin, cos) = (omega * et).sin_cos();
        let state = StateVector::new(
            Vector3::new(self.orbit_radius * cos, self.orbit_radius * sin, 0.0),
            Vector3::new(
                -self.orbit_radius * omega * sin,
                self.orbit_radius * omega * cos,
                0.0,
            ),
        );
        Ok((state, state.distance() / VLIGHT))
    }

    fn body_values(
        &self,
        body: NaifBody,
        item: &str,
        max_count: usize,
    ) -> Result<Vec<f64>, BaryTrackError> {
        match (body, item) {
            (NaifBody::Sun, "RADII") if max_count >= 3 => Ok(vec![self.sun_radius; 3]),
            _ => Err(BaryTrackError::BodyConstantNotFound(format!(
                "BODY{}_{item}",
                body.to_id()
            ))),
        }
    }
}

/// Presenter keeping what it was asked to draw.
#[derive(Default)]
pub struct RecordingPresenter {
    pub points: RefCell<Vec<(f64, f64)>>,
    pub reference_radius: Cell<Option<f64>>,
    pub fail: bool,
}

impl TrajectoryPresenter for RecordingPresenter {
    fn present(&self, points: &[(f64, f64)], reference_radius: f64) -> Result<(), BaryTrackError> {
        if self.fail {
            return Err(BaryTrackError::PlotError("backend unavailable".into()));
        }
        self.points.replace(points.to_vec());
        self.reference_radius.set(Some(reference_radius));
        Ok(())
    }
}
