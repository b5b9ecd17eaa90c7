//! Ephemeris record decoding and Chebyshev interpolation.
//!
//! A record of a Chebyshev SPK segment holds the record midpoint `mid`
//! (ET seconds), the half-interval `radius` (seconds), and one coefficient
//! set per state component:
//!
//! * type 2: X, Y, Z position sets (km);
//! * type 3: X, Y, Z position sets (km) followed by VX, VY, VZ velocity sets (km/s).
//!
//! The normalized time is `τ = (et - mid) / radius`, clamped to `[-1, 1]`.
//! Type 2 velocities come from the derivative series `T'_n(τ)` divided by
//! `radius`.
//!
//! ## Units & time scales
//! * `mid` and `radius` are seconds of ET/TDB.
//! * Interpolated position is in kilometers; velocity in km/s.
use std::io::{Read, Seek, SeekFrom};

use nalgebra::Vector3;

use crate::{barytrack_errors::BaryTrackError, constants::DAF_WORD_BYTES};

use super::spk_type::SpkDataType;

#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRecord {
    /// Midpoint of the record time span (ET seconds from J2000 TDB).
    pub mid: f64,
    /// Half-width of the record interval (seconds).
    pub radius: f64,
    /// Chebyshev coefficients for X, Y, Z (km).
    pub position: [Vec<f64>; 3],
    /// Chebyshev coefficients for VX, VY, VZ (km/s), type 3 only.
    pub velocity: Option<[Vec<f64>; 3]>,
}

impl EphemerisRecord {
    /// Decode one record from its words.
    fn from_words(words: &[f64], components: usize) -> Result<Self, BaryTrackError> {
        let (header, coefficients) = words.split_at(2);
        if coefficients.is_empty() || coefficients.len() % components != 0 {
            return Err(BaryTrackError::InvalidDafFile(format!(
                "record of {} words cannot hold {components} coefficient sets",
                words.len()
            )));
        }
        let ncoeff = coefficients.len() / components;
        let set = |i: usize| coefficients[i * ncoeff..(i + 1) * ncoeff].to_vec();

        Ok(EphemerisRecord {
            mid: header[0],
            radius: header[1],
            position: [set(0), set(1), set(2)],
            velocity: (components == 6).then(|| [set(3), set(4), set(5)]),
        })
    }

    /// Read the `n_records` contiguous records of a segment.
    ///
    /// Arguments
    /// -----------------
    /// * `file`: seekable reader over the whole DAF file.
    /// * `segment_start_addr`: start address of the segment in words (1-based).
    /// * `rsize`: record size in words.
    /// * `n_records`: number of records.
    /// * `data_type`: segment type, selects the coefficient layout.
    ///
    /// Return
    /// ----------
    /// * The decoded records in file order.
    pub fn parse<R: Read + Seek>(
        file: &mut R,
        segment_start_addr: usize,
        rsize: usize,
        n_records: usize,
        data_type: SpkDataType,
    ) -> Result<Vec<Self>, BaryTrackError> {
        let components = data_type.chebyshev_components();
        if segment_start_addr == 0 || rsize < 2 + components {
            return Err(BaryTrackError::InvalidDafFile(format!(
                "invalid segment layout: start address {segment_start_addr}, record size {rsize}"
            )));
        }

        let byte_count = rsize
            .checked_mul(n_records)
            .and_then(|words| words.checked_mul(DAF_WORD_BYTES))
            .ok_or_else(|| {
                BaryTrackError::InvalidDafFile(format!(
                    "segment size overflows: {n_records} records of {rsize} words"
                ))
            })?;

        let mut raw = vec![0u8; byte_count];
        file.seek(SeekFrom::Start(
            ((segment_start_addr - 1) * DAF_WORD_BYTES) as u64,
        ))?;
        file.read_exact(&mut raw)?;

        let words: Vec<f64> = raw
            .chunks_exact(DAF_WORD_BYTES)
            .map(|chunk| {
                let mut bytes = [0u8; DAF_WORD_BYTES];
                bytes.copy_from_slice(chunk);
                f64::from_le_bytes(bytes)
            })
            .collect();

        words
            .chunks_exact(rsize)
            .map(|record| Self::from_words(record, components))
            .collect()
    }

    fn normalized_time(&self, ephem_time: f64) -> f64 {
        ((ephem_time - self.mid) / self.radius).clamp(-1.0, 1.0)
    }

    /// Interpolate Cartesian position (km) and velocity (km/s) at an ET epoch.
    pub fn interpolate(&self, ephem_time: f64) -> (Vector3<f64>, Vector3<f64>) {
        let tau = self.normalized_time(ephem_time);
        let polynomials = chebyshev_polynomials(tau, self.position[0].len());

        let position = Vector3::from_fn(|axis, _| dot(&self.position[axis], &polynomials));

        let velocity = match &self.velocity {
            Some(sets) => {
                let polynomials = chebyshev_polynomials(tau, sets[0].len());
                Vector3::from_fn(|axis, _| dot(&sets[axis], &polynomials))
            }
            None => {
                let derivatives = chebyshev_derivatives(tau, &polynomials);
                Vector3::from_fn(|axis, _| dot(&self.position[axis], &derivatives) / self.radius)
            }
        };

        (position, velocity)
    }
}

fn dot(coefficients: &[f64], basis: &[f64]) -> f64 {
    coefficients.iter().zip(basis).map(|(c, b)| c * b).sum()
}

/// `T_0 = 1`, `T_1 = τ`, `T_n = 2τ T_{n-1} - T_{n-2}`.
fn chebyshev_polynomials(tau: f64, count: usize) -> Vec<f64> {
    let mut polynomials = vec![0.0; count];
    if count > 0 {
        polynomials[0] = 1.0;
    }
    if count > 1 {
        polynomials[1] = tau;
    }
    for degree in 2..count {
        polynomials[degree] = 2.0 * tau * polynomials[degree - 1] - polynomials[degree - 2];
    }
    polynomials
}

/// `T'_0 = 0`, `T'_1 = 1`, `T'_n = 2τ T'_{n-1} + 2 T_{n-1} - T'_{n-2}`.
fn chebyshev_derivatives(tau: f64, polynomials: &[f64]) -> Vec<f64> {
    let count = polynomials.len();
    let mut derivatives = vec![0.0; count];
    if count > 1 {
        derivatives[1] = 1.0;
    }
    for degree in 2..count {
        derivatives[degree] = 2.0 * tau * derivatives[degree - 1]
            + 2.0 * polynomials[degree - 1]
            - derivatives[degree - 2];
    }
    derivatives
}
