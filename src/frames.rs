//! Inertial reference frames known to the ephemeris queries.
//!
//! SPK segments are stored in `J2000` (Earth mean equator and equinox of
//! J2000). `ECLIPJ2000` is the mean ecliptic and equinox of J2000, obtained by
//! rotating `J2000` about its X axis by the mean obliquity at J2000
//! (84381.448″, IAU 1976).
//!
//! # See also
//! * [`crate::constants::OBLIQUITY_J2000_ARCSEC`] – obliquity used for `ECLIPJ2000`.
use std::{fmt, str::FromStr};

use nalgebra::{Rotation3, Vector3};

use crate::{
    barytrack_errors::BaryTrackError,
    constants::{Radian, OBLIQUITY_J2000_ARCSEC, RADSEC},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceFrame {
    J2000,
    EclipJ2000,
}

/// Mean obliquity of the ecliptic at J2000, in radians.
pub fn obliquity_j2000() -> Radian {
    OBLIQUITY_J2000_ARCSEC * RADSEC
}

impl ReferenceFrame {
    pub fn naif_name(&self) -> &'static str {
        match self {
            ReferenceFrame::J2000 => "J2000",
            ReferenceFrame::EclipJ2000 => "ECLIPJ2000",
        }
    }

    pub fn naif_code(&self) -> i32 {
        match self {
            ReferenceFrame::J2000 => 1,
            ReferenceFrame::EclipJ2000 => 17,
        }
    }

    /// Rotation taking J2000 components to components in this frame.
    pub fn rotation_from_j2000(&self) -> Rotation3<f64> {
        match self {
            ReferenceFrame::J2000 => Rotation3::identity(),
            ReferenceFrame::EclipJ2000 => {
                Rotation3::from_axis_angle(&Vector3::x_axis(), -obliquity_j2000())
            }
        }
    }

    /// Express a J2000 vector in this frame.
    pub fn rotate_from_j2000(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        match self {
            ReferenceFrame::J2000 => *vector,
            _ => self.rotation_from_j2000() * vector,
        }
    }
}

impl FromStr for ReferenceFrame {
    type Err = BaryTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        [ReferenceFrame::J2000, ReferenceFrame::EclipJ2000]
            .into_iter()
            .find(|frame| frame.naif_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| BaryTrackError::UnknownFrame(s.to_string()))
    }
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.naif_name())
    }
}
