//! NAIF kernel files: detection of the kernel kind and text kernel support.
//!
//! Binary SPK files are decoded by [`crate::spk`]; text kernels (LSK and
//! PCK) are merged into a [`text_kernel::KernelPool`].
pub mod leap_seconds;
pub mod text_kernel;

use std::{fmt, fs::File, io::Read};

use camino::Utf8Path;

use crate::barytrack_errors::BaryTrackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelKind {
    /// Leap seconds kernel (`KPL/LSK`).
    LeapSeconds,
    /// Binary trajectory kernel (`DAF/SPK`).
    Trajectory,
    /// Text planetary constants kernel (`KPL/PCK`).
    PlanetaryConstants,
}

impl KernelKind {
    /// Identify a kernel from the id word at the start of its first line.
    pub fn from_id_word(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"DAF/SPK") {
            Some(KernelKind::Trajectory)
        } else if bytes.starts_with(b"KPL/LSK") {
            Some(KernelKind::LeapSeconds)
        } else if bytes.starts_with(b"KPL/PCK") {
            Some(KernelKind::PlanetaryConstants)
        } else {
            None
        }
    }

    /// Read the first bytes of `path` and identify the kernel.
    pub fn detect(path: &Utf8Path) -> Result<Self, BaryTrackError> {
        let mut id_word = Vec::with_capacity(8);
        File::open(path)?.take(8).read_to_end(&mut id_word)?;
        Self::from_id_word(&id_word)
            .ok_or_else(|| BaryTrackError::UnknownKernelKind(path.to_string()))
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, KernelKind::Trajectory)
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelKind::LeapSeconds => write!(f, "LSK"),
            KernelKind::Trajectory => write!(f, "SPK"),
            KernelKind::PlanetaryConstants => write!(f, "PCK"),
        }
    }
}
