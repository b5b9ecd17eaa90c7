//! Kernel locations and the constants of the SSB scenario.
//!
//! The kernels are looked up in a single directory: the working directory,
//! or the one named by the `BARYTRACK_KERNEL_DIR` environment variable.
use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    barytrack_errors::BaryTrackError, frames::ReferenceFrame, plot::PlotSettings,
    spk::naif_ids::NaifBody, time::UtcTimestamp,
};

pub const KERNEL_DIR_ENV: &str = "BARYTRACK_KERNEL_DIR";

pub const LEAP_SECONDS_KERNEL: &str = "naif0012.tls";
pub const TRAJECTORY_KERNEL: &str = "de432s.bsp";
pub const PLANETARY_CONSTANTS_KERNEL: &str = "pck00010.tpc";

/// The three kernels a run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelSet {
    pub leap_seconds: Utf8PathBuf,
    pub trajectory: Utf8PathBuf,
    pub planetary_constants: Utf8PathBuf,
}

impl KernelSet {
    /// Default kernel file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Utf8Path>) -> Self {
        let dir = dir.as_ref();
        KernelSet {
            leap_seconds: dir.join(LEAP_SECONDS_KERNEL),
            trajectory: dir.join(TRAJECTORY_KERNEL),
            planetary_constants: dir.join(PLANETARY_CONSTANTS_KERNEL),
        }
    }

    /// Default kernels in `$BARYTRACK_KERNEL_DIR`, or in the working directory.
    pub fn from_env() -> Self {
        match std::env::var(KERNEL_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::in_dir(dir.trim()),
            _ => Self::in_dir(""),
        }
    }

    /// Kernel paths in loading order.
    pub fn paths(&self) -> [&Utf8Path; 3] {
        [
            &self.leap_seconds,
            &self.trajectory,
            &self.planetary_constants,
        ]
    }

    /// Fail with [`BaryTrackError::KernelNotFound`] on the first missing file.
    pub fn validate(&self) -> Result<(), BaryTrackError> {
        match self.paths().into_iter().find(|path| !path.is_file()) {
            Some(missing) => Err(BaryTrackError::KernelNotFound(missing.to_string())),
            None => Ok(()),
        }
    }
}

/// Hard-coded parameters of the SSB wrt Sun run.
#[derive(Debug, Clone, PartialEq)]
pub struct SsbScenario {
    pub start: UtcTimestamp,
    pub span_days: f64,
    pub sample_count: usize,
    pub target: NaifBody,
    pub observer: NaifBody,
    pub frame: ReferenceFrame,
    /// Body whose radius scales the trajectory.
    pub radius_body: NaifBody,
    pub plot: PlotSettings,
}

impl Default for SsbScenario {
    fn default() -> Self {
        SsbScenario {
            start: UtcTimestamp {
                year: 2000,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0,
            },
            span_days: 10_000.0,
            sample_count: 10_000,
            target: NaifBody::SSB,
            observer: NaifBody::Sun,
            frame: ReferenceFrame::EclipJ2000,
            radius_body: NaifBody::Sun,
            plot: PlotSettings::default(),
        }
    }
}
