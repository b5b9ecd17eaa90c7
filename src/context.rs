//! # Ephemeris context: loaded kernels and the queries built on them
//!
//! [`EphemerisContext`] owns every kernel loaded for a run:
//!
//! 1. **SPK files** ([`SpkFile`]): Chebyshev trajectory segments.
//! 2. **Kernel pool** ([`KernelPool`]): variables of the LSK and PCK text kernels.
//! 3. **Leap seconds** ([`LeapSecondTable`]): rebuilt each time an LSK is loaded.
//!
//! The context is built once (see [`EphemerisContext::load`]) and only read
//! afterwards: it implements [`EphemerisQuery`] and [`TimeConverter`] with `&self`.
//!
//! ## State computation
//!
//! A segment gives the state of its `target` relative to its `center`. The
//! state of a body relative to the Solar System Barycentre is the sum of the
//! segments met while following the centers down to the SSB (code `0`):
//!
//! ```text
//! Earth(399) → EMB(3) → SSB(0)      state = s(399 wrt 3) + s(3 wrt 0)
//! ```
//!
//! and `state(target wrt observer) = state(target wrt SSB) - state(observer wrt SSB)`,
//! rotated from J2000 into the requested frame. When several segments cover
//! the same body and epoch, the segment loaded last is used.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use barytrack::config::KernelSet;
//! use barytrack::context::EphemerisContext;
//! use barytrack::ephemeris::EphemerisQuery;
//! use barytrack::frames::ReferenceFrame;
//! use barytrack::spk::naif_ids::NaifBody;
//! use barytrack::time::{TimeConverter, UtcTimestamp};
//!
//! let context = EphemerisContext::load(&KernelSet::from_env()).unwrap();
//! let et = context.utc_to_et(&"2000-01-01".parse::<UtcTimestamp>().unwrap()).unwrap();
//! let (state, light_time) = context
//!     .state(NaifBody::SSB, et, ReferenceFrame::EclipJ2000, NaifBody::Sun)
//!     .unwrap();
//! ```
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};

use crate::{
    barytrack_errors::BaryTrackError,
    config::KernelSet,
    constants::{EtSeconds, LightTime, VLIGHT},
    ephemeris::{EphemerisQuery, StateVector},
    frames::ReferenceFrame,
    kernels::{
        leap_seconds::LeapSecondTable, text_kernel::KernelPool, KernelKind,
    },
    spk::{
        naif_ids::NaifBody,
        spk_data::{SpkFile, SpkSegment},
    },
    time::{TimeConverter, UtcTimestamp},
};

/// Maximum number of segments chained from a body down to the SSB.
pub const MAX_CHAIN_DEPTH: usize = 20;

const SSB_ID: i32 = 0;

#[derive(Debug, Clone, Default)]
pub struct EphemerisContext {
    spk_files: Vec<SpkFile>,
    pool: KernelPool,
    leap_seconds: Option<LeapSecondTable>,
    loaded: Vec<(Utf8PathBuf, KernelKind)>,
}

impl EphemerisContext {
    /// Empty context, kernels are added with [`EphemerisContext::furnish`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every kernel of `kernels` exists, then load them in order.
    ///
    /// Arguments
    /// -----------------
    /// * `kernels`: leap seconds, trajectory and planetary constants kernels.
    ///
    /// Return
    /// ----------
    /// * The loaded context, or [`BaryTrackError::KernelNotFound`] naming the
    ///   first missing file before anything is read.
    pub fn load(kernels: &KernelSet) -> Result<Self, BaryTrackError> {
        kernels.validate()?;
        let mut context = Self::new();
        for path in kernels.paths() {
            context.furnish(path)?;
        }
        Ok(context)
    }

    /// Load one kernel, its kind is detected from the file content.
    pub fn furnish(&mut self, path: &Utf8Path) -> Result<(), BaryTrackError> {
        if !path.is_file() {
            return Err(BaryTrackError::KernelNotFound(path.to_string()));
        }

        let kind = KernelKind::detect(path)?;
        match kind {
            KernelKind::Trajectory => {
                let spk = SpkFile::read(path)?;
                debug!("{path}: {} SPK segments", spk.segments().len());
                self.spk_files.push(spk);
            }
            KernelKind::LeapSeconds | KernelKind::PlanetaryConstants => {
                self.pool.load(path)?;
                if kind == KernelKind::LeapSeconds {
                    let table = LeapSecondTable::from_pool(&self.pool)?;
                    debug!("{path}: {} leap second entries", table.entries().len());
                    self.leap_seconds = Some(table);
                }
            }
        }

        info!("loaded {kind} kernel {path}");
        self.loaded.push((path.to_path_buf(), kind));
        Ok(())
    }

    pub fn loaded_kernels(&self) -> &[(Utf8PathBuf, KernelKind)] {
        &self.loaded
    }

    pub fn kernel_pool(&self) -> &KernelPool {
        &self.pool
    }

    pub fn spk_files(&self) -> &[SpkFile] {
        &self.spk_files
    }

    /// Log the header and segment table of every loaded SPK file.
    pub fn describe(&self) {
        for spk in &self.spk_files {
            info!("SPK kernel content:\n{}", spk.info());
        }
    }

    /// Highest priority segment giving `body` at `et`.
    fn find_segment(&self, body: i32, et: EtSeconds) -> Option<&SpkSegment> {
        self.spk_files
            .iter()
            .rev()
            .flat_map(|spk| spk.segments().iter().rev())
            .find(|segment| segment.summary.target == body && segment.summary.covers(et))
    }

    /// Geometric J2000 state of `body` relative to the Solar System Barycentre.
    pub fn state_wrt_ssb(&self, body: i32, et: EtSeconds) -> Result<StateVector, BaryTrackError> {
        let mut state = StateVector::zeros();
        let mut current = body;
        let mut depth = 0;

        while current != SSB_ID {
            depth += 1;
            if depth > MAX_CHAIN_DEPTH {
                return Err(BaryTrackError::SegmentChainTooDeep(body));
            }

            let segment = self
                .find_segment(current, et)
                .ok_or(BaryTrackError::NoSegmentCoverage { body: current, et })?;
            let (position, velocity) = segment
                .evaluate(et)
                .ok_or(BaryTrackError::NoSegmentCoverage { body: current, et })?;

            state = state + StateVector::new(position, velocity);
            current = segment.summary.center;
        }
        Ok(state)
    }
}

impl EphemerisQuery for EphemerisContext {
    fn state(
        &self,
        target: NaifBody,
        et: EtSeconds,
        frame: ReferenceFrame,
        observer: NaifBody,
    ) -> Result<(StateVector, LightTime), BaryTrackError> {
        let relative =
            self.state_wrt_ssb(target.to_id(), et)? - self.state_wrt_ssb(observer.to_id(), et)?;
        let state = match frame {
            ReferenceFrame::J2000 => relative,
            _ => relative.rotated(&frame.rotation_from_j2000()),
        };
        let light_time = state.distance() / VLIGHT;
        Ok((state, light_time))
    }

    fn body_values(
        &self,
        body: NaifBody,
        item: &str,
        max_count: usize,
    ) -> Result<Vec<f64>, BaryTrackError> {
        self.pool.body_values(body.to_id(), item, max_count)
    }
}

impl TimeConverter for EphemerisContext {
    fn utc_to_et(&self, timestamp: &UtcTimestamp) -> Result<EtSeconds, BaryTrackError> {
        self.leap_seconds
            .as_ref()
            .ok_or(BaryTrackError::LeapSecondsNotLoaded)?
            .utc_to_et(timestamp)
    }
}
