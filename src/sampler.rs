//! Time sampling of ephemeris queries.
//!
//! [`linspace`] builds `N` evenly spaced ephemeris times over a closed
//! interval and [`sample_states`] issues one [`EphemerisQuery::state`] per
//! time, keeping the time order. The first failing query aborts the whole
//! run: a partial series is never returned.
//!
//! With the `progress` feature, long runs display an `indicatif` progress bar.
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::{
    barytrack_errors::BaryTrackError,
    constants::{EtSeconds, LightTime},
    ephemeris::{EphemerisQuery, StateVector},
    frames::ReferenceFrame,
    spk::naif_ids::NaifBody,
};

/// One query result of a sampling run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub et: EtSeconds,
    pub state: StateVector,
    pub light_time: LightTime,
}

/// Time ordered query results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    pub fn new(samples: Vec<Sample>) -> Self {
        SampleSeries { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn times(&self) -> Vec<EtSeconds> {
        self.samples.iter().map(|s| s.et).collect()
    }

    /// `(x, y)` position components, the input of the presenters.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.state.position.x, s.state.position.y))
            .collect()
    }

    /// New series with every state transformed by `f`, times unchanged.
    pub fn map_states<F>(&self, f: F) -> SampleSeries
    where
        F: Fn(&StateVector) -> StateVector,
    {
        SampleSeries::new(
            self.samples
                .iter()
                .map(|s| Sample {
                    state: f(&s.state),
                    ..*s
                })
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// What to sample: `count` states of `target` seen from `observer` in
/// `frame`, evenly spread over `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingPlan {
    pub target: NaifBody,
    pub observer: NaifBody,
    pub frame: ReferenceFrame,
    pub start: EtSeconds,
    pub end: EtSeconds,
    pub count: usize,
}

/// `count` evenly spaced values over `[start, end]`, both ends included.
///
/// Arguments
/// -----------------
/// * `start`, `end`: interval bounds (ET seconds).
/// * `count`: number of values, at least 1.
///
/// Return
/// ----------
/// * `[start]` when `count == 1`, otherwise strictly increasing values whose
///   last element is exactly `end`.
/// * [`BaryTrackError::InvalidSampleCount`] when `count == 0`,
///   [`BaryTrackError::InvalidTimeRange`] when `count >= 2` and the range
///   cannot hold `count` distinct increasing values.
pub fn linspace(
    start: EtSeconds,
    end: EtSeconds,
    count: usize,
) -> Result<Vec<EtSeconds>, BaryTrackError> {
    match count {
        0 => Err(BaryTrackError::InvalidSampleCount(count)),
        1 => Ok(vec![start]),
        _ if !start.is_finite() || !end.is_finite() || end <= start => {
            Err(BaryTrackError::InvalidTimeRange { start, end })
        }
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut times: Vec<EtSeconds> =
                (0..count).map(|i| start + i as f64 * step).collect();
            times[count - 1] = end;
            // a step below the resolution of `start` repeats values
            if times.windows(2).any(|w| w[0] >= w[1]) {
                return Err(BaryTrackError::InvalidTimeRange { start, end });
            }
            Ok(times)
        }
    }
}

/// Run the queries of `plan` in time order.
pub fn sample_states<Q>(query: &Q, plan: &SamplingPlan) -> Result<SampleSeries, BaryTrackError>
where
    Q: EphemerisQuery + ?Sized,
{
    let times = linspace(plan.start, plan.end, plan.count)?;
    info!(
        "sampling {} states of {} wrt {} in {}",
        times.len(),
        plan.target,
        plan.observer,
        plan.frame
    );

    #[cfg(feature = "progress")]
    let pb = {
        let pb = ProgressBar::new(times.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | {per_sec} | ETA {eta_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    };

    let mut samples = Vec::with_capacity(times.len());
    for et in times {
        let (state, light_time) = query.state(plan.target, et, plan.frame, plan.observer)?;
        samples.push(Sample {
            et,
            state,
            light_time,
        });

        #[cfg(feature = "progress")]
        pb.inc(1);
    }

    #[cfg(feature = "progress")]
    pb.finish_and_clear();

    Ok(SampleSeries::new(samples))
}
