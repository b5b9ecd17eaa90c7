//! End-to-end SSB wrt Sun run.
//!
//! The stages run in the order below, each failure is reported with the
//! stage that produced it:
//!
//! | stage        | work                                                          |
//! |--------------|---------------------------------------------------------------|
//! | `conversion` | start timestamp → ET, end = start + span                      |
//! | `scaling`    | radius of the reference body, checked before any query        |
//! | `sampling`   | `N` states of the target wrt the observer                     |
//! | `scaling`    | distances and scaled series                                   |
//! | `rendering`  | `(x, y)` of the scaled series handed to the presenter         |
use std::fmt;

use log::info;
use thiserror::Error;

use crate::{
    barytrack_errors::BaryTrackError,
    config::SsbScenario,
    constants::{EtSeconds, Kilometer, SECONDS_PER_DAY},
    ephemeris::EphemerisQuery,
    metrics::{body_radius, check_radius, distances, scale_by_radius},
    plot::TrajectoryPresenter,
    sampler::{sample_states, SampleSeries, SamplingPlan},
    time::TimeConverter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Conversion,
    Sampling,
    Scaling,
    Rendering,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Conversion => "conversion",
            PipelineStage::Sampling => "sampling",
            PipelineStage::Scaling => "scaling",
            PipelineStage::Rendering => "rendering",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    #[source]
    pub source: BaryTrackError,
}

trait AtStage<T> {
    fn at(self, stage: PipelineStage) -> Result<T, PipelineError>;
}

impl<T> AtStage<T> for Result<T, BaryTrackError> {
    fn at(self, stage: PipelineStage) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError { stage, source })
    }
}

/// Everything computed by a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub start_et: EtSeconds,
    pub end_et: EtSeconds,
    pub series: SampleSeries,
    pub distances: Vec<Kilometer>,
    pub radius: Kilometer,
    pub scaled: SampleSeries,
}

/// Collaborators of a run: ephemeris queries, UTC conversion and rendering.
pub struct SsbPipeline<'a, Q: ?Sized, T: ?Sized, P: ?Sized> {
    pub query: &'a Q,
    pub converter: &'a T,
    pub presenter: &'a P,
}

impl<'a, Q, T, P> SsbPipeline<'a, Q, T, P>
where
    Q: EphemerisQuery + ?Sized,
    T: TimeConverter + ?Sized,
    P: TrajectoryPresenter + ?Sized,
{
    pub fn new(query: &'a Q, converter: &'a T, presenter: &'a P) -> Self {
        SsbPipeline {
            query,
            converter,
            presenter,
        }
    }

    pub fn run(&self, scenario: &SsbScenario) -> Result<PipelineReport, PipelineError> {
        // --- conversion
        let start_et = self
            .converter
            .utc_to_et(&scenario.start)
            .at(PipelineStage::Conversion)?;
        let end_et = start_et + scenario.span_days * SECONDS_PER_DAY;
        info!(
            "{} UTC is ET {start_et:.6}, sampling until ET {end_et:.6}",
            scenario.start
        );

        // radius checked before any state query
        let radius = body_radius(self.query, scenario.radius_body)
            .and_then(check_radius)
            .at(PipelineStage::Scaling)?;
        info!("{} radius: {radius} km", scenario.radius_body);

        // --- sampling
        let plan = SamplingPlan {
            target: scenario.target,
            observer: scenario.observer,
            frame: scenario.frame,
            start: start_et,
            end: end_et,
            count: scenario.sample_count,
        };
        let series = sample_states(self.query, &plan).at(PipelineStage::Sampling)?;

        // --- scaling
        let distances = distances(&series);
        let scaled = scale_by_radius(&series, radius).at(PipelineStage::Scaling)?;

        // --- rendering
        self.presenter
            .present(&scaled.xy(), 1.0)
            .at(PipelineStage::Rendering)?;

        Ok(PipelineReport {
            start_et,
            end_et,
            series,
            distances,
            radius,
            scaled,
        })
    }
}

#[cfg(test)]
mod test_pipeline {
    use super::*;

    #[test]
    fn test_error_display_names_stage() {
        let err = PipelineError {
            stage: PipelineStage::Conversion,
            source: BaryTrackError::LeapSecondsNotLoaded,
        };
        assert_eq!(
            err.to_string(),
            "conversion failed: No leap seconds kernel loaded, cannot convert UTC to ephemeris time"
        );

        let err = Err::<(), _>(BaryTrackError::NonPositiveRadius(0.0))
            .at(PipelineStage::Scaling)
            .unwrap_err();
        assert_eq!(err.stage, PipelineStage::Scaling);
        assert!(err.to_string().starts_with("scaling failed: "));
        assert_eq!(PipelineStage::Rendering.to_string(), "rendering");
    }
}
