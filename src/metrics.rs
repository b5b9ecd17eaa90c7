//! Quantities derived from a sampled series.
use crate::{
    barytrack_errors::BaryTrackError,
    constants::Kilometer,
    ephemeris::EphemerisQuery,
    sampler::SampleSeries,
    spk::naif_ids::NaifBody,
};

/// Euclidean norm of each sampled position, in sample order.
pub fn distances(series: &SampleSeries) -> Vec<Kilometer> {
    series.iter().map(|sample| sample.state.distance()).collect()
}

/// `radius` if it is finite and strictly positive.
pub fn check_radius(radius: f64) -> Result<f64, BaryTrackError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(BaryTrackError::NonPositiveRadius(radius))
    }
}

/// Divide every position and velocity component by `radius`.
///
/// `radius` is checked with [`check_radius`] before any sample is touched.
pub fn scale_by_radius(series: &SampleSeries, radius: f64) -> Result<SampleSeries, BaryTrackError> {
    let radius = check_radius(radius)?;
    Ok(series.map_states(|state| state.scaled_down(radius)))
}

/// Equatorial radius (km) of `body`, first value of its `RADII` constant.
pub fn body_radius<Q>(query: &Q, body: NaifBody) -> Result<Kilometer, BaryTrackError>
where
    Q: EphemerisQuery + ?Sized,
{
    query
        .body_values(body, "RADII", 3)?
        .first()
        .copied()
        .ok_or_else(|| BaryTrackError::BodyConstantNotFound(format!("BODY{}_RADII", body.to_id())))
}
