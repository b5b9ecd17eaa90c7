//! State vectors and the ephemeris query interface.
//!
//! [`EphemerisQuery`] is the seam between the pipeline and the kernel
//! readers: [`crate::context::EphemerisContext`] implements it on top of the
//! loaded SPK and PCK kernels, tests substitute deterministic fakes.
use std::ops::{Add, Sub};

use nalgebra::{Rotation3, Vector3};

use crate::{
    barytrack_errors::BaryTrackError,
    constants::{EtSeconds, Kilometer, LightTime},
    frames::ReferenceFrame,
    spk::naif_ids::NaifBody,
};

/// Position (km) and velocity (km/s) of a body relative to an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    pub fn zeros() -> Self {
        StateVector::new(Vector3::zeros(), Vector3::zeros())
    }

    /// Euclidean norm of the position.
    pub fn distance(&self) -> Kilometer {
        self.position.norm()
    }

    pub fn rotated(&self, rotation: &Rotation3<f64>) -> Self {
        StateVector::new(rotation * self.position, rotation * self.velocity)
    }

    /// Every component divided by `factor`.
    pub fn scaled_down(&self, factor: f64) -> Self {
        StateVector::new(self.position / factor, self.velocity / factor)
    }

    /// Every component multiplied by `factor`.
    pub fn scaled_up(&self, factor: f64) -> Self {
        StateVector::new(self.position * factor, self.velocity * factor)
    }

    /// The six components `[x, y, z, vx, vy, vz]`.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        ]
    }
}

impl Add for StateVector {
    type Output = StateVector;

    fn add(self, rhs: StateVector) -> StateVector {
        StateVector::new(self.position + rhs.position, self.velocity + rhs.velocity)
    }
}

impl Sub for StateVector {
    type Output = StateVector;

    fn sub(self, rhs: StateVector) -> StateVector {
        StateVector::new(self.position - rhs.position, self.velocity - rhs.velocity)
    }
}

/// Ephemeris capability consumed by the sampler and the pipeline.
pub trait EphemerisQuery {
    /// Geometric state of `target` relative to `observer` at `et`, expressed
    /// in `frame`, with the one-way light time between them.
    fn state(
        &self,
        target: NaifBody,
        et: EtSeconds,
        frame: ReferenceFrame,
        observer: NaifBody,
    ) -> Result<(StateVector, LightTime), BaryTrackError>;

    /// Position only, see [`EphemerisQuery::state`].
    fn position(
        &self,
        target: NaifBody,
        et: EtSeconds,
        frame: ReferenceFrame,
        observer: NaifBody,
    ) -> Result<(Vector3<f64>, LightTime), BaryTrackError> {
        self.state(target, et, frame, observer)
            .map(|(state, light_time)| (state.position, light_time))
    }

    /// Values of a body constant such as `RADII`, at most `max_count` of them.
    fn body_values(
        &self,
        body: NaifBody,
        item: &str,
        max_count: usize,
    ) -> Result<Vec<f64>, BaryTrackError>;
}

#[cfg(test)]
mod test_state_vector {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = StateVector::new(Vector3::new(1.0, 2.0, 2.0), Vector3::new(0.1, 0.2, 0.3));
        let b = StateVector::new(Vector3::new(0.5, 0.5, 0.5), Vector3::new(0.1, 0.1, 0.1));

        assert_eq!(a.distance(), 3.0);
        assert_relative_eq!((a - b).position, Vector3::new(0.5, 1.5, 1.5));
        assert_relative_eq!((a + b - b).velocity, a.velocity, epsilon = 1e-15);
        assert_eq!(a.scaled_down(2.0).to_array(), [0.5, 1.0, 1.0, 0.05, 0.1, 0.15]);
        assert_relative_eq!(a.scaled_down(7.0).scaled_up(7.0).position, a.position);
        assert_eq!(StateVector::zeros().distance(), 0.0);
    }

    #[test]
    fn test_rotated() {
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        let state = StateVector::new(Vector3::x(), Vector3::y());
        let rotated = state.rotated(&rotation);
        assert_relative_eq!(rotated.position, Vector3::y(), epsilon = 1e-15);
        assert_relative_eq!(rotated.velocity, -Vector3::x(), epsilon = 1e-15);
    }
}
