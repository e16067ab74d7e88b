//! Orbit path sampling for line rendering
//!
//! The orbit shape is time-invariant, so the sampled polyline is computed
//! once per body and cached by the registry rather than rebuilt per frame.

use crate::elements::OrbitalElements;
use crate::error::{SimError, SimResult};
use crate::frame;
use nalgebra::Vector3;
use orrery_core::coordinates::CartesianPosition;
use std::f64::consts::TAU;

/// Sample the orbit as a closed polyline of `segments` evenly spaced true
/// anomalies. Returns `segments + 1` points, the first repeated at the end
/// so the loop closes.
///
/// Uses the polar ellipse equation r(θ) = a(1−e²)/(1+e·cosθ) about the
/// focus, then rotates each point into the world frame.
pub fn sample_path(
    elements: &OrbitalElements,
    segments: usize,
) -> SimResult<Vec<CartesianPosition>> {
    if segments < 3 {
        return Err(SimError::InvalidArgument(format!(
            "segments must be at least 3 to form a closed loop, got {}",
            segments
        )));
    }

    let rotation = frame::perifocal_to_world(elements.i, elements.raan, elements.arg_periapsis);
    let p = elements.semi_latus_rectum();

    let mut points = Vec::with_capacity(segments + 1);
    for k in 0..segments {
        let theta = k as f64 / segments as f64 * TAU;
        let r = p / (1.0 + elements.e * theta.cos());
        let world = rotation * Vector3::new(r * theta.cos(), r * theta.sin(), 0.0);
        points.push(CartesianPosition::from(world));
    }
    points.push(points[0]);

    Ok(points)
}
