//! Orbit propagation: (elements, simulation time) → world position
//!
//! Pure and deterministic: for fixed elements and time the result is
//! bit-for-bit reproducible, which is what makes scrubbing and rewinding
//! trivially correct. No wall clock, no RNG.

use crate::elements::OrbitalElements;
use crate::{frame, kepler};
use nalgebra::Vector3;
use orrery_core::coordinates::CartesianPosition;

/// World-frame position at simulation time `t`
pub fn position(elements: &OrbitalElements, t: f64) -> CartesianPosition {
    let m = elements.mean_anomaly_at(t);
    let sol = kepler::solve(m, elements.e);
    if !sol.converged {
        // e < 1 is enforced at construction, so this is a loud defect signal,
        // not an expected path. Proceed with the best estimate.
        tracing::warn!(
            mean_anomaly = m,
            eccentricity = elements.e,
            residual = sol.residual,
            "Kepler solver hit iteration cap, using best estimate"
        );
    }

    let ea = sol.eccentric_anomaly;
    let x = elements.a * (ea.cos() - elements.e);
    let y = elements.a * (1.0 - elements.e * elements.e).sqrt() * ea.sin();

    frame::to_world(x, y, elements.i, elements.raan, elements.arg_periapsis).into()
}

/// World-frame velocity at simulation time `t` (AU per sim-time unit)
pub fn velocity(elements: &OrbitalElements, t: f64) -> Vector3<f64> {
    let m = elements.mean_anomaly_at(t);
    let sol = kepler::solve(m, elements.e);
    let nu = kepler::true_anomaly(sol.eccentric_anomaly, elements.e);

    // μ = 1: specific angular momentum h = sqrt(p)
    let h = elements.semi_latus_rectum().sqrt();
    let vx = -nu.sin() / h;
    let vy = (elements.e + nu.cos()) / h;

    frame::to_world(vx, vy, elements.i, elements.raan, elements.arg_periapsis)
}

/// Orbital period 2π·sqrt(a³) (sim-time units)
pub fn period(elements: &OrbitalElements) -> f64 {
    elements.period()
}

/// Instantaneous angular speed = mean motion n (radians per sim-time unit)
pub fn angular_speed(elements: &OrbitalElements) -> f64 {
    elements.mean_motion()
}
