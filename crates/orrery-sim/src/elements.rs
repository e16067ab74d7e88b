//! Keplerian orbital elements in normalized units
//!
//! The core runs with gravitational parameter μ = 1 and lengths in AU, so a
//! body at a = 1 AU completes one orbit in 2π simulation-time units. Unit
//! conversion lives at the display boundary (`orrery_core::constants`).

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Classical Keplerian orbital elements
///
/// Immutable once constructed; only closed ellipses (e < 1) are supported.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU, > 0)
    pub a: f64,
    /// Eccentricity (dimensionless, 0 ≤ e < 1)
    pub e: f64,
    /// Inclination (radians)
    pub i: f64,
    /// Longitude of ascending node Ω (radians)
    pub raan: f64,
    /// Argument of periapsis ω (radians)
    pub arg_periapsis: f64,
    /// Mean anomaly at epoch (radians)
    pub m0: f64,
    /// Reference epoch (simulation time)
    pub t0: f64,
}

impl OrbitalElements {
    /// Create validated elements
    pub fn new(
        a: f64,
        e: f64,
        i: f64,
        raan: f64,
        arg_periapsis: f64,
        m0: f64,
        t0: f64,
    ) -> SimResult<Self> {
        let elements = Self { a, e, i, raan, arg_periapsis, m0, t0 };
        elements.validate()?;
        Ok(elements)
    }

    /// Circular orbit of radius `a` in the reference plane
    pub fn circular(a: f64) -> SimResult<Self> {
        Self::new(a, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Check the closed-ellipse invariants
    ///
    /// Elements failing this never reach the registry.
    pub fn validate(&self) -> SimResult<()> {
        if !self.a.is_finite() || self.a <= 0.0 {
            return Err(SimError::InvalidElements(format!(
                "semi-major axis must be positive, got {}",
                self.a
            )));
        }
        if !self.e.is_finite() || self.e < 0.0 || self.e >= 1.0 {
            return Err(SimError::InvalidElements(format!(
                "eccentricity must be in [0, 1), got {}",
                self.e
            )));
        }
        for (name, value) in [
            ("inclination", self.i),
            ("raan", self.raan),
            ("arg_periapsis", self.arg_periapsis),
            ("m0", self.m0),
            ("t0", self.t0),
        ] {
            if !value.is_finite() {
                return Err(SimError::InvalidElements(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Mean motion n = sqrt(1/a³) (radians per sim-time unit)
    pub fn mean_motion(&self) -> f64 {
        (1.0 / self.a.powi(3)).sqrt()
    }

    /// Orbital period 2π·sqrt(a³) (sim-time units)
    pub fn period(&self) -> f64 {
        2.0 * PI * self.a.powi(3).sqrt()
    }

    /// Mean anomaly at simulation time `t`, normalized to [0, 2π)
    pub fn mean_anomaly_at(&self, t: f64) -> f64 {
        normalize_angle(self.m0 + self.mean_motion() * (t - self.t0))
    }

    /// Semi-latus rectum p = a(1 − e²)
    pub fn semi_latus_rectum(&self) -> f64 {
        self.a * (1.0 - self.e * self.e)
    }

    /// Closest approach distance a(1 − e)
    pub fn periapsis_distance(&self) -> f64 {
        self.a * (1.0 - self.e)
    }

    /// Farthest distance a(1 + e)
    pub fn apoapsis_distance(&self) -> f64 {
        self.a * (1.0 + self.e)
    }
}

/// Normalize angle to [0, 2π)
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a < 0.0 {
        a += TAU;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_open_trajectories() {
        assert!(matches!(
            OrbitalElements::new(1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            Err(SimError::InvalidElements(_))
        ));
        assert!(matches!(
            OrbitalElements::new(1.0, 1.7, 0.0, 0.0, 0.0, 0.0, 0.0),
            Err(SimError::InvalidElements(_))
        ));
        assert!(matches!(
            OrbitalElements::new(1.0, -0.1, 0.0, 0.0, 0.0, 0.0, 0.0),
            Err(SimError::InvalidElements(_))
        ));
    }

    #[test]
    fn test_rejects_nonpositive_semi_major_axis() {
        assert!(OrbitalElements::new(0.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0).is_err());
        assert!(OrbitalElements::new(-2.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0).is_err());
        assert!(OrbitalElements::new(f64::NAN, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_period_matches_mean_motion() {
        let elements = OrbitalElements::new(2.5, 0.3, 0.1, 0.2, 0.3, 0.0, 0.0).unwrap();
        let n = elements.mean_motion();
        assert!((elements.period() - TAU / n).abs() < 1e-12);
    }

    #[test]
    fn test_unit_orbit_period_is_two_pi() {
        let elements = OrbitalElements::circular(1.0).unwrap();
        assert!((elements.period() - TAU).abs() < 1e-12);
        assert!((elements.mean_motion() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_anomaly_advances_linearly() {
        let elements = OrbitalElements::new(1.0, 0.2, 0.0, 0.0, 0.0, 0.5, 1.0).unwrap();
        let n = elements.mean_motion();
        assert!((elements.mean_anomaly_at(1.0) - 0.5).abs() < 1e-12);
        assert!((elements.mean_anomaly_at(2.0) - normalize_angle(0.5 + n)).abs() < 1e-12);
        // Wraps into [0, 2π)
        let far = elements.mean_anomaly_at(1.0e4);
        assert!((0.0..TAU).contains(&far));
    }

    #[test]
    fn test_normalize_angle_range() {
        for angle in [-10.0, -TAU, -0.1, 0.0, 0.1, TAU, 123.456] {
            let a = normalize_angle(angle);
            assert!((0.0..TAU).contains(&a), "angle {} mapped to {}", angle, a);
        }
        assert!((normalize_angle(-0.1) - (TAU - 0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_serde_roundtrip_preserves_elements() {
        let elements = OrbitalElements::new(1.5, 0.2, 0.1, 0.2, 0.3, 0.4, 0.0).unwrap();
        let json = serde_json::to_string(&elements).unwrap();
        let back: OrbitalElements = serde_json::from_str(&json).unwrap();
        assert_eq!(elements, back);
    }

    #[test]
    fn test_apsis_distances() {
        let elements = OrbitalElements::new(2.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert!((elements.periapsis_distance() - 1.0).abs() < 1e-12);
        assert!((elements.apoapsis_distance() - 3.0).abs() < 1e-12);
        assert!((elements.semi_latus_rectum() - 1.5).abs() < 1e-12);
    }
}
