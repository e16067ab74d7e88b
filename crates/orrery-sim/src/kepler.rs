//! Kepler's equation solver
//!
//! Pure function, safe to call concurrently across bodies.

use crate::error::{SimError, SimResult};

/// Iteration cap. For e < 1 Newton-Raphson converges well inside this; the
/// cap is a safety bound, not an expected exit path.
pub const MAX_ITERATIONS: u32 = 10;

/// Early-exit threshold on the correction magnitude (radians)
pub const TOLERANCE: f64 = 1e-8;

/// Outcome of one Kepler solve
#[derive(Clone, Copy, Debug)]
pub struct KeplerSolution {
    /// Eccentric anomaly E (radians), best estimate if not converged
    pub eccentric_anomaly: f64,
    /// Whether the correction dropped below [`TOLERANCE`]
    pub converged: bool,
    /// Newton-Raphson iterations performed
    pub iterations: u32,
    /// Residual E − e·sin(E) − M at exit
    pub residual: f64,
}

impl KeplerSolution {
    /// Strict form: a non-converged solve becomes an error carrying the
    /// best-effort estimate. With validated elements (e < 1) this firing
    /// indicates a defect upstream.
    pub fn checked(self, mean_anomaly: f64, eccentricity: f64) -> SimResult<f64> {
        if self.converged {
            Ok(self.eccentric_anomaly)
        } else {
            Err(SimError::SolverNonConvergence {
                best_estimate: self.eccentric_anomaly,
                mean_anomaly,
                eccentricity,
            })
        }
    }
}

/// Solve Kepler's equation E − e·sin(E) = M for E
///
/// Newton-Raphson with initial guess E₀ = M.
pub fn solve(mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
    let m = mean_anomaly;
    let e = eccentricity;

    let mut ea = m;
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..MAX_ITERATIONS {
        let f = ea - e * ea.sin() - m;
        let fp = 1.0 - e * ea.cos();
        let delta = f / fp;
        ea -= delta;
        iterations += 1;

        if delta.abs() < TOLERANCE {
            converged = true;
            break;
        }
    }

    KeplerSolution {
        eccentric_anomaly: ea,
        converged,
        iterations,
        residual: ea - e * ea.sin() - m,
    }
}

/// True anomaly ν from eccentric anomaly, tan(ν/2) = sqrt((1+e)/(1−e))·tan(E/2)
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = ((1.0 + eccentricity) / (1.0 - eccentricity)).sqrt()
        * (eccentric_anomaly / 2.0).tan();
    2.0 * half.atan()
}
