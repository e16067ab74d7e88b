//! Error types for the simulation core

use thiserror::Error;

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the simulation core
///
/// All variants are local and recoverable: the mutation is rejected and the
/// prior state is kept.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid orbital elements: {0}")]
    InvalidElements(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown body: {0}")]
    UnknownBody(String),

    #[error(
        "Kepler solver hit iteration cap (M={mean_anomaly}, e={eccentricity}, best E={best_estimate})"
    )]
    SolverNonConvergence {
        best_estimate: f64,
        mean_anomaly: f64,
        eccentricity: f64,
    },
}
