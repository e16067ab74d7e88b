//! Detail policy keyed on camera distance
//!
//! The host renderer feeds the camera-to-body distance in; the bucket tells
//! it how many segments to request from the path sampler. Geometry
//! construction itself lives with the renderer.

use serde::{Deserialize, Serialize};

/// Camera distance below which a body is considered close-up (AU)
pub const NEAR_DISTANCE: f64 = 5.0;

/// Camera distance beyond which a body is considered distant (AU)
pub const FAR_DISTANCE: f64 = 25.0;

/// Discrete detail bucket for path/mesh resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailLevel {
    Near,
    Mid,
    Far,
}

impl DetailLevel {
    /// Bucket for a camera distance in AU
    pub fn for_distance(distance: f64) -> Self {
        if distance < NEAR_DISTANCE {
            Self::Near
        } else if distance < FAR_DISTANCE {
            Self::Mid
        } else {
            Self::Far
        }
    }

    /// Segment count to request from the orbit path sampler
    pub fn segment_count(&self) -> usize {
        match self {
            Self::Near => 720,
            Self::Mid => 256,
            Self::Far => 96,
        }
    }
}
