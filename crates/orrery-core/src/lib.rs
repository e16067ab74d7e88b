pub mod constants;
pub mod coordinates;
pub mod lod;


pub use coordinates::{CartesianPosition, SphericalPosition};
pub use lod::DetailLevel;
