pub mod bodies;
pub mod clock;
pub mod elements;
pub mod error;
pub mod frame;
pub mod kepler;
pub mod path;
pub mod propagator;
pub mod registry;
pub mod selection;

pub use clock::{speeds, SharedClock, SimulationClock};
pub use elements::OrbitalElements;
pub use error::{SimError, SimResult};
pub use kepler::KeplerSolution;
pub use registry::{Body, BodyId, BodyRegistry, DisplayAttributes};
pub use selection::{SelectionStore, SubscriptionId};
