pub mod error;
pub mod physics;
pub mod render;
pub mod scenario;
pub mod simulation;
pub mod view;

pub use error::PhysicsError;
pub use physics::{Affect, Body, Position, GRAVITY, MIN_DISTANCE};
pub use scenario::{BodyConfig, ScenarioConfig};
pub use simulation::Simulation;
pub use view::{Camera, Readout, TimeControl, Trail, Trails};
