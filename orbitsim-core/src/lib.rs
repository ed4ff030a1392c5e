pub mod config;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod simulation;
pub mod trail;

pub use config::{to_scene, ConstantsConfig, ScenarioConfig};
pub use engine::{Body, BodySpec, CentralMass, MassConvention, SimConstants};
pub use error::{SimError, SimResult};
pub use integrator::{acceleration, step, StepResult};
pub use simulation::{BodyId, BodySlot, Simulation, TickReport};
pub use trail::Trail;

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
