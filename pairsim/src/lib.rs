pub mod simulation;
pub mod configuration;
pub mod api;
pub mod error;
pub mod logger;

pub use simulation::states::{Body, System, NVec2, Position, Trajectory};
pub use simulation::forces::{ForceLaw, PairForce, accumulate_forces};
pub use simulation::integrator::euler_integrator;
pub use simulation::params::{Boundary, Parameters};
pub use simulation::engine::Engine;
pub use simulation::scenario::{Scenario, random_bodies};

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, RandomConfig, ScenarioConfig, LawConfig, BoundaryConfig};

pub use api::request::{ApiConfig, SimulateRequest, SimulateResponse, handle_request, respond, Reply, Status};

pub use error::{SimError, SimResult};
