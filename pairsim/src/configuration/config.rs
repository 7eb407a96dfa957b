//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – force law and boundary policy
//! - [`ParametersConfig`] – step size, step count, jitter and physical constants
//! - [`BodyConfig`]       – initial state for each explicitly listed body
//! - [`RandomConfig`]     – optional randomly generated bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example charge-view scenario matching these types:
//!
//! ```yaml
//! engine:
//!   law: "coulomb"          # or "newtonian"
//!   boundary: "bounded"     # or "unbounded"
//!
//! parameters:
//!   dt: 0.016               # fixed step size
//!   steps: 600              # batch step count
//!   jitter: 0.0             # position noise amplitude
//!   k: 500.0                # interaction constant
//!   min_dist: 10.0          # or eps2: 100.0
//!   extent: [800.0, 600.0]  # box for bounded runs
//!   max_work: 1000000       # bodies * steps ceiling
//!   seed: 7                 # deterministic jitter / placement
//!
//! bodies:
//!   - x: [ 100.0, 100.0 ]
//!     v: [   0.0,   0.0 ]
//!     q: 1.0
//!
//! random:
//!   count: 40
//!   charges: [1.0, -1.0]
//! ```
//!
//! Unset constants fall back to the law's defaults when the scenario is built.

use serde::Deserialize;

use crate::simulation::params::{DEFAULT_DT, DEFAULT_STEPS};

/// Which force law drives the scenario
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum LawConfig {
    #[serde(rename = "coulomb")] // signed charges, like charges repel
    Coulomb,

    #[serde(rename = "newtonian")] // positive masses, always attractive
    Newtonian,
}

/// How bodies leaving the box are handled
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundaryConfig {
    #[serde(rename = "bounded")] // reflect and clamp at `parameters.extent`
    Bounded,

    #[default]
    #[serde(rename = "unbounded")]
    Unbounded,
}

/// Engine-level configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub law: LawConfig,
    #[serde(default)]
    pub boundary: BoundaryConfig,
}

/// Numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub dt: f64,                 // time step size
    pub steps: usize,            // number of recorded steps
    pub jitter: f64,             // uniform position noise, full width
    pub k: Option<f64>,          // interaction constant, law default if unset
    pub eps2: Option<f64>,       // softening floor on squared distance
    pub min_dist: Option<f64>,   // alternative to eps2, squared on load
    pub extent: Option<Vec<f64>>, // [width, height] of the box
    pub max_work: Option<u64>,   // bodies * steps ceiling
    pub seed: Option<u64>,       // deterministic seed to make runs reproducible
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            steps: DEFAULT_STEPS,
            jitter: 0.0,
            k: None,
            eps2: None,
            min_dist: None,
            extent: None,
            max_work: None,
            seed: None,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position
    #[serde(default = "zero_velocity")]
    pub v: Vec<f64>, // initial velocity
    pub q: f64,      // mass or charge, depending on the law
}

fn zero_velocity() -> Vec<f64> {
    vec![0.0, 0.0]
}

/// Bodies scattered uniformly over the box, at rest
#[derive(Deserialize, Debug, Clone)]
pub struct RandomConfig {
    pub count: usize,
    #[serde(default = "unit_charges")]
    pub charges: Vec<f64>, // each body draws its q from this set
}

fn unit_charges() -> Vec<f64> {
    vec![1.0, -1.0]
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub random: Option<RandomConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml(src: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_scenario_uses_defaults() {
        let cfg = ScenarioConfig::from_yaml("engine:\n  law: newtonian\n").unwrap();
        assert_eq!(cfg.engine.law, LawConfig::Newtonian);
        assert_eq!(cfg.engine.boundary, BoundaryConfig::Unbounded);
        assert_eq!(cfg.parameters.dt, DEFAULT_DT);
        assert_eq!(cfg.parameters.steps, DEFAULT_STEPS);
        assert!(cfg.bodies.is_empty());
        assert!(cfg.random.is_none());
    }

    #[test]
    fn full_scenario_parses() {
        let src = r#"
engine:
  law: coulomb
  boundary: bounded
parameters:
  dt: 0.5
  steps: 3
  k: 2.0
  min_dist: 4.0
  extent: [100.0, 50.0]
  seed: 9
bodies:
  - x: [1.0, 2.0]
    q: -1.0
random:
  count: 5
"#;
        let cfg = ScenarioConfig::from_yaml(src).unwrap();
        assert_eq!(cfg.engine.law, LawConfig::Coulomb);
        assert_eq!(cfg.engine.boundary, BoundaryConfig::Bounded);
        assert_eq!(cfg.parameters.steps, 3);
        assert_eq!(cfg.parameters.min_dist, Some(4.0));
        assert_eq!(cfg.bodies[0].v, vec![0.0, 0.0]);
        assert_eq!(cfg.random.as_ref().unwrap().charges, vec![1.0, -1.0]);
    }

    #[test]
    fn unknown_law_is_rejected() {
        assert!(ScenarioConfig::from_yaml("engine:\n  law: magnetic\n").is_err());
    }
}
