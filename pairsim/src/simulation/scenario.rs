//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - the engine (`Engine`: force law, boundary, work ceiling)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//!
//! Config values are validated here so the engine only ever sees
//! well-formed bodies and constants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{BodyConfig, BoundaryConfig, LawConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::engine::Engine;
use crate::simulation::forces::ForceLaw;
use crate::simulation::params::{
    check_dt, check_jitter, Boundary, Parameters, COULOMB_CONSTANT, DEFAULT_EXTENT,
    DEFAULT_MAX_WORK, GRAVITY_EPS2, GRAVITY_G, MIN_DIST_SQ,
};
use crate::simulation::states::{Body, NVec2, System, Trajectory};

/// Runtime bundle built from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let p_cfg = &cfg.parameters;
        check_dt(p_cfg.dt)?;
        check_jitter(p_cfg.jitter)?;

        // Law defaults: canvas-scale charges or unit gravity
        let (k_default, eps2_default) = match cfg.engine.law {
            LawConfig::Coulomb => (COULOMB_CONSTANT, MIN_DIST_SQ),
            LawConfig::Newtonian => (GRAVITY_G, GRAVITY_EPS2),
        };
        let k = p_cfg.k.unwrap_or(k_default);
        let eps2 = match (p_cfg.eps2, p_cfg.min_dist) {
            (Some(_), Some(_)) => {
                return Err(SimError::validation("set either eps2 or min_dist, not both"))
            }
            (Some(e), None) => e,
            (None, Some(d)) => d * d,
            (None, None) => eps2_default,
        };
        let law = match cfg.engine.law {
            LawConfig::Coulomb => ForceLaw::coulomb(k, eps2),
            LawConfig::Newtonian => ForceLaw::newtonian(k, eps2),
        };
        law.validate()?;

        let extent = match &p_cfg.extent {
            Some(e) => vec2(e, "extent")?,
            None => NVec2::from(DEFAULT_EXTENT),
        };
        let boundary = match cfg.engine.boundary {
            BoundaryConfig::Bounded => Boundary::Bounded { extent },
            BoundaryConfig::Unbounded => Boundary::Unbounded,
        };
        boundary.validate()?;

        let parameters = Parameters {
            dt: p_cfg.dt,
            steps: p_cfg.steps,
            jitter: p_cfg.jitter,
            boundary,
            max_work: p_cfg.max_work.unwrap_or(DEFAULT_MAX_WORK),
            seed: p_cfg.seed,
        };

        // Bodies: explicit list first, generated ones appended
        let mut bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| body_from_config(i, bc))
            .collect::<SimResult<Vec<Body>>>()?;

        if let Some(r_cfg) = &cfg.random {
            let mut rng = seeded_rng(parameters.seed);
            bodies.extend(random_bodies(r_cfg.count, extent, &r_cfg.charges, &mut rng)?);
        }

        log::info!(
            "scenario: {:?} law, {} bodies, dt = {}, steps = {}",
            cfg.engine.law,
            bodies.len(),
            parameters.dt,
            parameters.steps
        );

        Ok(Self {
            engine: Engine::from_parameters(law, &parameters),
            parameters,
            system: System::new(bodies),
        })
    }

    /// Batch run of the configured step count
    pub fn run(&self) -> SimResult<Trajectory> {
        let mut rng = seeded_rng(self.parameters.seed);
        self.engine.simulate(
            &self.system.bodies,
            self.parameters.dt,
            self.parameters.steps,
            self.parameters.jitter,
            &mut rng,
        )
    }

    /// RNG for jitter during a run, deterministic when a seed is set
    pub fn rng(&self) -> StdRng {
        seeded_rng(self.parameters.seed)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

fn vec2(values: &[f64], what: &str) -> SimResult<NVec2> {
    match values {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(SimError::validation(format!(
            "{what} needs exactly 2 components, got {}",
            values.len()
        ))),
    }
}

fn body_from_config(i: usize, bc: &BodyConfig) -> SimResult<Body> {
    let body = Body::new(
        vec2(&bc.x, &format!("body {i} position"))?,
        vec2(&bc.v, &format!("body {i} velocity"))?,
        bc.q,
    );
    body.validate(i)?;
    Ok(body)
}

/// `count` bodies at rest, uniformly placed in `[0, extent]`, each taking a
/// coupling drawn uniformly from `charges`
pub fn random_bodies<R: Rng>(
    count: usize,
    extent: NVec2,
    charges: &[f64],
    rng: &mut R,
) -> SimResult<Vec<Body>> {
    if count > 0 && charges.is_empty() {
        return Err(SimError::validation("random bodies need at least one charge value"));
    }
    Boundary::Bounded { extent }.validate()?;
    if let Some(c) = charges.iter().find(|c| !c.is_finite()) {
        return Err(SimError::validation(format!("random charge {c} is not finite")));
    }

    let bodies = (0..count)
        .map(|_| {
            let x = rng.random_range(0.0..=extent.x);
            let y = rng.random_range(0.0..=extent.y);
            let q = charges[rng.random_range(0..charges.len())];
            Body::at_rest(x, y, q)
        })
        .collect();

    Ok(bodies)
}
