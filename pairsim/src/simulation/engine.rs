//! Runtime engine: a force law, a boundary policy and a work ceiling
//!
//! The engine owns no body state. Real-time callers pass their own buffer
//! into [`Engine::step`] once per frame; batch callers hand a slice to
//! [`Engine::simulate`], which works on a private copy.

use rand::Rng;

use super::forces::{accumulate_forces, ForceLaw};
use super::integrator::euler_integrator;
use super::params::{Boundary, Parameters, DEFAULT_MAX_WORK};
use super::states::{Body, Trajectory};
use super::trajectory::record;
use crate::error::SimResult;

#[derive(Debug, Clone)]
pub struct Engine {
    pub law: ForceLaw,      // coulomb or newtonian
    pub boundary: Boundary, // bounded box or free space
    pub max_work: u64,      // bodies * steps ceiling for `simulate`
    pub jitter: f64,        // jitter applied by `step`
}

impl Engine {
    pub fn new(law: ForceLaw, boundary: Boundary) -> Self {
        Self {
            law,
            boundary,
            max_work: DEFAULT_MAX_WORK,
            jitter: 0.0,
        }
    }

    /// Unbounded gravity engine for batch trajectories
    pub fn newtonian(g: f64, eps2: f64) -> Self {
        Self::new(ForceLaw::newtonian(g, eps2), Boundary::Unbounded)
    }

    /// Coulomb engine confined to `[0, extent]` on both axes
    pub fn coulomb_bounded(k: f64, eps2: f64, width: f64, height: f64) -> Self {
        Self::new(
            ForceLaw::coulomb(k, eps2),
            Boundary::Bounded {
                extent: [width, height].into(),
            },
        )
    }

    /// Engine for a law using the constants, boundary and ceiling in `params`
    pub fn from_parameters(law: ForceLaw, params: &Parameters) -> Self {
        Self::new(law, params.boundary)
            .with_max_work(params.max_work)
            .with_jitter(params.jitter)
    }

    pub fn with_max_work(mut self, max_work: u64) -> Self {
        self.max_work = max_work;
        self
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Populate every body's force accumulator from the current positions
    pub fn compute_forces(&self, bodies: &mut [Body]) {
        accumulate_forces(&self.law, bodies);
    }

    /// Advance `bodies` by one Euler step with an explicit jitter amplitude
    pub fn integrate<R: Rng>(
        &self,
        bodies: &mut [Body],
        dt: f64,
        jitter: f64,
        rng: &mut R,
    ) -> SimResult<()> {
        euler_integrator(bodies, &self.law, dt, &self.boundary, jitter, rng)
    }

    /// Real-time frame step: mutate the caller's buffer for exactly one step.
    /// `dt` is usually the wall-clock time since the previous frame.
    pub fn step<R: Rng>(&self, bodies: &mut [Body], dt: f64, rng: &mut R) -> SimResult<()> {
        self.integrate(bodies, dt, self.jitter, rng)
    }

    /// Batch run: `steps` Euler steps on a copy of `bodies`, recording every
    /// body's position after each step. `bodies` is never mutated.
    pub fn simulate<R: Rng>(
        &self,
        bodies: &[Body],
        dt: f64,
        steps: usize,
        jitter: f64,
        rng: &mut R,
    ) -> SimResult<Trajectory> {
        record(self, bodies, dt, steps, jitter, rng)
    }
}
