//! Batch trajectory recorder
//!
//! All checks (work ceiling, law constants, step size, jitter, body values,
//! masses) run
//! before the first force evaluation, so a rejected request costs no
//! floating-point work and never yields a partial trajectory.

use rand::Rng;

use super::engine::Engine;
use super::forces::accumulate_forces;
use super::integrator::{advance, check_bodies, check_inertia};
use super::params::{check_dt, check_jitter};
use super::states::{Body, System, Trajectory};
use crate::error::{SimError, SimResult};

/// Reject runs whose `bodies * steps` exceeds `limit`.
/// An empty body set still costs one unit per step.
pub fn check_work(n_bodies: usize, steps: usize, limit: u64) -> SimResult<()> {
    let requested = n_bodies.max(1) as u128 * steps as u128;
    if requested > limit as u128 {
        log::warn!("rejecting run: {n_bodies} bodies x {steps} steps exceeds limit {limit}");
        return Err(SimError::ResourceLimit { requested, limit });
    }
    Ok(())
}

pub fn record<R: Rng>(
    engine: &Engine,
    bodies: &[Body],
    dt: f64,
    steps: usize,
    jitter: f64,
    rng: &mut R,
) -> SimResult<Trajectory> {
    check_work(bodies.len(), steps, engine.max_work)?;
    engine.law.validate()?;
    check_dt(dt)?;
    check_jitter(jitter)?;
    engine.boundary.validate()?;
    check_bodies(bodies)?;
    check_inertia(&engine.law, bodies)?;

    log::debug!(
        "simulate: {} bodies, {} steps, dt = {}, jitter = {}",
        bodies.len(),
        steps,
        dt,
        jitter
    );

    // private copy, the caller's bodies stay untouched
    let mut sys = System::new(bodies.to_vec());
    let mut trajectory = Vec::with_capacity(steps);

    for _ in 0..steps {
        accumulate_forces(&engine.law, &mut sys.bodies);
        advance(&mut sys.bodies, &engine.law, dt, &engine.boundary, jitter, rng);
        sys.t += dt;
        trajectory.push(sys.snapshot());
    }

    log::debug!("simulate: finished at t = {}", sys.t);
    Ok(trajectory)
}
