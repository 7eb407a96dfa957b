//! Fixed-step explicit Euler integrator
//!
//! One step: accumulate forces, `v += F/m * dt`, `x += v * dt`, add jitter,
//! then apply the boundary policy. Stateless between calls; everything it
//! needs lives in the body buffer passed in.

use rand::Rng;

use super::forces::{accumulate_forces, ForceLaw};
use super::params::{check_dt, check_jitter, Boundary};
use super::states::{Body, NVec2};
use crate::error::{SimError, SimResult};

/// Fail with a domain error if any body would divide by zero inertia
pub fn check_inertia(law: &ForceLaw, bodies: &[Body]) -> SimResult<()> {
    if let ForceLaw::Newtonian { .. } = law {
        if let Some(i) = bodies.iter().position(|b| b.q == 0.0) {
            return Err(SimError::domain(format!(
                "body {i} has zero mass; gravity needs a non-zero mass"
            )));
        }
    }
    Ok(())
}

/// Every position, velocity and coupling must be finite.
/// A NaN separation would otherwise be floored to `eps2` by `max`.
pub fn check_bodies(bodies: &[Body]) -> SimResult<()> {
    for (i, b) in bodies.iter().enumerate() {
        b.validate(i)?;
    }
    Ok(())
}

/// Advance `bodies` by one explicit Euler step of size `dt`.
/// Validates everything before the first mutation.
pub fn euler_integrator<R: Rng>(
    bodies: &mut [Body],
    law: &ForceLaw,
    dt: f64,
    boundary: &Boundary,
    jitter: f64,
    rng: &mut R,
) -> SimResult<()> {
    law.validate()?;
    check_dt(dt)?;
    check_jitter(jitter)?;
    boundary.validate()?;
    check_bodies(bodies)?;
    check_inertia(law, bodies)?;

    accumulate_forces(law, bodies);
    advance(bodies, law, dt, boundary, jitter, rng);
    Ok(())
}

/// Euler update for bodies whose accumulators are already populated.
/// Inputs are assumed valid.
pub(crate) fn advance<R: Rng>(
    bodies: &mut [Body],
    law: &ForceLaw,
    dt: f64,
    boundary: &Boundary,
    jitter: f64,
    rng: &mut R,
) {
    let half = 0.5 * jitter;

    for b in bodies.iter_mut() {
        // a = F / m, with m = 1 for charges and m = q for masses
        let a = b.f / law.effective_mass(b);

        // Velocity first: v(t + dt) = v(t) + a(t) * dt
        b.v += a * dt;

        // Position with the updated velocity: x(t + dt) = x(t) + v(t + dt) * dt
        b.x += b.v * dt;

        // Uniform offset in [-J/2, J/2] per axis, drawn fresh every step
        if half > 0.0 {
            b.x += NVec2::new(
                rng.random_range(-half..=half),
                rng.random_range(-half..=half),
            );
        }

        // Bounded boxes keep x in [0, extent]; free space leaves it alone
        if let Boundary::Bounded { extent } = boundary {
            reflect(b, extent);
        }
    }
}

/// Clamp into `[0, extent]` and flip the velocity on every axis that left it
fn reflect(b: &mut Body, extent: &NVec2) {
    for axis in 0..2 {
        let hi = extent[axis];
        if b.x[axis] < 0.0 {
            b.x[axis] = 0.0;
            b.v[axis] = -b.v[axis];
        } else if b.x[axis] > hi {
            b.x[axis] = hi;
            b.v[axis] = -b.v[axis];
        }
    }
}
