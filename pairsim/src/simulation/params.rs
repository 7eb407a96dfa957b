//! Numerical and physical parameters for a run
//!
//! `Parameters` holds runtime settings:
//! - fixed step size, step count and jitter amplitude,
//! - boundary policy and the `bodies * steps` work ceiling,
//! - optional RNG seed for reproducible jitter

use crate::error::{SimError, SimResult};
use crate::simulation::states::NVec2;

/// Coulomb constant used by the interactive charge view
pub const COULOMB_CONSTANT: f64 = 500.0;
/// Minimum squared separation for the charge view (10 units)
pub const MIN_DIST_SQ: f64 = 100.0;
/// Default gravitational constant
pub const GRAVITY_G: f64 = 1.0;
/// Default gravity softening; small enough not to bite at unit separations
pub const GRAVITY_EPS2: f64 = 0.01;
/// Default `bodies * steps` ceiling for one batch run
pub const DEFAULT_MAX_WORK: u64 = 1_000_000;

/// Canvas-sized box used when a bounded scenario gives no extent
pub const DEFAULT_EXTENT: [f64; 2] = [800.0, 600.0];

pub const DEFAULT_DT: f64 = 0.1;
pub const DEFAULT_STEPS: usize = 100;

/// How bodies leaving the domain are handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Reflect the velocity component and clamp into `[0, extent]` per axis
    Bounded { extent: NVec2 },
    /// No domain, bodies travel freely
    Unbounded,
}

impl Boundary {
    pub fn validate(&self) -> SimResult<()> {
        if let Boundary::Bounded { extent } = self {
            if !extent.iter().all(|e| e.is_finite() && *e > 0.0) {
                return Err(SimError::validation(format!(
                    "boundary extent must be positive and finite, got [{}, {}]",
                    extent.x, extent.y
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,           // step size
    pub steps: usize,      // batch step count
    pub jitter: f64,       // jitter amplitude, full width
    pub boundary: Boundary,
    pub max_work: u64,     // bodies * steps ceiling
    pub seed: Option<u64>, // deterministic jitter seed
}

/// `dt` must be a positive finite number
pub fn check_dt(dt: f64) -> SimResult<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SimError::validation(format!("dt must be positive and finite, got {dt}")))
    }
}

/// Jitter amplitude must be a non-negative finite number
pub fn check_jitter(jitter: f64) -> SimResult<()> {
    if jitter.is_finite() && jitter >= 0.0 {
        Ok(())
    } else {
        Err(SimError::validation(format!(
            "jitter must be non-negative and finite, got {jitter}"
        )))
    }
}
