//! Force laws and the pairwise accumulator
//!
//! Both laws share the inverse-square shape `K * p_a * p_b / max(|d|^2, eps2)`
//! and differ only in how the result is applied to the pair:
//! - Coulomb: a positive product (like charges) pushes the bodies apart
//! - Newtonian: always pulls the bodies together

use crate::error::{SimError, SimResult};
use crate::simulation::states::{Body, NVec2};

/// Inverse-square interaction selected when the engine is built
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceLaw {
    /// Signed charges, unit inertia. Like charges repel, unlike attract.
    Coulomb { k: f64, eps2: f64 },
    /// Positive masses, inertia equal to mass. Always attractive.
    Newtonian { g: f64, eps2: f64 },
}

/// Result of evaluating a law on one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairForce {
    /// `K * p_a * p_b / dist_sq`, sign carries the product's sign
    pub magnitude: f64,
    /// `magnitude * d / dist`, with `d = x_b - x_a`
    pub vector: NVec2,
}

impl ForceLaw {
    pub fn coulomb(k: f64, eps2: f64) -> Self {
        ForceLaw::Coulomb { k, eps2 }
    }

    pub fn newtonian(g: f64, eps2: f64) -> Self {
        ForceLaw::Newtonian { g, eps2 }
    }

    pub fn constant(&self) -> f64 {
        match *self {
            ForceLaw::Coulomb { k, .. } => k,
            ForceLaw::Newtonian { g, .. } => g,
        }
    }

    pub fn eps2(&self) -> f64 {
        match *self {
            ForceLaw::Coulomb { eps2, .. } | ForceLaw::Newtonian { eps2, .. } => eps2,
        }
    }

    /// The constant must be finite and the softening non-negative and finite
    pub fn validate(&self) -> SimResult<()> {
        let (k, eps2) = (self.constant(), self.eps2());
        if !k.is_finite() {
            return Err(SimError::validation(format!(
                "interaction constant must be finite, got {k}"
            )));
        }
        if !(eps2.is_finite() && eps2 >= 0.0) {
            return Err(SimError::validation(format!(
                "softening must be non-negative and finite, got {eps2}"
            )));
        }
        Ok(())
    }

    /// Inertia used when turning force into acceleration
    pub fn effective_mass(&self, body: &Body) -> f64 {
        match self {
            ForceLaw::Coulomb { .. } => 1.0,
            ForceLaw::Newtonian { .. } => body.q,
        }
    }

    /// Evaluate the law for bodies at `xa`, `xb` with couplings `pa`, `pb`
    pub fn pair_force(&self, xa: NVec2, pa: f64, xb: NVec2, pb: f64) -> PairForce {
        // d points from a to b
        let d = xb - xa;

        // Squared separation, floored at the softening value so the
        // magnitude stays bounded as the bodies coincide
        let dist_sq = d.norm_squared().max(self.eps2());
        let dist = dist_sq.sqrt();

        let magnitude = self.constant() * pa * pb / dist_sq;

        // Coincident bodies with eps2 == 0 would give 0/0 here
        let vector = if dist > 0.0 {
            d * (magnitude / dist)
        } else {
            NVec2::zeros()
        };

        PairForce { magnitude, vector }
    }

    /// Signed contribution to body a's accumulator; body b gets the negation
    fn on_first(&self, pf: &PairForce) -> NVec2 {
        match self {
            // positive magnitude is repulsion: a is pushed along -d
            ForceLaw::Coulomb { .. } => -pf.vector,
            // attraction: a is pulled along +d
            ForceLaw::Newtonian { .. } => pf.vector,
        }
    }

    /// Net force on `bodies[i]` from `bodies[j]`
    pub fn force_between(&self, bodies: &[Body], i: usize, j: usize) -> NVec2 {
        let (a, b) = (&bodies[i], &bodies[j]);
        let pf = self.pair_force(a.x, a.q, b.x, b.q);
        self.on_first(&pf)
    }
}

/// Reset every accumulator, then sum all pair forces into them.
/// Each unordered pair is evaluated once and applied equal and opposite.
pub fn accumulate_forces(law: &ForceLaw, bodies: &mut [Body]) {
    // Accumulators hold last step's sums until cleared
    for b in bodies.iter_mut() {
        b.f = NVec2::zeros();
    }

    let n = bodies.len();

    // Loop over each unordered pair (i, j) with i < j
    for i in 0..n {
        // Position and coupling of i are fixed for the inner loop
        let (xi, qi) = (bodies[i].x, bodies[i].q);

        for j in (i + 1)..n {
            // F = K * q_i * q_j / max(r^2, eps2), directed along r = x_j - x_i
            let pf = law.pair_force(xi, qi, bodies[j].x, bodies[j].q);

            // Force on i: along +r for gravity, along -r for like charges
            let fi = law.on_first(&pf);

            // Newton's third law: j gets exactly the opposite
            bodies[i].f += fi; // i feels fi
            bodies[j].f -= fi; // j feels -fi
        }
    }
}
