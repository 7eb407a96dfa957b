//! Core state types for the pairwise simulation.
//!
//! - `Body`     point body with position, velocity, scalar coupling `q`
//!              and a transient force accumulator
//! - `System`   ordered body buffer plus elapsed simulation time
//! - `Position` plain `{x, y}` snapshot used by recorded trajectories
//!
//! Body identity is its index in `System::bodies`.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub q: f64,   // mass (newtonian) or signed charge (coulomb)
    pub f: NVec2, // force accumulator, reset every step
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, q: f64) -> Self {
        Self {
            x,
            v,
            q,
            f: NVec2::zeros(),
        }
    }

    /// Body at rest carrying `q`
    pub fn at_rest(x: f64, y: f64, q: f64) -> Self {
        Self::new(NVec2::new(x, y), NVec2::zeros(), q)
    }

    /// Reject NaN / infinite position, velocity or coupling
    pub fn validate(&self, index: usize) -> SimResult<()> {
        let finite = self.x.iter().chain(self.v.iter()).all(|c| c.is_finite());
        if !finite {
            return Err(SimError::validation(format!(
                "body {index} has a non-finite position or velocity"
            )));
        }
        if !self.q.is_finite() {
            return Err(SimError::validation(format!(
                "body {index} has a non-finite mass/charge"
            )));
        }
        Ok(())
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.x.x,
            y: self.x.y,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // ordered body buffer
    pub t: f64,            // elapsed time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    /// Positions of all bodies in index order
    pub fn snapshot(&self) -> Vec<Position> {
        self.bodies.iter().map(Body::position).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One snapshot per integration step, each parallel to the input body order
pub type Trajectory = Vec<Vec<Position>>;
