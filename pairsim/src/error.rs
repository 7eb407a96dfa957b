//! Error taxonomy shared by the engine, the scenario builder and the request API
//!
//! Every variant is raised before a run starts mutating state, so callers
//! never see a partially computed trajectory.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Malformed or missing input: non-finite coordinates, `dt <= 0`,
    /// negative step counts, negative jitter, bad config shapes
    Validation(String),
    /// Physically meaningless input, e.g. a zero mass under gravity
    Domain(String),
    /// Requested `bodies * steps` exceeds the configured ceiling
    ResourceLimit { requested: u128, limit: u64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "invalid input: {msg}"),
            Self::Domain(msg) => write!(f, "domain error: {msg}"),
            Self::ResourceLimit { requested, limit } => write!(
                f,
                "requested work of {requested} body-steps exceeds the limit of {limit}"
            ),
        }
    }
}

impl std::error::Error for SimError {}

impl SimError {
    pub fn validation(msg: impl Into<String>) -> Self {
        SimError::Validation(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        SimError::Domain(msg.into())
    }
}

pub type SimResult<T> = Result<T, SimError>;
