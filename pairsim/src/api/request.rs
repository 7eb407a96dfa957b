//! JSON payloads for the batch trajectory endpoint
//!
//! Request:  `{"bodies": [{"mass", "x", "y", "vx", "vy"}], "dt": 0.1, "steps": 100, "jitter": 0}`
//! Response: `{"positions": [[{"x", "y"}, ...], ...]}` or `{"error": "..."}`
//!
//! Transport (routing, status lines) belongs to whoever embeds this; the
//! handler only decides between success and client error.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::simulation::engine::Engine;
use crate::simulation::params::{DEFAULT_DT, DEFAULT_MAX_WORK, DEFAULT_STEPS, GRAVITY_EPS2, GRAVITY_G};
use crate::simulation::states::{Body, NVec2, Trajectory};

/// Server-side constants; the request never carries these
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub g: f64,
    pub eps2: f64,
    pub max_work: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            g: GRAVITY_G,
            eps2: GRAVITY_EPS2,
            max_work: DEFAULT_MAX_WORK,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SimulateRequest {
    pub bodies: Option<Vec<BodyPayload>>,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_steps")]
    pub steps: i64, // signed so negative counts get a proper message
    #[serde(default)]
    pub jitter: f64,
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_steps() -> i64 {
    DEFAULT_STEPS as i64
}

/// Fields are optional here so a missing one is reported by name
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BodyPayload {
    pub mass: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub vx: Option<f64>,
    pub vy: Option<f64>,
}

impl BodyPayload {
    fn to_body(&self, index: usize) -> Result<Body, SimError> {
        let field = |v: Option<f64>, name: &str| {
            v.ok_or_else(|| SimError::validation(format!("body {index} is missing field `{name}`")))
        };
        let body = Body::new(
            NVec2::new(field(self.x, "x")?, field(self.y, "y")?),
            NVec2::new(field(self.vx, "vx")?, field(self.vy, "vy")?),
            field(self.mass, "mass")?,
        );
        body.validate(index)?;
        Ok(body)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulateResponse {
    pub positions: Trajectory,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Everything the endpoint rejects; all of it is the client's fault
#[derive(Debug)]
pub enum ApiError {
    /// Not JSON, or a field of the wrong type
    Malformed(serde_json::Error),
    /// Well-formed but rejected by the engine
    Sim(SimError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed request: {err}"),
            Self::Sim(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err)
    }
}

impl From<SimError> for ApiError {
    fn from(err: SimError) -> Self {
        ApiError::Sim(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    ClientError,
}

/// Serialized reply plus the outcome class for the transport to map
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: Status,
    pub body: String,
}

impl SimulateRequest {
    /// Validate the payload into engine inputs: bodies and a step count
    pub fn into_inputs(self) -> Result<(Vec<Body>, usize), SimError> {
        let payload = self
            .bodies
            .ok_or_else(|| SimError::validation("missing field `bodies`"))?;
        if self.steps < 0 {
            return Err(SimError::validation(format!(
                "steps must be non-negative, got {}",
                self.steps
            )));
        }
        let steps = usize::try_from(self.steps)
            .map_err(|_| SimError::validation(format!("steps out of range: {}", self.steps)))?;
        let bodies = payload
            .iter()
            .enumerate()
            .map(|(i, b)| b.to_body(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((bodies, steps))
    }
}

/// Parse, validate and run one request
pub fn handle_request<R: Rng>(
    cfg: &ApiConfig,
    raw: &str,
    rng: &mut R,
) -> Result<SimulateResponse, ApiError> {
    let req: SimulateRequest = serde_json::from_str(raw)?;
    let (dt, jitter) = (req.dt, req.jitter);
    let (bodies, steps) = req.into_inputs()?;

    let engine = Engine::newtonian(cfg.g, cfg.eps2).with_max_work(cfg.max_work);
    let positions = engine.simulate(&bodies, dt, steps, jitter, rng)?;
    Ok(SimulateResponse { positions })
}

/// [`handle_request`] with the outcome serialized for the wire.
/// Errors carry only their message.
pub fn respond<R: Rng>(cfg: &ApiConfig, raw: &str, rng: &mut R) -> Reply {
    let (status, body) = match handle_request(cfg, raw, rng) {
        Ok(resp) => (Status::Ok, serde_json::to_string(&resp)),
        Err(e) => {
            log::info!("client error: {e}");
            (Status::ClientError, serde_json::to_string(&ErrorResponse { error: e.to_string() }))
        }
    };
    let body = body.unwrap_or_else(|_| String::from("{\"error\":\"internal serialization failure\"}"));
    Reply { status, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    fn error_of(raw: &str) -> String {
        let reply = respond(&ApiConfig::default(), raw, &mut rng());
        assert_eq!(reply.status, Status::ClientError, "{}", reply.body);
        let v: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        v["error"].as_str().unwrap().to_string()
    }

    #[test]
    fn defaults_apply() {
        let req: SimulateRequest = serde_json::from_str(r#"{"bodies": []}"#).unwrap();
        assert_eq!(req.dt, 0.1);
        assert_eq!(req.steps, 100);
        assert_eq!(req.jitter, 0.0);
    }

    #[test]
    fn two_body_request_returns_positions() {
        let raw = r#"{
            "bodies": [
                {"mass": 1, "x": 0, "y": 0, "vx": 0, "vy": 0},
                {"mass": 1, "x": 10, "y": 0, "vx": 0, "vy": 0}
            ],
            "dt": 1, "steps": 1, "jitter": 0
        }"#;
        let resp = handle_request(&ApiConfig::default(), raw, &mut rng()).unwrap();
        assert_eq!(resp.positions.len(), 1);
        assert!((resp.positions[0][0].x - 0.01).abs() < 1e-12);
        assert!((resp.positions[0][1].x - 9.99).abs() < 1e-12);
    }

    #[test]
    fn reply_shape_is_positions() {
        let raw = r#"{"bodies": [{"mass": 2, "x": 1, "y": 2, "vx": 0, "vy": 0}], "steps": 2}"#;
        let reply = respond(&ApiConfig::default(), raw, &mut rng());
        assert_eq!(reply.status, Status::Ok);
        let v: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(v["positions"].as_array().unwrap().len(), 2);
        assert_eq!(v["positions"][1][0]["x"], 1.0);
        assert_eq!(v["positions"][1][0]["y"], 2.0);
    }

    #[test]
    fn missing_field_is_named() {
        let msg = error_of(r#"{"bodies": [{"mass": 1, "x": 0, "vx": 0, "vy": 0}]}"#);
        assert!(msg.contains("`y`"), "{msg}");
        assert!(msg.contains("body 0"), "{msg}");
    }

    #[test]
    fn missing_bodies_is_client_error() {
        assert!(error_of(r#"{"dt": 0.1}"#).contains("bodies"));
    }

    #[test]
    fn negative_steps_is_client_error() {
        let msg = error_of(r#"{"bodies": [], "steps": -1}"#);
        assert!(msg.contains("non-negative"), "{msg}");
    }

    #[test]
    fn non_positive_dt_is_client_error() {
        assert!(error_of(r#"{"bodies": [], "dt": 0}"#).contains("dt"));
        assert!(error_of(r#"{"bodies": [], "dt": -0.5}"#).contains("dt"));
    }

    #[test]
    fn zero_mass_is_client_error() {
        let msg = error_of(
            r#"{"bodies": [{"mass": 0, "x": 0, "y": 0, "vx": 0, "vy": 0}], "steps": 1}"#,
        );
        assert!(msg.contains("zero mass"), "{msg}");
    }

    #[test]
    fn garbage_is_client_error() {
        assert!(error_of("{not json").starts_with("malformed request"));
        assert!(error_of(r#"{"bodies": [], "dt": "fast"}"#).starts_with("malformed request"));
    }

    #[test]
    fn work_limit_is_client_error() {
        let cfg = ApiConfig {
            max_work: 10,
            ..ApiConfig::default()
        };
        let raw = r#"{"bodies": [{"mass": 1, "x": 0, "y": 0, "vx": 0, "vy": 0},
                                 {"mass": 1, "x": 1, "y": 0, "vx": 0, "vy": 0}], "steps": 6}"#;
        let reply = respond(&cfg, raw, &mut rng());
        assert_eq!(reply.status, Status::ClientError);
        assert!(reply.body.contains("exceeds the limit of 10"), "{}", reply.body);
    }
}
