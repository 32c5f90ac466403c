//! JSON boundary for the simulator
//!
//! String-in, string-out wrapper so hosts behind an FFI or subprocess seam
//! can run matches without linking against the Rust types. The request
//! carries a schema version so incompatible callers fail loudly instead of
//! misreading fields.

use serde::{Deserialize, Serialize};

use crate::engine::simulate;
use crate::error::{Result, SimError};
use crate::models::{Player, PlayerSide, PointRecord};
use crate::SCHEMA_VERSION;

#[derive(Debug, Clone, Deserialize)]
pub struct SimulateRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub player_a: Player,
    pub player_b: Player,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulateResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub player_a: String,
    pub player_b: String,
    pub final_score_a: u32,
    pub final_score_b: u32,
    pub winner: PlayerSide,
    pub total_points: u32,
    pub total_duration_seconds: f64,
    pub points: Vec<PointRecord>,
}

/// Simulate a match described by a JSON request, returning the JSON response.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: SimulateRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimError::SchemaVersion {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let timeline = simulate(request.seed, request.player_a, request.player_b)?;
    let response = SimulateResponse {
        schema_version: SCHEMA_VERSION,
        seed: timeline.seed,
        player_a: timeline.player_a.name.clone(),
        player_b: timeline.player_b.name.clone(),
        final_score_a: timeline.final_score_a,
        final_score_b: timeline.final_score_b,
        winner: timeline.winner(),
        total_points: timeline.points.len() as u32,
        total_duration_seconds: timeline.total_duration_seconds,
        points: timeline.points,
    };
    Ok(serde_json::to_string(&response)?)
}
