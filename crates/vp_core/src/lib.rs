//! # vp_core - Deterministic Virtual Table-Tennis Match Engine
//!
//! This library simulates complete table-tennis matches from two skill
//! ratings and a numeric seed, and plays them back as a live-looking
//! animation whose every frame is a pure function of wall-clock time.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same match on every client)
//! - Time-block scheduling: independent viewers derive the same seed and
//!   pairing from the clock alone, with no server and no messages
//! - Pure timeline queries: sample the match state at any elapsed time
//! - Trajectory animation producing plain coordinate frames for any renderer
//! - JSON API for easy integration across FFI or subprocess boundaries
//!
//! ## Synchrony model
//! Nothing is ever sent between viewers. Wall-clock time selects a block,
//! the block id seeds the generator, and identical pure computation does the
//! rest. A viewer joining mid-block samples the same precomputed timeline at
//! the same elapsed offset as everyone else.

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod playback;
pub mod schedule;

pub use api::{simulate_match_json, SimulateRequest, SimulateResponse};
pub use engine::{simulate, validate_seed, SeededGenerator};
pub use error::{Result, SimError};
pub use models::{
    MatchState, MatchStats, MatchTimeline, Player, PlayerSide, PointRecord, SideStats,
    POINT_BREAK_SECS,
};
pub use playback::{CourtGeometry, RenderFrame, TrajectoryAnimator};
pub use schedule::{
    assignment_at, assignment_at_datetime, block_id_at, Assignment, BLOCK_WIDTH_SECS,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn end_to_end_block_to_frames() {
        // The full viewer path: clock -> assignment -> timeline -> frames.
        let pool = vec![
            Player::new("Marco", 1620),
            Player::new("Luca", 1480),
            Player::new("Giulia", 1555),
            Player::new("Anna", 1390),
        ];
        let now = 1_754_550_123.0;
        let assignment = assignment_at(now, &pool).unwrap();
        let timeline = simulate(
            assignment.seed,
            assignment.player_a.clone(),
            assignment.player_b.clone(),
        )
        .unwrap();

        let mut animator = TrajectoryAnimator::new(CourtGeometry::default());
        let state = timeline.state_at(assignment.elapsed_in_block(now));
        let frame = animator.observe(&state);
        assert!(frame.ball_x.is_finite() && frame.ball_y.is_finite());
    }

    #[test]
    fn two_viewers_in_the_same_block_agree_completely() {
        let pool = vec![
            Player::new("Marco", 1620),
            Player::new("Luca", 1480),
            Player::new("Giulia", 1555),
        ];
        // Different instants, same 600-second block.
        let a = assignment_at(1_754_550_010.0, &pool).unwrap();
        let b = assignment_at(1_754_550_590.0, &pool).unwrap();
        assert_eq!(a, b);

        let tl_a = simulate(a.seed, a.player_a.clone(), a.player_b.clone()).unwrap();
        let tl_b = simulate(b.seed, b.player_a.clone(), b.player_b.clone()).unwrap();
        assert_eq!(tl_a, tl_b);
    }

    #[test]
    fn json_api_smoke() {
        let request = json!({
            "schema_version": 1,
            "seed": 42,
            "player_a": { "name": "Marco", "rating": 1600 },
            "player_b": { "name": "Luca", "rating": 1400 },
        });
        let result = simulate_match_json(&request.to_string());
        assert!(result.is_ok(), "simulation should succeed");

        let parsed: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        assert!(parsed["final_score_a"].is_number());
        assert!(parsed["final_score_b"].is_number());
    }
}
