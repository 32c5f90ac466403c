use serde::{Deserialize, Serialize};

use super::player::PlayerSide;

/// Transient view of a match at one elapsed instant.
///
/// Derived from the immutable timeline on every query; never stored. The
/// variant fields mirror what a scoreboard and the animation layer need to
/// draw a frame without touching the timeline again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchState {
    /// Mid-rally within a point.
    Playing {
        /// Score before this point.
        score_a: u32,
        score_b: u32,
        /// Precomputed winner of this point.
        target_winner: PlayerSide,
        server: PlayerSide,
        seconds_left: f64,
        duration_seconds: f64,
        /// Fraction of the point elapsed, in `[0, 1)`.
        progress: f64,
        /// 1-based index of the point in the timeline.
        point_number: u32,
    },
    /// In the fixed break after a point, before the next serve.
    BetweenPoints {
        /// Score after the completed point.
        score_a: u32,
        score_b: u32,
        last_winner: PlayerSide,
        /// Server of the upcoming point.
        next_server: PlayerSide,
        seconds_until_next: f64,
        /// 1-based index of the point just completed.
        point_number: u32,
    },
    /// Past the final point.
    Finished {
        score_a: u32,
        score_b: u32,
        winner: PlayerSide,
        total_points: u32,
        total_duration_seconds: f64,
    },
}

impl MatchState {
    /// 1-based point number this state refers to, if any.
    pub fn point_number(&self) -> Option<u32> {
        match self {
            MatchState::Playing { point_number, .. }
            | MatchState::BetweenPoints { point_number, .. } => Some(*point_number),
            MatchState::Finished { .. } => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, MatchState::Finished { .. })
    }
}
