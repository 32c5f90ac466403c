//! Immutable match timeline and its pure query surface
//!
//! A timeline is built once by the simulator and never mutated afterwards;
//! `state_at` and `stats` are plain reads over it. Times are f64 seconds
//! from match start.

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerSide};
use super::state::MatchState;

/// Break between the end of one point and the start of the next, seconds.
pub const POINT_BREAK_SECS: f64 = 3.0;

/// One simulated point, immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub winner: PlayerSide,
    pub start_time: f64,
    pub end_time: f64,
    pub score_before_a: u32,
    pub score_before_b: u32,
    pub score_after_a: u32,
    pub score_after_b: u32,
    pub server: PlayerSide,
    pub duration_seconds: u32,
}

/// Complete precomputed match.
///
/// Invariants: points are ordered by `start_time`, contiguous (each point's
/// end plus the fixed break equals the next point's start), and the sequence
/// stops exactly when the first-to-11 win-by-2 rule first holds.
/// `total_duration_seconds` equals the last point's `end_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTimeline {
    pub seed: u64,
    pub player_a: Player,
    pub player_b: Player,
    pub points: Vec<PointRecord>,
    pub final_score_a: u32,
    pub final_score_b: u32,
    pub total_duration_seconds: f64,
}

/// Aggregate figures for one side, derived from the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideStats {
    pub name: String,
    pub rating: i32,
    pub final_score: u32,
    pub points_won: u32,
}

/// Whole-match aggregates. No new randomness is involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub player_a: SideStats,
    pub player_b: SideStats,
    pub total_points: u32,
    pub match_duration_seconds: f64,
}

impl MatchTimeline {
    /// Winning side. Well-defined because win-by-2 forbids a drawn final score.
    pub fn winner(&self) -> PlayerSide {
        if self.final_score_a > self.final_score_b {
            PlayerSide::A
        } else {
            PlayerSide::B
        }
    }

    /// Sample the match at `elapsed_seconds` from match start.
    ///
    /// Negative input is clamped to 0. At or past the final point's end the
    /// result is always `Finished`, for any overshoot.
    pub fn state_at(&self, elapsed_seconds: f64) -> MatchState {
        let t = elapsed_seconds.max(0.0);

        for (i, point) in self.points.iter().enumerate() {
            if t >= point.start_time && t < point.end_time {
                let duration = f64::from(point.duration_seconds);
                return MatchState::Playing {
                    score_a: point.score_before_a,
                    score_b: point.score_before_b,
                    target_winner: point.winner,
                    server: point.server,
                    seconds_left: point.end_time - t,
                    duration_seconds: duration,
                    progress: (t - point.start_time) / duration,
                    point_number: (i + 1) as u32,
                };
            }

            if let Some(next) = self.points.get(i + 1) {
                if t >= point.end_time && t < next.start_time {
                    return MatchState::BetweenPoints {
                        score_a: point.score_after_a,
                        score_b: point.score_after_b,
                        last_winner: point.winner,
                        next_server: next.server,
                        seconds_until_next: next.start_time - t,
                        point_number: (i + 1) as u32,
                    };
                }
            }
        }

        MatchState::Finished {
            score_a: self.final_score_a,
            score_b: self.final_score_b,
            winner: self.winner(),
            total_points: self.points.len() as u32,
            total_duration_seconds: self.total_duration_seconds,
        }
    }

    /// Aggregate match statistics.
    pub fn stats(&self) -> MatchStats {
        let points_won_a = self
            .points
            .iter()
            .filter(|p| p.winner == PlayerSide::A)
            .count() as u32;
        let points_won_b = self.points.len() as u32 - points_won_a;

        MatchStats {
            player_a: SideStats {
                name: self.player_a.name.clone(),
                rating: self.player_a.rating,
                final_score: self.final_score_a,
                points_won: points_won_a,
            },
            player_b: SideStats {
                name: self.player_b.name.clone(),
                rating: self.player_b.rating,
                final_score: self.final_score_b,
                points_won: points_won_b,
            },
            total_points: self.points.len() as u32,
            match_duration_seconds: self.total_duration_seconds,
        }
    }
}
