//! Point-by-point match simulation
//!
//! `simulate` is a pure function of `(seed, player_a, player_b)`: it wraps
//! one [`SeededGenerator`] internally, runs the scoring loop to completion
//! and returns an immutable [`MatchTimeline`]. Two draws per point, in
//! fixed order: winner first, then rally duration. Any process that calls
//! this with the same inputs gets a structurally identical timeline, which
//! is the entire synchronization mechanism.

use crate::engine::probability::point_win_probability;
use crate::engine::rng::{validate_seed, SeededGenerator};
use crate::error::Result;
use crate::models::{MatchTimeline, Player, PlayerSide, PointRecord, POINT_BREAK_SECS};

/// First side to this many points wins, provided the margin holds.
pub const WIN_TARGET: u32 = 11;

/// Required winning margin.
pub const WIN_MARGIN: u32 = 2;

/// Both sides at or above this score is deuce: serve changes every point.
pub const DEUCE_THRESHOLD: u32 = 10;

/// Rally duration bounds, whole seconds.
pub const MIN_POINT_SECS: i64 = 3;
pub const MAX_POINT_SECS: i64 = 15;

fn is_match_over(score_a: u32, score_b: u32) -> bool {
    let max = score_a.max(score_b);
    let diff = score_a.abs_diff(score_b);
    max >= WIN_TARGET && diff >= WIN_MARGIN
}

/// Simulate a complete match.
///
/// Fails only on a degenerate seed. The loop always terminates: every point
/// strictly increases one score, and the per-point probability clamp keeps
/// both outcomes possible, so the margin condition is eventually met.
pub fn simulate(seed: u64, player_a: Player, player_b: Player) -> Result<MatchTimeline> {
    validate_seed(seed)?;
    let mut rng = SeededGenerator::new(seed);

    let mut score_a: u32 = 0;
    let mut score_b: u32 = 0;
    let mut server = PlayerSide::A;
    let mut current_time = 0.0_f64;
    let mut point_count: u32 = 0;
    let mut points = Vec::new();

    loop {
        // Per-point probability for the current serving configuration. The
        // calibration model carries no serve bonus, so only the rating gap
        // matters; the draw order is still one winner roll then one
        // duration roll per point.
        let prob_a = point_win_probability(player_a.rating, player_b.rating);
        let winner = if rng.next_float() < prob_a {
            PlayerSide::A
        } else {
            PlayerSide::B
        };
        let duration = rng.next_int(MIN_POINT_SECS, MAX_POINT_SECS) as u32;

        let (before_a, before_b) = (score_a, score_b);
        match winner {
            PlayerSide::A => score_a += 1,
            PlayerSide::B => score_b += 1,
        }

        points.push(PointRecord {
            winner,
            start_time: current_time,
            end_time: current_time + f64::from(duration),
            score_before_a: before_a,
            score_before_b: before_b,
            score_after_a: score_a,
            score_after_b: score_b,
            server,
            duration_seconds: duration,
        });

        current_time += f64::from(duration);
        point_count += 1;

        if is_match_over(score_a, score_b) {
            break;
        }

        // Break before the next serve, then rotate the server: every 2
        // points normally, every point in deuce.
        current_time += POINT_BREAK_SECS;

        let deuce = score_a >= DEUCE_THRESHOLD && score_b >= DEUCE_THRESHOLD;
        let switch_interval = if deuce { 1 } else { 2 };
        if point_count % switch_interval == 0 {
            server = server.opponent();
        }
    }

    let total_duration_seconds = current_time;
    log::debug!(
        "simulated match seed={} {}({}) vs {}({}): {}-{} over {} points, {:.0}s",
        seed,
        player_a.name,
        player_a.rating,
        player_b.name,
        player_b.rating,
        score_a,
        score_b,
        point_count,
        total_duration_seconds,
    );

    Ok(MatchTimeline {
        seed,
        player_a,
        player_b,
        points,
        final_score_a: score_a,
        final_score_b: score_b,
        total_duration_seconds,
    })
}
