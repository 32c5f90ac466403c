//! Time-block scheduling
//!
//! Partitions wall-clock time into fixed 10-minute blocks and derives the
//! current block's seed and participant pair from the block id alone. Any
//! process that evaluates [`assignment_at`] during the same block, anywhere,
//! computes the identical `(seed, player_a, player_b)` triple without
//! exchanging a message - this is the sole synchronization mechanism
//! between independent viewers.
//!
//! The player pool is passed in explicitly by the caller; this module never
//! reads shared state or a clock of its own.

use chrono::{DateTime, Utc};

use crate::engine::rng::{validate_seed, SeededGenerator};
use crate::error::{Result, SimError};
use crate::models::Player;

/// Width of one scheduling block, seconds.
pub const BLOCK_WIDTH_SECS: f64 = 600.0;

/// One block's derived match assignment.
///
/// Block bounds are included so a caller can convert wall-clock time into
/// elapsed match time and display a countdown to the next block.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub seed: u64,
    pub block_id: u64,
    pub player_a: Player,
    pub player_b: Player,
    pub block_start_secs: f64,
    pub block_end_secs: f64,
}

impl Assignment {
    /// Seconds elapsed since the block began, clamped at 0.
    pub fn elapsed_in_block(&self, now_secs: f64) -> f64 {
        (now_secs - self.block_start_secs).max(0.0)
    }

    /// Seconds until the next block (and the next match) begins.
    pub fn seconds_until_next_block(&self, now_secs: f64) -> f64 {
        (self.block_end_secs - now_secs).max(0.0)
    }
}

/// Block id containing `now_secs` (seconds since the Unix epoch).
pub fn block_id_at(now_secs: f64) -> u64 {
    (now_secs / BLOCK_WIDTH_SECS).floor().max(0.0) as u64
}

/// Derive the current block's assignment from the clock and a player pool.
///
/// Fails with [`SimError::InsufficientPlayers`] for a pool smaller than 2,
/// and with [`SimError::InvalidSeed`] for block 0 (a pre-epoch clock).
pub fn assignment_at(now_secs: f64, pool: &[Player]) -> Result<Assignment> {
    if pool.len() < 2 {
        return Err(SimError::InsufficientPlayers { found: pool.len() });
    }

    let block_id = block_id_at(now_secs);
    validate_seed(block_id)?;

    let mut selection = SeededGenerator::new(block_id);
    let n = pool.len() as i64;
    let first = selection.next_int(0, n - 1) as usize;
    // Second pick: draw from the remaining n-1 indices and remap past the
    // first, so distinctness holds in exactly two draws.
    let second = {
        let r = selection.next_int(0, n - 2) as usize;
        if r >= first {
            r + 1
        } else {
            r
        }
    };

    let assignment = Assignment {
        seed: block_id,
        block_id,
        player_a: pool[first].clone(),
        player_b: pool[second].clone(),
        block_start_secs: block_id as f64 * BLOCK_WIDTH_SECS,
        block_end_secs: (block_id + 1) as f64 * BLOCK_WIDTH_SECS,
    };
    log::debug!(
        "block {}: {} vs {}",
        block_id,
        assignment.player_a.name,
        assignment.player_b.name,
    );
    Ok(assignment)
}

/// [`assignment_at`] for callers holding a chrono timestamp.
pub fn assignment_at_datetime(now: DateTime<Utc>, pool: &[Player]) -> Result<Assignment> {
    let secs = now.timestamp() as f64 + f64::from(now.timestamp_subsec_millis()) / 1000.0;
    assignment_at(secs, pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pool(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("player-{i}"), 1400 + i as i32 * 25))
            .collect()
    }

    #[test]
    fn same_block_same_assignment() {
        let pool = pool(6);
        let a = assignment_at(1_754_550_000.0, &pool).unwrap();
        let b = assignment_at(1_754_550_000.0, &pool).unwrap();
        let c = assignment_at(1_754_550_599.9, &pool).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn next_block_changes_the_assignment_seed() {
        let pool = pool(6);
        let a = assignment_at(1_754_550_000.0, &pool).unwrap();
        let b = assignment_at(1_754_550_600.0, &pool).unwrap();
        assert_eq!(b.block_id, a.block_id + 1);
        assert_eq!(b.seed, a.seed + 1);
    }

    #[test]
    fn pinned_block_and_selection() {
        let pool = pool(5);
        let a = assignment_at(1_754_550_000.0, &pool).unwrap();
        assert_eq!(a.block_id, 2_924_250);
        assert_eq!(a.block_start_secs, 1_754_550_000.0);
        assert_eq!(a.block_end_secs, 1_754_550_600.0);
        assert_eq!(a.player_a.name, "player-4");
        assert_eq!(a.player_b.name, "player-1");
    }

    #[test]
    fn selected_players_are_always_distinct() {
        let pool = pool(3);
        for block in 1..=2_000u64 {
            let now = block as f64 * BLOCK_WIDTH_SECS + 1.0;
            let a = assignment_at(now, &pool).unwrap();
            assert_ne!(a.player_a.name, a.player_b.name, "block {block}");
        }
    }

    #[test]
    fn pool_of_two_still_selects_both() {
        let pool = pool(2);
        let a = assignment_at(1_754_550_000.0, &pool).unwrap();
        assert_ne!(a.player_a.name, a.player_b.name);
    }

    #[test]
    fn undersized_pools_fail_explicitly() {
        assert!(matches!(
            assignment_at(1_754_550_000.0, &pool(1)),
            Err(SimError::InsufficientPlayers { found: 1 })
        ));
        assert!(matches!(
            assignment_at(1_754_550_000.0, &[]),
            Err(SimError::InsufficientPlayers { found: 0 })
        ));
    }

    #[test]
    fn pre_epoch_clock_is_rejected() {
        assert!(matches!(
            assignment_at(-5.0, &pool(4)),
            Err(SimError::InvalidSeed { .. })
        ));
        assert!(matches!(
            assignment_at(30.0, &pool(4)),
            Err(SimError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn block_timing_helpers() {
        let pool = pool(4);
        let a = assignment_at(1_754_550_120.5, &pool).unwrap();
        assert_eq!(a.elapsed_in_block(1_754_550_120.5), 120.5);
        assert_eq!(a.seconds_until_next_block(1_754_550_120.5), 479.5);
        assert_eq!(a.seconds_until_next_block(1_754_551_000.0), 0.0);
    }

    #[test]
    fn datetime_wrapper_matches_epoch_seconds() {
        let pool = pool(5);
        let dt = Utc.timestamp_opt(1_754_550_000, 0).unwrap();
        let a = assignment_at_datetime(dt, &pool).unwrap();
        let b = assignment_at(1_754_550_000.0, &pool).unwrap();
        assert_eq!(a, b);
    }
}
