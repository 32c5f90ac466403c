//! Probability model for point outcomes
//!
//! All functions are pure - they take ratings or probabilities as input and
//! return probabilities. This allows unit testing without building a full
//! timeline.
//!
//! The model works in two steps: the logistic rating formula yields the
//! probability of winning an entire match, and a fixed calibration table
//! converts that into a per-point probability for first-to-11 win-by-2
//! scoring. Feeding the match probability straight into a per-point coin
//! flip would let rating gaps decide nearly every point; calibration keeps
//! the match-level outcome aligned with the ratings while individual points
//! stay contested.

// ============================================================================
// Constants
// ============================================================================

/// Match probability is clamped to this range before the calibration lookup.
const MATCH_PROB_MIN: f64 = 0.01;
const MATCH_PROB_MAX: f64 = 0.99;

/// Per-point probability floor/ceiling - every point stays contestable.
const POINT_PROB_FLOOR: f64 = 0.05;
const POINT_PROB_CEIL: f64 = 0.95;

/// Empirical calibration anchors `(match_win_prob, per_point_prob)` for
/// first-to-11 scoring. Lookups interpolate linearly between neighbours;
/// inputs below the first anchor map to 0.500, above the last to 0.665.
const CALIBRATION: [(f64, f64); 10] = [
    (0.50, 0.500),
    (0.55, 0.505),
    (0.60, 0.520),
    (0.64, 0.535),
    (0.70, 0.560),
    (0.75, 0.575),
    (0.80, 0.610),
    (0.85, 0.630),
    (0.90, 0.640),
    (0.95, 0.665),
];

// ============================================================================
// Probability Functions
// ============================================================================

/// Probability that the side rated `rating_a` wins an entire match against
/// the side rated `rating_b`, via the standard logistic rating formula.
pub fn match_win_probability(rating_a: i32, rating_b: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(rating_b - rating_a) / 400.0))
}

/// Convert a match win probability into a per-point win probability.
pub fn per_point_probability(match_win_prob: f64) -> f64 {
    let p = match_win_prob.clamp(MATCH_PROB_MIN, MATCH_PROB_MAX);

    for window in CALIBRATION.windows(2) {
        let (m1, p1) = window[0];
        let (m2, p2) = window[1];
        if p >= m1 && p <= m2 {
            let t = (p - m1) / (m2 - m1);
            return p1 + t * (p2 - p1);
        }
    }

    if p < CALIBRATION[0].0 {
        CALIBRATION[0].1
    } else {
        CALIBRATION[CALIBRATION.len() - 1].1
    }
}

/// Probability that side A wins the next point.
///
/// Evaluated once per point for the current serving configuration; the
/// calibration model carries no serve advantage, so the value depends only
/// on the rating gap. Clamped so neither side ever owns a point outright.
pub fn point_win_probability(rating_a: i32, rating_b: i32) -> f64 {
    let match_prob = match_win_probability(rating_a, rating_b);
    per_point_probability(match_prob).clamp(POINT_PROB_FLOOR, POINT_PROB_CEIL)
}
