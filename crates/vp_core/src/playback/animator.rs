//! Trajectory animation
//!
//! Turns sampled [`MatchState`] values into continuous ball and paddle
//! coordinates. The animator owns the only mutable working state in the
//! whole engine: one fixed trajectory per hit segment plus the paddle
//! positions it smooths between frames. Everything it draws from chance
//! comes out of a generator re-seeded from the point number, so two
//! viewers sampling the same timeline see the same frames without ever
//! talking to each other.
//!
//! By convention one hit segment is one second of match-point time: the
//! ball leaves a paddle at each whole second and arrives at the other side
//! at the next. The final segment of a point ends according to who won it -
//! the loser either misses the return (ball flies past them) or puts the
//! ball into the net.

use serde::{Deserialize, Serialize};

use super::geometry::CourtGeometry;
use crate::engine::rng::SeededGenerator;
use crate::models::{MatchState, PlayerSide};

/// Per-point generator seed is the point number times this constant.
pub const POINT_SEED_MULTIPLIER: u64 = 12_345;

/// Serve angle is drawn from `[15, 45]` degrees, sign drawn separately.
const SERVE_ANGLE_MIN_DEG: f64 = 15.0;
const SERVE_ANGLE_RANGE_DEG: f64 = 30.0;

/// Each successive hit steepens the shot angle by this much (radians).
const ANGLE_STEP_RAD: f64 = 0.15;

/// Cyclic pool of per-hit paddle aiming errors, +/- half the spread.
const IMPERFECTION_COUNT: usize = 20;
const IMPERFECTION_SPREAD_PX: f64 = 20.0;

/// How far past the court edge a missed ball travels.
const MISS_OVERSHOOT_PX: f64 = 50.0;

/// Extra fall blended in over the second half of a net segment.
const NET_DROP_PX: f64 = 100.0;

const MAX_WALL_BOUNCES: u32 = 10;

/// Start of a segment: the hitter's paddle sits at the launch point.
const HIT_SNAP_WINDOW: f64 = 0.1;

/// Receiver starts tracking only after this fraction of the segment.
const REACTION_THRESHOLD: f64 = 0.3;

/// Past this fraction a normal receiver snaps exactly onto the target.
const ARRIVAL_SNAP_THRESHOLD: f64 = 0.9;

/// Exponential smoothing rates: normal interception vs. a doomed attempt.
const TRACKING_RATE: f64 = 0.25;
const MISS_TRACKING_RATE: f64 = 0.15;

/// How the ball's current segment ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEnding {
    /// Reaches the opposite paddle; the rally continues.
    Normal,
    /// Flies past the receiver, off court. The hitter won the point.
    Miss,
    /// Dies at the net. The hitter lost the point.
    Net,
}

/// Fixed linear ball path for one hit segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Trajectory {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

/// One frame of coordinates for the presentation layer. Plain data; the
/// drawing itself is an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub ball_x: f64,
    pub ball_y: f64,
    pub paddle_a_y: f64,
    pub paddle_b_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusTag {
    Playing,
    BetweenPoints,
    Finished,
}

fn status_tag(state: &MatchState) -> StatusTag {
    match state {
        MatchState::Playing { .. } => StatusTag::Playing,
        MatchState::BetweenPoints { .. } => StatusTag::BetweenPoints,
        MatchState::Finished { .. } => StatusTag::Finished,
    }
}

/// Stateful per-session animator. Hold one per viewer; feed it the states
/// sampled from the timeline and it returns a frame per call.
#[derive(Debug, Clone)]
pub struct TrajectoryAnimator {
    geometry: CourtGeometry,
    last_key: Option<(u32, StatusTag)>,

    // Per-point deterministic draws.
    serve_angle_rad: f64,
    imperfections_a: [f64; IMPERFECTION_COUNT],
    imperfections_b: [f64; IMPERFECTION_COUNT],

    // Working state, recomputed once per hit segment.
    trajectory: Trajectory,
    current_segment: i64,
    last_ball_end_x: f64,
    last_ball_end_y: f64,

    // Current positions, smoothed across frames.
    ball_x: f64,
    ball_y: f64,
    paddle_a_y: f64,
    paddle_b_y: f64,
}

impl TrajectoryAnimator {
    pub fn new(geometry: CourtGeometry) -> Self {
        Self {
            geometry,
            last_key: None,
            serve_angle_rad: 0.0,
            imperfections_a: [0.0; IMPERFECTION_COUNT],
            imperfections_b: [0.0; IMPERFECTION_COUNT],
            trajectory: Trajectory::default(),
            current_segment: -1,
            last_ball_end_x: 0.0,
            last_ball_end_y: 0.0,
            ball_x: geometry.mid_x(),
            ball_y: geometry.mid_y(),
            paddle_a_y: geometry.mid_y(),
            paddle_b_y: geometry.mid_y(),
        }
    }

    pub fn geometry(&self) -> &CourtGeometry {
        &self.geometry
    }

    /// Produce the frame for a sampled state.
    ///
    /// A new point number or a status change re-seeds the per-point draws
    /// and re-centres the paddles; the ball keeps its last position, which
    /// is what a break between points looks like.
    pub fn observe(&mut self, state: &MatchState) -> RenderFrame {
        let key = (state.point_number().unwrap_or(1), status_tag(state));
        if self.last_key != Some(key) {
            self.initialize_point(key.0);
            self.last_key = Some(key);
        }

        if let MatchState::Playing {
            progress,
            duration_seconds,
            target_winner,
            server,
            ..
        } = *state
        {
            self.animate_playing(progress, duration_seconds, target_winner, server);
        }

        self.frame()
    }

    pub fn frame(&self) -> RenderFrame {
        RenderFrame {
            ball_x: self.ball_x,
            ball_y: self.ball_y,
            paddle_a_y: self.paddle_a_y,
            paddle_b_y: self.paddle_b_y,
        }
    }

    fn initialize_point(&mut self, point_number: u32) {
        let seed = u64::from(point_number.max(1)) * POINT_SEED_MULTIPLIER;
        let mut rng = SeededGenerator::new(seed);

        let magnitude = rng.next_float() * SERVE_ANGLE_RANGE_DEG + SERVE_ANGLE_MIN_DEG;
        let sign = if rng.next_float() < 0.5 { 1.0 } else { -1.0 };
        self.serve_angle_rad = magnitude.to_radians() * sign;

        for i in 0..IMPERFECTION_COUNT {
            self.imperfections_a[i] = (rng.next_float() - 0.5) * IMPERFECTION_SPREAD_PX;
            self.imperfections_b[i] = (rng.next_float() - 0.5) * IMPERFECTION_SPREAD_PX;
        }

        self.paddle_a_y = self.geometry.mid_y();
        self.paddle_b_y = self.geometry.mid_y();
        self.current_segment = -1;
        self.last_ball_end_x = 0.0;
        self.last_ball_end_y = 0.0;
    }

    fn animate_playing(
        &mut self,
        progress: f64,
        duration_seconds: f64,
        target_winner: PlayerSide,
        server: PlayerSide,
    ) {
        let elapsed = progress * duration_seconds;
        let current_hit = elapsed.floor() as i64;
        let segment_progress = elapsed - current_hit as f64;

        let receiver = server.opponent();
        let last_hit = duration_seconds.floor() as i64 - 1;
        let last_hitter = if last_hit % 2 == 0 { server } else { receiver };

        let ending = if current_hit >= last_hit {
            if target_winner == last_hitter {
                SegmentEnding::Miss
            } else {
                SegmentEnding::Net
            }
        } else {
            SegmentEnding::Normal
        };

        if self.current_segment != current_hit {
            self.compute_trajectory(server, current_hit, ending);
            self.current_segment = current_hit;
        }

        self.update_paddles(server, current_hit, segment_progress, ending);
        self.update_ball(segment_progress, ending);
    }

    /// Fix the ball path for one segment. Runs once per segment; the result
    /// holds until the next hit.
    fn compute_trajectory(&mut self, server: PlayerSide, current_hit: i64, ending: SegmentEnding) {
        let g = self.geometry;
        let receiver = server.opponent();
        let hitter = if current_hit % 2 == 0 { server } else { receiver };
        let moving_right = hitter == PlayerSide::A;

        let (start_x, start_y) = if current_hit == 0 {
            // Serve: the ball leaves the serving paddle's face at mid court.
            (g.paddle_face_x(hitter), g.mid_y())
        } else {
            (self.last_ball_end_x, self.last_ball_end_y)
        };

        let angle = self.serve_angle_rad + current_hit as f64 * ANGLE_STEP_RAD;

        let (end_x, end_y) = match ending {
            SegmentEnding::Net => (g.mid_x(), g.mid_y()),
            SegmentEnding::Miss => {
                let end_x = if moving_right {
                    g.width + MISS_OVERSHOOT_PX
                } else {
                    -MISS_OVERSHOOT_PX
                };
                let projected = start_y + angle.tan() * g.span_between_paddles();
                (end_x, g.reflect_off_walls(projected, MAX_WALL_BOUNCES))
            }
            SegmentEnding::Normal => {
                let end_x = g.paddle_face_x(hitter.opponent());
                let projected = start_y + angle.tan() * (end_x - start_x).abs();
                (end_x, g.reflect_off_walls(projected, MAX_WALL_BOUNCES))
            }
        };

        self.trajectory = Trajectory { start_x, start_y, end_x, end_y };
        self.last_ball_end_x = end_x;
        self.last_ball_end_y = end_y;
    }

    fn update_ball(&mut self, segment_progress: f64, ending: SegmentEnding) {
        let t = self.trajectory;
        self.ball_x = t.start_x + (t.end_x - t.start_x) * segment_progress;
        self.ball_y = t.start_y + (t.end_y - t.start_y) * segment_progress;

        if ending == SegmentEnding::Net && segment_progress > 0.5 {
            let fall = (segment_progress - 0.5) / 0.5;
            self.ball_y += fall * NET_DROP_PX;
        }

        self.ball_y = self.geometry.clamp_ball_y(self.ball_y);
    }

    fn update_paddles(
        &mut self,
        server: PlayerSide,
        current_hit: i64,
        segment_progress: f64,
        ending: SegmentEnding,
    ) {
        let g = self.geometry;
        let receiver = server.opponent();
        let hitter = if current_hit % 2 == 0 { server } else { receiver };
        let next_hitter = if (current_hit + 1) % 2 == 0 { server } else { receiver };

        if segment_progress < HIT_SNAP_WINDOW {
            self.set_paddle(hitter, self.trajectory.start_y);
        }

        // Aim for the trajectory's arrival point, offset by this hit's
        // imperfection so tracking never looks robotic.
        let idx = ((current_hit + 1) % IMPERFECTION_COUNT as i64) as usize;
        let target = match next_hitter {
            PlayerSide::A => g.clamp_paddle_y(self.trajectory.end_y + self.imperfections_a[idx]),
            PlayerSide::B => g.clamp_paddle_y(self.trajectory.end_y + self.imperfections_b[idx]),
        };

        if segment_progress >= REACTION_THRESHOLD {
            match ending {
                SegmentEnding::Normal => self.nudge_paddle(next_hitter, target, TRACKING_RATE),
                // Too slow on purpose: the paddle visibly fails to arrive.
                SegmentEnding::Miss => self.nudge_paddle(next_hitter, target, MISS_TRACKING_RATE),
                SegmentEnding::Net => {}
            }
        }

        if segment_progress > ARRIVAL_SNAP_THRESHOLD && ending == SegmentEnding::Normal {
            self.set_paddle(next_hitter, target);
        }

        self.paddle_a_y = g.clamp_paddle_y(self.paddle_a_y);
        self.paddle_b_y = g.clamp_paddle_y(self.paddle_b_y);
    }

    fn set_paddle(&mut self, side: PlayerSide, y: f64) {
        match side {
            PlayerSide::A => self.paddle_a_y = y,
            PlayerSide::B => self.paddle_b_y = y,
        }
    }

    fn nudge_paddle(&mut self, side: PlayerSide, target: f64, rate: f64) {
        match side {
            PlayerSide::A => self.paddle_a_y += (target - self.paddle_a_y) * rate,
            PlayerSide::B => self.paddle_b_y += (target - self.paddle_b_y) * rate,
        }
    }
}
