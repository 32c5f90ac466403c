//! Playback layer: per-session animation of sampled match states.

pub mod animator;
pub mod geometry;

pub use animator::{RenderFrame, SegmentEnding, Trajectory, TrajectoryAnimator};
pub use geometry::CourtGeometry;
