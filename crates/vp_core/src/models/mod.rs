pub mod player;
pub mod state;
pub mod timeline;

pub use player::{Player, PlayerSide};
pub use state::MatchState;
pub use timeline::{MatchStats, MatchTimeline, PointRecord, SideStats, POINT_BREAK_SECS};
