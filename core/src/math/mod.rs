pub mod geometry;
pub mod stats;

pub use geometry::{GeometryHelper, PitchPoint, GOAL_CENTRE, PITCH_SCALE};
pub use stats::StatsHelper;
