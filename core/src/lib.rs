//! Filter, aggregation and shot-map core for the GameStates dashboard.
//!
//! A pass loads nothing and keeps nothing: it filters an immutable
//! [`shots::ShotTable`] by [`prelude::FilterCriteria`], summarizes the
//! surviving shots per game state, and optionally draws them on a pitch.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod render;
pub mod shots;
pub mod telemetry;

pub use prelude::{CoreError, CoreResult, FilterCriteria, FilterStage};
pub use processing::{filter_shots, summarize_by_game_state, GameStateSummary, ShotOverview};
pub use render::{render_png, PitchScene, RenderStyle};
pub use shots::{ShotEvent, ShotTable};
