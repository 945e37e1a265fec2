pub mod aggregate;
pub mod filter;
pub mod overview;

pub use aggregate::{summarize_by_game_state, GameStateSummary};
pub use filter::{filter_shots, FilterPipeline};
pub use overview::{SeasonRange, ShotOverview};
