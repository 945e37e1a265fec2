use crate::shots::{ShotEvent, ShotTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Player the dashboard opens on.
pub const DEFAULT_PLAYER_ID: u32 = 2097;
/// First season offered by the season range selector.
pub const FIRST_SEASON: i32 = 2014;
/// Last season offered by the season range selector.
pub const LAST_SEASON: i32 = 2020;

/// Filter parameters collected for a single pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub player_id: u32,
    pub start_year: i32,
    pub end_year: i32,
    pub game_states: BTreeSet<String>,
    #[serde(default)]
    pub only_goals: bool,
    #[serde(default)]
    pub keep_penalties: bool,
    #[serde(default)]
    pub only_changed_game_state: bool,
}

impl FilterCriteria {
    /// Criteria with every game state of `table` selected and all toggles off.
    pub fn for_player(player_id: u32, table: &ShotTable) -> Self {
        Self {
            player_id,
            start_year: FIRST_SEASON,
            end_year: LAST_SEASON,
            game_states: table.game_states(),
            only_goals: false,
            keep_penalties: false,
            only_changed_game_state: false,
        }
    }

    /// Checks criteria that did not come from a constrained selector.
    pub fn validate(&self, table: &ShotTable) -> CoreResult<()> {
        if !table.has_player(self.player_id) {
            return Err(CoreError::InvalidInput(format!(
                "player {} not present in the shot table",
                self.player_id
            )));
        }
        if self.start_year > self.end_year {
            return Err(CoreError::InvalidInput(format!(
                "season range {}..={} is inverted",
                self.start_year, self.end_year
            )));
        }
        if self.game_states.is_empty() {
            return Err(CoreError::InvalidInput(
                "at least one game state must be selected".into(),
            ));
        }
        Ok(())
    }
}

/// Common error type for the core.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("data error: {0}")]
    Data(#[from] csv::Error),
    #[error("render failure: {0}")]
    Render(String),
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Rows surviving the filter steps so far, in table order.
pub type ShotView<'a> = Vec<&'a ShotEvent>;

/// One predicate step of the filter pipeline.
pub trait FilterStage {
    fn name(&self) -> &'static str;

    fn keep(&self, shot: &ShotEvent) -> bool;

    /// Strict subset of `input`, order preserved.
    fn execute<'a>(&self, input: ShotView<'a>) -> ShotView<'a> {
        input.into_iter().filter(|shot| self.keep(shot)).collect()
    }
}
