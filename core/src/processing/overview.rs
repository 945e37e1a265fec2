use crate::math::{GeometryHelper, PitchPoint, StatsHelper};
use crate::prelude::{CoreError, CoreResult};
use crate::shots::ShotEvent;
use serde::Serialize;
use std::fmt;

/// Seasons covered by a shot set. Displayed season-spanning, so a range
/// ending in 2020 reads "...-2021".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonRange {
    pub first: i32,
    pub last: i32,
}

impl fmt::Display for SeasonRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last + 1)
    }
}

/// Whole-set statistics shown on the shot map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotOverview {
    pub player_id: u32,
    pub player_name: String,
    pub seasons: SeasonRange,
    pub centroid: PitchPoint,
    pub average_distance: f64,
    pub total_shots: usize,
    /// Rows whose result is a goal.
    pub total_goals: usize,
    pub total_xg: f64,
    pub overperformance_per_shot: f64,
    pub xg_per_shot: f64,
    pub game_state_altering: usize,
}

impl ShotOverview {
    /// `Ok(None)` for no shots. All shots must belong to one player.
    pub fn from_shots(shots: &[&ShotEvent]) -> CoreResult<Option<Self>> {
        let Some(first) = shots.first() else {
            return Ok(None);
        };
        if let Some(other) = shots.iter().find(|shot| shot.player_id != first.player_id) {
            return Err(CoreError::InvalidInput(format!(
                "shot map needs a single player, found {} and {}",
                first.player_id, other.player_id
            )));
        }

        let centroid = GeometryHelper::centroid(shots).unwrap_or_default();
        let total_shots = shots.len();
        let total_goals = shots
            .iter()
            .filter(|shot| shot.shot_result.is_goal())
            .count();
        let total_xg = StatsHelper::total_xg(shots);
        let first_season = shots.iter().map(|shot| shot.season).min().unwrap_or(first.season);
        let last_season = shots.iter().map(|shot| shot.season).max().unwrap_or(first.season);

        Ok(Some(Self {
            player_id: first.player_id,
            player_name: first.player_name.clone(),
            seasons: SeasonRange {
                first: first_season,
                last: last_season,
            },
            centroid,
            average_distance: centroid.distance_from_goal(),
            total_shots,
            total_goals,
            total_xg,
            overperformance_per_shot: StatsHelper::per_shot(
                total_goals as f64 - total_xg,
                total_shots,
            ),
            xg_per_shot: StatsHelper::per_shot(total_xg, total_shots),
            game_state_altering: shots.iter().filter(|shot| shot.changed_game_state).count(),
        }))
    }
}
