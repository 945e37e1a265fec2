use crate::shots::event::{ShotEvent, ShotResult, Situation};

/// Non-goal open-play shot from the penalty spot area.
pub(crate) fn shot(player_id: u32, season: i32, game_state: &str) -> ShotEvent {
    ShotEvent {
        player_id,
        player_name: format!("Player {}", player_id),
        season,
        x: 0.85,
        y: 0.5,
        shot_xg: 0.1,
        is_goal: 0,
        shot_result: ShotResult::SavedShot,
        situation: Situation::OpenPlay,
        filter_game_state: game_state.to_string(),
        changed_game_state: false,
        home_away: "h".to_string(),
    }
}

pub(crate) fn goal(player_id: u32, season: i32, game_state: &str) -> ShotEvent {
    ShotEvent {
        is_goal: 1,
        shot_result: ShotResult::Goal,
        changed_game_state: true,
        shot_xg: 0.4,
        ..shot(player_id, season, game_state)
    }
}

pub(crate) fn at(mut event: ShotEvent, x: f64, y: f64) -> ShotEvent {
    event.x = x;
    event.y = y;
    event
}
