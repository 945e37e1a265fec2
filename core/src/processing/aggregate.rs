use crate::math::{GeometryHelper, StatsHelper};
use crate::shots::ShotEvent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-game-state row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateSummary {
    pub game_state: String,
    pub total_shots: usize,
    pub total_xg: f64,
    pub total_goals: u32,
    /// Goal to the centroid of the group's shots.
    pub distance_from_goal: f64,
    pub xg_overperformance: f64,
    pub xg_overperformance_per_shot: f64,
}

impl GameStateSummary {
    fn from_group(game_state: &str, shots: &[&ShotEvent]) -> Self {
        let total_shots = shots.len();
        let total_xg = StatsHelper::total_xg(shots);
        let total_goals = StatsHelper::total_goal_flags(shots);
        let distance_from_goal = GeometryHelper::centroid_distance(shots).unwrap_or_default();
        let xg_overperformance = total_goals as f64 - total_xg;

        Self {
            game_state: game_state.to_string(),
            total_shots,
            total_xg,
            total_goals,
            distance_from_goal,
            xg_overperformance,
            xg_overperformance_per_shot: StatsHelper::per_shot(xg_overperformance, total_shots),
        }
    }
}

/// Groups `shots` by game-state label, ordered by label.
///
/// Only labels present in `shots` appear; an empty input yields an empty
/// table.
pub fn summarize_by_game_state(shots: &[&ShotEvent]) -> Vec<GameStateSummary> {
    let mut groups: BTreeMap<&str, Vec<&ShotEvent>> = BTreeMap::new();
    for shot in shots {
        groups
            .entry(shot.filter_game_state.as_str())
            .or_default()
            .push(*shot);
    }

    groups
        .iter()
        .map(|(label, group)| GameStateSummary::from_group(label, group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shots::fixtures::{at, goal, shot};

    fn refs(rows: &[ShotEvent]) -> Vec<&ShotEvent> {
        rows.iter().collect()
    }

    #[test]
    fn groups_are_sorted_by_label() {
        let rows = vec![
            shot(1, 2019, "Winning"),
            shot(1, 2019, "Drawing"),
            goal(1, 2019, "Losing"),
            shot(1, 2019, "Drawing"),
        ];
        let summary = summarize_by_game_state(&refs(&rows));
        let labels: Vec<&str> = summary.iter().map(|row| row.game_state.as_str()).collect();
        assert_eq!(labels, vec!["Drawing", "Losing", "Winning"]);
        assert_eq!(summary[0].total_shots, 2);
    }

    #[test]
    fn group_distance_uses_centroid() {
        let rows = vec![
            at(shot(1, 2019, "Drawing"), 0.0, 0.0),
            at(shot(1, 2019, "Drawing"), 1.0, 0.5),
        ];
        let summary = summarize_by_game_state(&refs(&rows));
        let expected = (50.0f64 * 50.0 + 25.0 * 25.0).sqrt();
        assert!((summary[0].distance_from_goal - expected).abs() < 1e-9);
    }

    #[test]
    fn overperformance_sign_follows_goals_minus_xg() {
        let mut over = vec![goal(1, 2019, "Winning"), shot(1, 2019, "Winning")];
        over[1].shot_xg = 0.2;
        let summary = summarize_by_game_state(&refs(&over));
        assert!(summary[0].xg_overperformance > 0.0);
        assert!((summary[0].xg_overperformance - 0.4).abs() < 1e-9);
        assert!((summary[0].xg_overperformance_per_shot - 0.2).abs() < 1e-9);

        let mut level = vec![goal(1, 2019, "Losing"), shot(1, 2019, "Losing")];
        level[0].shot_xg = 0.75;
        level[1].shot_xg = 0.25;
        let summary = summarize_by_game_state(&refs(&level));
        assert_eq!(summary[0].xg_overperformance, 0.0);
        assert_eq!(summary[0].xg_overperformance_per_shot, 0.0);
    }

    #[test]
    fn signed_goal_flags_count_as_goals() {
        let mut own = goal(1, 2019, "Drawing");
        own.is_goal = -1;
        let rows = vec![own];
        let summary = summarize_by_game_state(&refs(&rows));
        assert_eq!(summary[0].total_goals, 1);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        assert!(summarize_by_game_state(&[]).is_empty());
    }

    #[test]
    fn summary_serializes_with_field_names() {
        let rows = vec![goal(1, 2019, "Drawing")];
        let summary = summarize_by_game_state(&refs(&rows));
        let json = serde_json::to_value(&summary[0]).unwrap();
        assert_eq!(json["game_state"], "Drawing");
        assert_eq!(json["total_goals"], 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn group_totals_match_filtered_rows(
                picks in proptest::collection::vec((0usize..4, any::<bool>(), -1i32..=1), 0..50)
            ) {
                let labels = ["Drawing", "Losing", "Winning", "Level"];
                let rows: Vec<ShotEvent> = picks
                    .iter()
                    .map(|(label, scored, flag)| {
                        let mut event = if *scored {
                            goal(3, 2018, labels[*label])
                        } else {
                            shot(3, 2018, labels[*label])
                        };
                        if *scored {
                            event.is_goal = if *flag < 0 { -1 } else { 1 };
                        }
                        event
                    })
                    .collect();
                let summary = summarize_by_game_state(&refs(&rows));

                let shots: usize = summary.iter().map(|row| row.total_shots).sum();
                let goals: u32 = summary.iter().map(|row| row.total_goals).sum();
                let goal_rows = rows.iter().filter(|row| row.shot_result.is_goal()).count() as u32;
                prop_assert_eq!(shots, rows.len());
                prop_assert_eq!(goals, goal_rows);
                prop_assert!(summary.iter().all(|row| row.total_shots > 0));
            }
        }
    }
}
