use crate::shots::ShotEvent;

pub struct StatsHelper;

impl StatsHelper {
    pub fn total_xg(shots: &[&ShotEvent]) -> f64 {
        shots.iter().map(|shot| shot.shot_xg).sum()
    }

    /// Sum of goal indicators with the sign dropped.
    pub fn total_goal_flags(shots: &[&ShotEvent]) -> u32 {
        shots.iter().map(|shot| shot.goal_count()).sum()
    }

    /// `value / shots`, zero when there are no shots.
    pub fn per_shot(value: f64, shots: usize) -> f64 {
        if shots == 0 {
            return 0.0;
        }
        value / shots as f64
    }
}
