use crate::shots::ShotEvent;
use serde::{Deserialize, Serialize};

/// Stored coordinates are normalized; geometry works on a 100 x 100 pitch.
pub const PITCH_SCALE: f64 = 100.0;

/// Centre of the goal mouth on the scaled pitch.
pub const GOAL_CENTRE: PitchPoint = PitchPoint { x: 100.0, y: 50.0 };

/// Location on the scaled pitch: `x` toward goal, `y` lateral.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PitchPoint {
    pub x: f64,
    pub y: f64,
}

impl PitchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_normalized(x: f64, y: f64) -> Self {
        Self::new(x * PITCH_SCALE, y * PITCH_SCALE)
    }

    pub fn of(shot: &ShotEvent) -> Self {
        Self::from_normalized(shot.x, shot.y)
    }

    pub fn distance_to(&self, other: &PitchPoint) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub fn distance_from_goal(&self) -> f64 {
        GOAL_CENTRE.distance_to(self)
    }
}

pub struct GeometryHelper;

impl GeometryHelper {
    /// Mean shot location, scaled. `None` for no shots.
    pub fn centroid(shots: &[&ShotEvent]) -> Option<PitchPoint> {
        if shots.is_empty() {
            return None;
        }
        let count = shots.len() as f64;
        let (sum_x, sum_y) = shots
            .iter()
            .fold((0.0, 0.0), |(sx, sy), shot| (sx + shot.x, sy + shot.y));
        Some(PitchPoint::from_normalized(sum_x / count, sum_y / count))
    }

    /// Distance from the goal to the centroid of `shots`.
    ///
    /// The centroid is taken first; this is not the mean of per-shot
    /// distances.
    pub fn centroid_distance(shots: &[&ShotEvent]) -> Option<f64> {
        Self::centroid(shots).map(|centre| centre.distance_from_goal())
    }
}
