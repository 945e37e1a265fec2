//! Data-only description of the shot map.
//!
//! Positions are pitch coordinates: `x` runs toward the goal at 100 and `y`
//! is lateral. The drawing keeps the goal at the top and mirrors the lateral
//! axis, so larger `y` sits further left.

use crate::math::{PitchPoint, GOAL_CENTRE};
use crate::prelude::CoreResult;
use crate::processing::ShotOverview;
use crate::render::style::{RenderStyle, Rgb, CAPTION_GREY, GOLD};
use crate::shots::ShotEvent;

/// Depth of the distance arrow, just beyond the goal line.
const ARROW_DEPTH: f64 = 102.5;
/// Depth of the statistic markers.
const MARKER_DEPTH: f64 = 56.0;
/// Depth at which marker captions start.
const CAPTION_DEPTH: f64 = 50.0;
/// Lateral slots of the statistic markers, first one drawn leftmost.
pub const MARKER_SLOTS: [f64; 5] = [90.0, 70.0, 50.0, 30.0, 10.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Centre,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Top,
    Middle,
}

/// Text placed on the pitch. `size` is in points.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub at: PitchPoint,
    pub text: String,
    pub size: f64,
    pub color: Rgb,
    pub anchor: Anchor,
    pub baseline: Baseline,
}

impl Label {
    fn new(at: PitchPoint, text: impl Into<String>, size: f64, color: Rgb) -> Self {
        Self {
            at,
            text: text.into(),
            size,
            color,
            anchor: Anchor::Centre,
            baseline: Baseline::Middle,
        }
    }

    fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    fn hanging(mut self) -> Self {
        self.baseline = Baseline::Top;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub at: PitchPoint,
    pub goal: bool,
}

/// Ring around the goal at the average shot distance, with its arrow.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRing {
    pub centre: PitchPoint,
    pub radius: f64,
    pub arrow_from: PitchPoint,
    pub arrow_to: PitchPoint,
    pub value: Label,
    pub caption: Label,
}

/// Hexagon carrying one statistic with a caption below it.
#[derive(Debug, Clone, PartialEq)]
pub struct StatMarker {
    pub at: PitchPoint,
    pub value: Label,
    pub caption: Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlays {
    pub title: Label,
    pub subtitle: Label,
    pub ring: DistanceRing,
    pub markers: Vec<StatMarker>,
    pub credit: Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PitchScene {
    pub style: RenderStyle,
    pub shots: Vec<ScatterPoint>,
    pub overlays: Option<Overlays>,
}

impl PitchScene {
    /// Bare pitch with no shots and no overlays.
    pub fn empty(style: RenderStyle) -> Self {
        Self {
            style,
            shots: Vec::new(),
            overlays: None,
        }
    }

    /// Builds the shot map for one player's filtered shots.
    ///
    /// No shots gives [`PitchScene::empty`]. Shots from more than one player
    /// are rejected.
    pub fn build(shots: &[&ShotEvent], style: RenderStyle) -> CoreResult<Self> {
        let Some(overview) = ShotOverview::from_shots(shots)? else {
            return Ok(Self::empty(style));
        };

        let points = shots
            .iter()
            .map(|shot| ScatterPoint {
                at: PitchPoint::of(shot),
                goal: shot.shot_result.is_goal(),
            })
            .collect();

        Ok(Self {
            style,
            shots: points,
            overlays: Some(Self::overlays(&overview, &style)),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty() && self.overlays.is_none()
    }

    fn overlays(overview: &ShotOverview, style: &RenderStyle) -> Overlays {
        let text = style.theme.foreground();
        let distance = overview.average_distance;

        let ring = DistanceRing {
            centre: GOAL_CENTRE,
            radius: distance,
            arrow_from: PitchPoint::new(ARROW_DEPTH, GOAL_CENTRE.y),
            arrow_to: PitchPoint::new(ARROW_DEPTH, GOAL_CENTRE.y - distance),
            value: Label::new(
                PitchPoint::new(ARROW_DEPTH, GOAL_CENTRE.y - 1.0 - distance),
                format!("{:.2}m", distance),
                11.5,
                CAPTION_GREY,
            )
            .anchored(Anchor::Left),
            caption: Label::new(
                PitchPoint::new(ARROW_DEPTH, GOAL_CENTRE.y + 1.0),
                "Avg distance",
                8.0,
                text,
            )
            .anchored(Anchor::Right),
        };

        let figures = [
            (overview.total_shots.to_string(), "Total\nShots"),
            (overview.total_goals.to_string(), "Total\nGoals"),
            (
                format!("{:.2}", overview.overperformance_per_shot),
                "Finishing\nOverperformance\nper Shot",
            ),
            (format!("{:.2}", overview.xg_per_shot), "xG\nper Shot"),
            (
                overview.game_state_altering.to_string(),
                "Number of\nGame-State\nAltering Goals",
            ),
        ];
        let markers = MARKER_SLOTS
            .iter()
            .zip(figures)
            .map(|(&lateral, (value, caption))| StatMarker {
                at: PitchPoint::new(MARKER_DEPTH, lateral),
                value: Label::new(
                    PitchPoint::new(MARKER_DEPTH, lateral),
                    value,
                    13.0,
                    style.player_color,
                ),
                caption: Label::new(
                    PitchPoint::new(CAPTION_DEPTH, lateral),
                    caption,
                    8.0,
                    CAPTION_GREY,
                )
                .hanging(),
            })
            .collect();

        Overlays {
            title: Label::new(
                PitchPoint::new(109.0, 103.0),
                overview.player_name.to_uppercase(),
                22.0,
                GOLD,
            )
            .anchored(Anchor::Left),
            subtitle: Label::new(
                PitchPoint::new(104.5, 103.0),
                format!("{} | League games only", overview.seasons),
                13.0,
                text,
            )
            .anchored(Anchor::Left),
            ring,
            markers,
            credit: Label::new(
                PitchPoint::new(46.5, 103.0),
                "Made using All About GameStates App. By @khatri_shreyas.",
                7.0,
                text,
            )
            .anchored(Anchor::Left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::Theme;
    use crate::shots::fixtures::{at, goal, shot};

    fn style() -> RenderStyle {
        RenderStyle::new("#123456".parse().unwrap(), Theme::Light)
    }

    #[test]
    fn empty_input_gives_bare_pitch() {
        let scene = PitchScene::build(&[], style()).unwrap();
        assert!(scene.is_empty());
        assert!(scene.shots.is_empty());
        assert!(scene.overlays.is_none());
    }

    #[test]
    fn goals_are_flagged_in_scatter_layer() {
        let rows = vec![
            at(shot(3, 2019, "Drawing"), 0.8, 0.3),
            at(goal(3, 2020, "Winning"), 0.9, 0.5),
        ];
        let refs: Vec<&ShotEvent> = rows.iter().collect();
        let scene = PitchScene::build(&refs, style()).unwrap();

        assert_eq!(scene.shots.len(), 2);
        assert!(!scene.shots[0].goal);
        assert!(scene.shots[1].goal);
        assert_eq!(scene.shots[0].at, PitchPoint::new(80.0, 30.0));
    }

    #[test]
    fn overlays_carry_ring_and_five_markers() {
        let rows = vec![
            at(shot(3, 2018, "Drawing"), 0.8, 0.5),
            at(goal(3, 2018, "Winning"), 0.9, 0.5),
        ];
        let refs: Vec<&ShotEvent> = rows.iter().collect();
        let scene = PitchScene::build(&refs, style()).unwrap();
        let overlays = scene.overlays.unwrap();

        assert!((overlays.ring.radius - 15.0).abs() < 1e-9);
        assert_eq!(overlays.ring.centre, GOAL_CENTRE);
        assert!((overlays.ring.arrow_to.y - 35.0).abs() < 1e-9);
        assert_eq!(overlays.ring.value.text, "15.00m");

        let slots: Vec<f64> = overlays.markers.iter().map(|m| m.at.y).collect();
        assert_eq!(slots, MARKER_SLOTS.to_vec());
        let values: Vec<&str> = overlays
            .markers
            .iter()
            .map(|m| m.value.text.as_str())
            .collect();
        assert_eq!(values, vec!["2", "1", "0.25", "0.25", "1"]);
        assert!(overlays
            .markers
            .iter()
            .all(|m| m.value.color == scene.style.player_color));

        assert_eq!(overlays.title.text, "PLAYER 3");
        assert_eq!(overlays.subtitle.text, "2018-2019 | League games only");
    }

    #[test]
    fn mixed_players_cannot_be_drawn() {
        let rows = vec![shot(3, 2018, "Drawing"), shot(4, 2018, "Drawing")];
        let refs: Vec<&ShotEvent> = rows.iter().collect();
        assert!(PitchScene::build(&refs, style()).is_err());
    }
}
