use anyhow::Context;
use serde::{Deserialize, Serialize};
use shotcore::prelude::{FilterCriteria, DEFAULT_PLAYER_ID, FIRST_SEASON, LAST_SEASON};
use shotcore::render::style::DEFAULT_PLAYER_COLOR;
use shotcore::render::{RenderStyle, Rgb, Theme};
use shotcore::ShotTable;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Parameters of one pass, as a front end hands them to the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassParams {
    pub player_id: u32,
    pub start_year: i32,
    pub end_year: i32,
    /// `None` selects every game state present in the data.
    pub game_states: Option<BTreeSet<String>>,
    pub only_goals: bool,
    pub keep_penalties: bool,
    pub only_changed_game_state: bool,
    pub color: Rgb,
    pub theme: Theme,
}

impl Default for PassParams {
    fn default() -> Self {
        Self {
            player_id: DEFAULT_PLAYER_ID,
            start_year: FIRST_SEASON,
            end_year: LAST_SEASON,
            game_states: None,
            only_goals: false,
            keep_penalties: false,
            only_changed_game_state: false,
            color: DEFAULT_PLAYER_COLOR,
            theme: Theme::Dark,
        }
    }
}

impl PassParams {
    pub fn to_criteria(&self, table: &ShotTable) -> FilterCriteria {
        let mut criteria = FilterCriteria::for_player(self.player_id, table);
        criteria.start_year = self.start_year;
        criteria.end_year = self.end_year;
        if let Some(states) = &self.game_states {
            criteria.game_states = states.clone();
        }
        criteria.only_goals = self.only_goals;
        criteria.keep_penalties = self.keep_penalties;
        criteria.only_changed_game_state = self.only_changed_game_state;
        criteria
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle::new(self.color, self.theme)
    }
}

/// Process-level configuration, optionally read from YAML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Shot table to load.
    pub data: Option<PathBuf>,
    /// Generate a synthetic table instead of loading one.
    pub demo_seed: Option<u64>,
    pub output_dir: PathBuf,
    /// Write the detail table and shot map after the summary.
    pub render: bool,
    #[serde(flatten)]
    pub params: PassParams,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: None,
            demo_seed: None,
            output_dir: PathBuf::from("static"),
            render: false,
            params: PassParams::default(),
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        Ok(config)
    }
}
