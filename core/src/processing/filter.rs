use crate::prelude::{FilterCriteria, FilterStage, ShotView};
use crate::shots::{ShotEvent, ShotTable};
use crate::telemetry::log::LogManager;
use std::collections::BTreeSet;

/// Keeps shots taken by one player.
pub struct PlayerStage {
    player_id: u32,
}

impl FilterStage for PlayerStage {
    fn name(&self) -> &'static str {
        "player"
    }

    fn keep(&self, shot: &ShotEvent) -> bool {
        shot.player_id == self.player_id
    }
}

/// Keeps shots from an inclusive season range.
pub struct SeasonStage {
    start_year: i32,
    end_year: i32,
}

impl FilterStage for SeasonStage {
    fn name(&self) -> &'static str {
        "season"
    }

    fn keep(&self, shot: &ShotEvent) -> bool {
        (self.start_year..=self.end_year).contains(&shot.season)
    }
}

pub struct GameStateStage {
    labels: BTreeSet<String>,
}

impl FilterStage for GameStateStage {
    fn name(&self) -> &'static str {
        "game_state"
    }

    fn keep(&self, shot: &ShotEvent) -> bool {
        self.labels.contains(&shot.filter_game_state)
    }
}

pub struct GoalsOnlyStage;

impl FilterStage for GoalsOnlyStage {
    fn name(&self) -> &'static str {
        "goals_only"
    }

    fn keep(&self, shot: &ShotEvent) -> bool {
        shot.shot_result.is_goal()
    }
}

/// Drops penalties; only installed when penalties are not kept.
pub struct NoPenaltyStage;

impl FilterStage for NoPenaltyStage {
    fn name(&self) -> &'static str {
        "no_penalties"
    }

    fn keep(&self, shot: &ShotEvent) -> bool {
        !shot.is_penalty()
    }
}

pub struct ChangedStateStage;

impl FilterStage for ChangedStateStage {
    fn name(&self) -> &'static str {
        "changed_game_state"
    }

    fn keep(&self, shot: &ShotEvent) -> bool {
        shot.changed_game_state
    }
}

/// Ordered chain of filter stages built from one set of criteria.
pub struct FilterPipeline {
    stages: Vec<Box<dyn FilterStage + Send + Sync>>,
    logger: LogManager,
}

impl FilterPipeline {
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut stages: Vec<Box<dyn FilterStage + Send + Sync>> = vec![
            Box::new(PlayerStage {
                player_id: criteria.player_id,
            }),
            Box::new(SeasonStage {
                start_year: criteria.start_year,
                end_year: criteria.end_year,
            }),
            Box::new(GameStateStage {
                labels: criteria.game_states.clone(),
            }),
        ];
        if criteria.only_goals {
            stages.push(Box::new(GoalsOnlyStage));
        }
        if !criteria.keep_penalties {
            stages.push(Box::new(NoPenaltyStage));
        }
        if criteria.only_changed_game_state {
            stages.push(Box::new(ChangedStateStage));
        }

        Self {
            stages,
            logger: LogManager::new(),
        }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn run<'a>(&self, table: &'a ShotTable) -> ShotView<'a> {
        let mut view: ShotView<'a> = table.shots().iter().collect();
        for stage in &self.stages {
            view = stage.execute(view);
            self.logger.trace_stage(stage.name(), view.len());
        }
        view
    }
}

/// Applies every filter implied by `criteria` to `table`.
pub fn filter_shots<'a>(table: &'a ShotTable, criteria: &FilterCriteria) -> ShotView<'a> {
    FilterPipeline::from_criteria(criteria).run(table)
}
