use crate::workflow::runner::{PassResult, EMPTY_MESSAGE};
use serde::Serialize;
use shotcore::processing::{GameStateSummary, ShotOverview};

/// What a front end gets back for one pass.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryModel {
    pub player_id: u32,
    pub player_name: Option<String>,
    pub shots: usize,
    pub summary: Vec<GameStateSummary>,
    pub overview: Option<ShotOverview>,
    /// Set when the filters left nothing to show.
    pub message: Option<String>,
}

impl From<&PassResult<'_>> for SummaryModel {
    fn from(result: &PassResult<'_>) -> Self {
        Self {
            player_id: result.criteria.player_id,
            player_name: result.player_name().map(str::to_string),
            shots: result.shots.len(),
            summary: result.summary.clone(),
            overview: result.overview.clone(),
            message: result.is_empty().then(|| EMPTY_MESSAGE.to_string()),
        }
    }
}
