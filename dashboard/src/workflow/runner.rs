use crate::workflow::config::PassParams;
use anyhow::Context;
use shotcore::prelude::{FilterCriteria, ShotView};
use shotcore::processing::{filter_shots, summarize_by_game_state, GameStateSummary, ShotOverview};
use shotcore::render::{render_png, PitchScene, IMAGE_FILE_NAME};
use shotcore::shots::{detail_csv, DETAIL_FILE_NAME};
use shotcore::ShotTable;
use std::fs;
use std::path::{Path, PathBuf};

/// Shown instead of any output when the filters leave nothing.
pub const EMPTY_MESSAGE: &str = "Sorry no entries with these inputs, please change your inputs";

pub struct PassResult<'a> {
    pub criteria: FilterCriteria,
    pub shots: ShotView<'a>,
    pub summary: Vec<GameStateSummary>,
    pub overview: Option<ShotOverview>,
}

impl PassResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn player_name(&self) -> Option<&str> {
        self.overview
            .as_ref()
            .map(|overview| overview.player_name.as_str())
    }
}

pub struct ExportedFiles {
    pub detail: PathBuf,
    pub image: PathBuf,
}

/// Runs one filter/aggregate pass for a fixed set of parameters.
#[derive(Clone)]
pub struct Runner {
    params: PassParams,
}

impl Runner {
    pub fn new(params: PassParams) -> Self {
        Self { params }
    }

    pub fn execute<'a>(&self, table: &'a ShotTable) -> anyhow::Result<PassResult<'a>> {
        let criteria = self.params.to_criteria(table);
        criteria
            .validate(table)
            .context("validating pass parameters")?;

        let shots = filter_shots(table, &criteria);
        if shots.is_empty() {
            log::info!("pass for player {} matched no shots", criteria.player_id);
            return Ok(PassResult {
                criteria,
                shots,
                summary: Vec::new(),
                overview: None,
            });
        }

        let summary = summarize_by_game_state(&shots);
        let overview = ShotOverview::from_shots(&shots).context("summarizing filtered shots")?;
        log::info!(
            "pass for player {} kept {} shots across {} game states",
            criteria.player_id,
            shots.len(),
            summary.len()
        );

        Ok(PassResult {
            criteria,
            shots,
            summary,
            overview,
        })
    }

    /// Shot map PNG for a pass.
    pub fn render(&self, result: &PassResult<'_>) -> anyhow::Result<Vec<u8>> {
        let scene = PitchScene::build(&result.shots, self.params.render_style())
            .context("building shot map")?;
        render_png(&scene).context("rasterizing shot map")
    }

    /// Writes the detail table and shot map under their fixed names.
    /// An empty pass writes nothing and returns `None`.
    pub fn export(
        &self,
        result: &PassResult<'_>,
        dir: &Path,
    ) -> anyhow::Result<Option<ExportedFiles>> {
        if result.is_empty() {
            log::info!("{}", EMPTY_MESSAGE);
            return Ok(None);
        }
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;

        let detail = dir.join(DETAIL_FILE_NAME);
        let csv = detail_csv(&result.shots).context("encoding detail table")?;
        fs::write(&detail, csv).with_context(|| format!("writing {}", detail.display()))?;

        let image = dir.join(IMAGE_FILE_NAME);
        let png = self.render(result)?;
        fs::write(&image, png).with_context(|| format!("writing {}", image.display()))?;

        Ok(Some(ExportedFiles { detail, image }))
    }
}
