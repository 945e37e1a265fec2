use anyhow::{bail, Context};
use clap::Parser;
use generator::profile::build_shot_table;
use gui_bridge::bridge::{default_bind_address, serve, BridgeState};
use gui_bridge::model::SummaryModel;
use shotcore::prelude::DEFAULT_PLAYER_ID;
use shotcore::render::{Rgb, Theme};
use shotcore::ShotTable;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use workflow::config::DashboardConfig;
use workflow::report::summary_table;
use workflow::runner::{Runner, EMPTY_MESSAGE};

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Compare a player's shots across game states")]
struct Args {
    /// Load settings from YAML; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Shot table CSV, plain or gzipped
    #[arg(long)]
    data: Option<PathBuf>,
    /// Use a synthetic shot table generated from this seed
    #[arg(long)]
    demo_seed: Option<u64>,
    #[arg(long)]
    player: Option<u32>,
    #[arg(long)]
    start_year: Option<i32>,
    #[arg(long)]
    end_year: Option<i32>,
    /// Game-state label to keep; repeat for several. Default is every label
    #[arg(long = "game-state")]
    game_states: Vec<String>,
    /// Bare flag means true; `--only-goals false` overrides the config
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    only_goals: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    keep_penalties: Option<bool>,
    /// Keep only shots that changed the game state
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    only_changed: Option<bool>,
    /// Shot colour as #RRGGBB
    #[arg(long)]
    color: Option<Rgb>,
    /// light or dark
    #[arg(long)]
    theme: Option<Theme>,
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Write PlayerShots.csv and PlayerShots.png
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    render: Option<bool>,
    /// Print the pass as JSON instead of a text table
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Answer passes over HTTP until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value_t = default_bind_address())]
    bind: SocketAddr,
}

impl Args {
    fn merge_into(self, config: &mut DashboardConfig) {
        let params = &mut config.params;
        if let Some(player) = self.player {
            params.player_id = player;
        }
        if let Some(year) = self.start_year {
            params.start_year = year;
        }
        if let Some(year) = self.end_year {
            params.end_year = year;
        }
        if !self.game_states.is_empty() {
            params.game_states = Some(self.game_states.into_iter().collect());
        }
        if let Some(flag) = self.only_goals {
            params.only_goals = flag;
        }
        if let Some(flag) = self.keep_penalties {
            params.keep_penalties = flag;
        }
        if let Some(flag) = self.only_changed {
            params.only_changed_game_state = flag;
        }
        if let Some(color) = self.color {
            params.color = color;
        }
        if let Some(theme) = self.theme {
            params.theme = theme;
        }

        if self.data.is_some() {
            config.data = self.data;
        }
        if self.demo_seed.is_some() {
            config.demo_seed = self.demo_seed;
        }
        if let Some(dir) = self.out_dir {
            config.output_dir = dir;
        }
        if let Some(flag) = self.render {
            config.render = flag;
        }
    }
}

fn load_table(config: &DashboardConfig) -> anyhow::Result<ShotTable> {
    if let Some(seed) = config.demo_seed {
        log::info!("generating synthetic shot table from seed {}", seed);
        return build_shot_table(DEFAULT_PLAYER_ID, seed);
    }
    let Some(path) = config.data.as_ref() else {
        bail!("no shot table given; pass --data <CSV> or --demo-seed <N>");
    };
    ShotTable::load(path).with_context(|| format!("loading shot table {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match args.config.as_ref() {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    let (json, serve_http, bind) = (args.json, args.serve, args.bind);
    args.merge_into(&mut config);

    let table = load_table(&config)?;
    log::info!(
        "shot table ready: {} rows, game states {:?}",
        table.len(),
        table.game_states()
    );

    if serve_http {
        let runtime = TokioBuilder::new_multi_thread()
            .enable_all()
            .build()
            .context("creating runtime for the HTTP bridge")?;
        println!("HTTP bridge on http://{} (Ctrl+C to stop)", bind);
        return runtime.block_on(serve(BridgeState::new(table), bind));
    }

    let runner = Runner::new(config.params.clone());
    let result = runner.execute(&table)?;

    if json {
        let model = SummaryModel::from(&result);
        println!(
            "{}",
            serde_json::to_string_pretty(&model).context("encoding pass as JSON")?
        );
    } else if result.is_empty() {
        println!("{}", EMPTY_MESSAGE);
    } else {
        println!("PLAYER SHOT BY GAMESTATE COMPARISON");
        println!("Player: {}", result.player_name().unwrap_or_default());
        if let Some(overview) = result.overview.as_ref() {
            println!(
                "Seasons {}, {} shots, {} goals, {:.2} xG",
                overview.seasons, overview.total_shots, overview.total_goals, overview.total_xg
            );
        }
        println!();
        print!("{}", summary_table(&result.summary));
    }

    if config.render {
        if let Some(files) = runner.export(&result, &config.output_dir)? {
            println!(
                "wrote {} and {}",
                files.detail.display(),
                files.image.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(config: DashboardConfig, argv: &[&str]) -> DashboardConfig {
        let mut config = config;
        let args = Args::try_parse_from(std::iter::once("gamestates").chain(argv.iter().copied()))
            .unwrap();
        args.merge_into(&mut config);
        config
    }

    #[test]
    fn bare_flags_enable_options() {
        let config = merged(
            DashboardConfig::default(),
            &["--keep-penalties", "--only-goals", "--render"],
        );
        assert!(config.params.keep_penalties);
        assert!(config.params.only_goals);
        assert!(!config.params.only_changed_game_state);
        assert!(config.render);
    }

    #[test]
    fn explicit_false_overrides_config_file() {
        let mut base = DashboardConfig::default();
        base.params.keep_penalties = true;
        base.render = true;

        let config = merged(base.clone(), &["--keep-penalties", "false", "--render=false"]);
        assert!(!config.params.keep_penalties);
        assert!(!config.render);

        let untouched = merged(base, &[]);
        assert!(untouched.params.keep_penalties);
        assert!(untouched.render);
    }

    #[test]
    fn repeated_game_state_flags_collect() {
        let config = merged(
            DashboardConfig::default(),
            &["--game-state", "Winning", "--game-state", "Drawing", "--player", "647"],
        );
        assert_eq!(config.params.player_id, 647);
        assert_eq!(config.params.game_states.map(|states| states.len()), Some(2));
    }
}
