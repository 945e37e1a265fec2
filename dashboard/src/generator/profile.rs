use anyhow::ensure;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use shotcore::prelude::{FIRST_SEASON, LAST_SEASON};
use shotcore::shots::{ShotEvent, ShotResult, Situation};
use shotcore::ShotTable;

const GAME_STATES: [&str; 3] = ["Drawing", "Losing", "Winning"];
const NAMES: [&str; 6] = [
    "Harry Kane",
    "Son Heung-Min",
    "Jamie Vardy",
    "Mohamed Salah",
    "Sergio Aguero",
    "Pierre-Emerick Aubameyang",
];

/// Configuration for generating a synthetic shot table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub first_player_id: u32,
    pub players: u32,
    pub shots_per_season: usize,
    pub first_season: i32,
    pub last_season: i32,
    pub penalty_rate: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            first_player_id: 2097,
            players: 3,
            shots_per_season: 40,
            first_season: FIRST_SEASON,
            last_season: LAST_SEASON,
            penalty_rate: 0.05,
            seed: 0,
        }
    }
}

fn open_play_shot(rng: &mut StdRng) -> (f64, f64, f64, Situation) {
    let x: f64 = rng.gen_range(0.68..0.99);
    let y: f64 = rng.gen_range(0.2..0.8);
    let distance = ((1.0 - x).powi(2) + (0.5 - y).powi(2)).sqrt();
    let xg = (0.6 * (-distance * 9.0).exp()).clamp(0.01, 0.95);
    let situation = match rng.gen_range(0..10) {
        0 => Situation::FromCorner,
        1 => Situation::SetPiece,
        2 => Situation::DirectFreekick,
        _ => Situation::OpenPlay,
    };
    (x, y, xg, situation)
}

fn miss_result(rng: &mut StdRng) -> ShotResult {
    match rng.gen_range(0..4) {
        0 => ShotResult::SavedShot,
        1 => ShotResult::BlockedShot,
        2 => ShotResult::ShotOnPost,
        _ => ShotResult::MissedShots,
    }
}

pub fn build_shot_table_from_config(config: &GeneratorConfig) -> anyhow::Result<ShotTable> {
    ensure!(
        config.first_season <= config.last_season,
        "generator season range {}..={} is inverted",
        config.first_season,
        config.last_season
    );
    ensure!(
        (0.0..=1.0).contains(&config.penalty_rate),
        "penalty rate {} outside [0, 1]",
        config.penalty_rate
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut shots = Vec::new();

    for offset in 0..config.players {
        let player_id = config.first_player_id + offset;
        let player_name = NAMES[offset as usize % NAMES.len()].to_string();
        for season in config.first_season..=config.last_season {
            for _ in 0..config.shots_per_season {
                let (x, y, shot_xg, situation) = if rng.gen_bool(config.penalty_rate) {
                    (0.885, 0.5, 0.76, Situation::Penalty)
                } else {
                    open_play_shot(&mut rng)
                };
                let scored = rng.gen_bool(shot_xg);
                let shot_result = if scored {
                    ShotResult::Goal
                } else {
                    miss_result(&mut rng)
                };

                shots.push(ShotEvent {
                    player_id,
                    player_name: player_name.clone(),
                    season,
                    x,
                    y,
                    shot_xg,
                    is_goal: i32::from(scored),
                    shot_result,
                    situation,
                    filter_game_state: GAME_STATES[rng.gen_range(0..GAME_STATES.len())]
                        .to_string(),
                    changed_game_state: scored && rng.gen_bool(0.6),
                    home_away: if rng.gen_bool(0.5) { "h" } else { "a" }.to_string(),
                });
            }
        }
    }

    Ok(ShotTable::new(shots))
}

pub fn build_shot_table(first_player_id: u32, seed: u64) -> anyhow::Result<ShotTable> {
    let config = GeneratorConfig {
        first_player_id,
        seed,
        ..Default::default()
    };
    build_shot_table_from_config(&config)
}
