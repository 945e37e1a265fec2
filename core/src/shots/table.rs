use crate::prelude::CoreResult;
use crate::shots::event::ShotEvent;
use crate::telemetry::log::LogManager;
use flate2::read::MultiGzDecoder;
use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::Path;

pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Immutable in-memory shot table loaded once per process.
#[derive(Debug, Clone, Default)]
pub struct ShotTable {
    shots: Vec<ShotEvent>,
}

impl ShotTable {
    pub fn new(shots: Vec<ShotEvent>) -> Self {
        Self { shots }
    }

    /// Reads a comma-separated table with a header row, plain or gzipped.
    pub fn from_reader<R: Read>(mut reader: R) -> CoreResult<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        if bytes.starts_with(GZIP_MAGIC) {
            let mut plain = Vec::new();
            MultiGzDecoder::new(bytes.as_slice()).read_to_end(&mut plain)?;
            bytes = plain;
        }
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes.as_slice());

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Fields)
            .from_reader(body);

        let mut shots = Vec::new();
        for record in csv_reader.deserialize::<ShotEvent>() {
            shots.push(record?);
        }

        let table = Self::new(shots);
        table.report_signed_goals();
        Ok(table)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let file = fs::File::open(path.as_ref())?;
        let table = Self::from_reader(file)?;
        LogManager::new().record(&format!(
            "loaded {} shots from {}",
            table.len(),
            path.as_ref().display()
        ));
        Ok(table)
    }

    pub fn shots(&self) -> &[ShotEvent] {
        &self.shots
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Distinct game-state labels in natural order.
    pub fn game_states(&self) -> BTreeSet<String> {
        self.shots
            .iter()
            .map(|shot| shot.filter_game_state.clone())
            .collect()
    }

    pub fn has_player(&self, player_id: u32) -> bool {
        self.shots.iter().any(|shot| shot.player_id == player_id)
    }

    pub fn player_rows(&self, player_id: u32) -> usize {
        self.shots
            .iter()
            .filter(|shot| shot.player_id == player_id)
            .count()
    }

    fn report_signed_goals(&self) {
        let negative = self.shots.iter().filter(|shot| shot.is_goal < 0).count();
        if negative > 0 {
            LogManager::new().warn(&format!(
                "{} rows carry a negative goal indicator; counted by magnitude",
                negative
            ));
        }
    }
}
