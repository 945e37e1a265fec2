use crate::prelude::{CoreError, CoreResult};
use crate::shots::event::{serialize_flag, ShotEvent};
use crate::shots::table::UTF8_BOM;
use serde::Serialize;

/// File name the detail table is offered under.
pub const DETAIL_FILE_NAME: &str = "PlayerShots.csv";

/// Display columns of a shot; coordinates, venue, raw goal flag and the
/// grouping label stay internal.
#[derive(Debug, Serialize)]
struct DetailRow<'a> {
    #[serde(rename = "Player ID")]
    player_id: u32,
    #[serde(rename = "Player")]
    player_name: &'a str,
    #[serde(rename = "Season")]
    season: i32,
    #[serde(rename = "Shot xG")]
    shot_xg: f64,
    #[serde(rename = "Shot Result")]
    shot_result: &'a str,
    #[serde(rename = "Situation")]
    situation: &'a str,
    #[serde(rename = "Changed Game State", serialize_with = "serialize_flag")]
    changed_game_state: bool,
}

impl<'a> From<&'a ShotEvent> for DetailRow<'a> {
    fn from(shot: &'a ShotEvent) -> Self {
        Self {
            player_id: shot.player_id,
            player_name: &shot.player_name,
            season: shot.season,
            shot_xg: shot.shot_xg,
            shot_result: shot.shot_result.as_str(),
            situation: shot.situation.as_str(),
            changed_game_state: shot.changed_game_state,
        }
    }
}

/// Encodes the filtered rows as BOM-prefixed UTF-8 comma-separated text.
pub fn detail_csv(rows: &[&ShotEvent]) -> CoreResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    if rows.is_empty() {
        writer.write_record([
            "Player ID",
            "Player",
            "Season",
            "Shot xG",
            "Shot Result",
            "Situation",
            "Changed Game State",
        ])?;
    }
    for shot in rows {
        writer.serialize(DetailRow::from(*shot))?;
    }
    writer
        .into_inner()
        .map_err(|err| CoreError::Io(err.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shots::fixtures::{goal, shot};

    #[test]
    fn detail_csv_starts_with_bom_and_drops_internal_columns() {
        let rows = vec![goal(7, 2019, "Winning"), shot(7, 2020, "Losing")];
        let refs: Vec<&ShotEvent> = rows.iter().collect();
        let bytes = detail_csv(&refs).unwrap();

        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Player ID,Player,Season,Shot xG,Shot Result,Situation,Changed Game State"
        );
        assert_eq!(lines.next().unwrap(), "7,Player 7,2019,0.4,Goal,OpenPlay,True");
        assert_eq!(
            lines.next().unwrap(),
            "7,Player 7,2020,0.1,SavedShot,OpenPlay,False"
        );
        assert!(!text.contains("Winning"));
        assert!(!text.contains("h_a"));
    }

    #[test]
    fn empty_detail_still_has_header() {
        let bytes = detail_csv(&[]).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert!(text.starts_with("Player ID,"));
    }
}
