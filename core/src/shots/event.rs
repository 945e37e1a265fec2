use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Outcome of a shot as recorded by the data provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShotResult {
    Goal,
    SavedShot,
    BlockedShot,
    MissedShots,
    ShotOnPost,
    OwnGoal,
    Other(String),
}

impl ShotResult {
    pub fn as_str(&self) -> &str {
        match self {
            ShotResult::Goal => "Goal",
            ShotResult::SavedShot => "SavedShot",
            ShotResult::BlockedShot => "BlockedShot",
            ShotResult::MissedShots => "MissedShots",
            ShotResult::ShotOnPost => "ShotOnPost",
            ShotResult::OwnGoal => "OwnGoal",
            ShotResult::Other(raw) => raw,
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, ShotResult::Goal)
    }
}

impl From<String> for ShotResult {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Goal" => ShotResult::Goal,
            "SavedShot" => ShotResult::SavedShot,
            "BlockedShot" => ShotResult::BlockedShot,
            "MissedShots" => ShotResult::MissedShots,
            "ShotOnPost" => ShotResult::ShotOnPost,
            "OwnGoal" => ShotResult::OwnGoal,
            _ => ShotResult::Other(raw),
        }
    }
}

impl From<ShotResult> for String {
    fn from(result: ShotResult) -> Self {
        result.as_str().to_string()
    }
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Play context in which the shot was taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Situation {
    OpenPlay,
    FromCorner,
    SetPiece,
    DirectFreekick,
    Penalty,
    Other(String),
}

impl Situation {
    pub fn as_str(&self) -> &str {
        match self {
            Situation::OpenPlay => "OpenPlay",
            Situation::FromCorner => "FromCorner",
            Situation::SetPiece => "SetPiece",
            Situation::DirectFreekick => "DirectFreekick",
            Situation::Penalty => "Penalty",
            Situation::Other(raw) => raw,
        }
    }
}

impl From<String> for Situation {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "OpenPlay" => Situation::OpenPlay,
            "FromCorner" => Situation::FromCorner,
            "SetPiece" => Situation::SetPiece,
            "DirectFreekick" => Situation::DirectFreekick,
            "Penalty" => Situation::Penalty,
            _ => Situation::Other(raw),
        }
    }
}

impl From<Situation> for String {
    fn from(situation: Situation) -> Self {
        situation.as_str().to_string()
    }
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One shot taken by one player. Rows never reference each other.
///
/// Field names follow the column headers of the exported shot table so the
/// same struct reads the source file directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    #[serde(rename = "Player ID")]
    pub player_id: u32,
    #[serde(rename = "Player")]
    pub player_name: String,
    #[serde(rename = "Season")]
    pub season: i32,
    /// Normalized distance along the pitch toward goal, in [0, 1].
    pub x: f64,
    /// Normalized lateral position, in [0, 1].
    pub y: f64,
    #[serde(rename = "Shot xG")]
    pub shot_xg: f64,
    /// Signed goal indicator as stored; use [`ShotEvent::goal_count`].
    #[serde(rename = "isGoal")]
    pub is_goal: i32,
    #[serde(rename = "Shot Result")]
    pub shot_result: ShotResult,
    #[serde(rename = "Situation")]
    pub situation: Situation,
    #[serde(rename = "Filter Game_State")]
    pub filter_game_state: String,
    #[serde(
        rename = "Changed Game State",
        deserialize_with = "deserialize_flag",
        serialize_with = "serialize_flag"
    )]
    pub changed_game_state: bool,
    #[serde(rename = "h_a", default)]
    pub home_away: String,
}

impl ShotEvent {
    /// Goal indicator with the sign dropped.
    pub fn goal_count(&self) -> u32 {
        self.is_goal.unsigned_abs()
    }

    pub fn is_penalty(&self) -> bool {
        self.situation == Situation::Penalty
    }
}

/// Accepts the spellings pandas and hand-edited files produce for booleans.
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "True" | "true" | "TRUE" | "1" => Ok(true),
        "False" | "false" | "FALSE" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean flag {:?}",
            other
        ))),
    }
}

pub(crate) fn serialize_flag<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "True" } else { "False" })
}
