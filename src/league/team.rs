// League teams and the weekly schedule.

use serde::{Deserialize, Serialize};

use crate::league::player::Player;

/// A fantasy team in the league snapshot.
///
/// `rank` and `record` are display conventions carried through from the
/// league feed; neither uniqueness nor the `W-L-T` format is validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub rank: u32,
    pub record: String,
    pub roster: Vec<Player>,
}

/// Outcome of a completed weekly matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    W,
    L,
    D,
}

/// Final category score of a past week, e.g. `6-3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekResult {
    pub score: String,
    pub outcome: Outcome,
}

/// Pre-week scouting note: schedule volume plus the category to attack and
/// the category to defend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyNote {
    pub games_mine: u32,
    pub games_opp: u32,
    pub target_cat: String,
    pub threat_cat: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStatus {
    Past,
    Current,
    Future,
}

/// One week on the season schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub week: u32,
    pub opponent: String,
    pub status: WeekStatus,
    pub result: Option<WeekResult>,
    pub strategy_note: Option<StrategyNote>,
}
