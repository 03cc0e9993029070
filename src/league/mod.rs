// League domain model: categories, players, teams, matchups, schedule,
// demo fixtures, and CSV ingestion.

pub mod category;
pub mod fixtures;
pub mod import;
pub mod matchup;
pub mod player;
pub mod team;
