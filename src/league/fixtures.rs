// Demo dataset: the rosters, waiver pool, league table, schedule, and
// current matchup rendered when no league feed is connected.

use crate::league::category::Category;
use crate::league::matchup::{GamesVolume, Matchup, MatchupCategory};
use crate::league::player::{CatValues, Player, PlayerStatus, StatLine};
use crate::league::team::{Outcome, ScheduleEntry, StrategyNote, Team, WeekResult, WeekStatus};

fn player(
    id: &str,
    name: &str,
    team: &str,
    positions: &[&str],
    stats: StatLine,
    cat_values: CatValues,
    status: PlayerStatus,
    protected: bool,
) -> Player {
    Player {
        id: id.into(),
        name: name.into(),
        team: team.into(),
        positions: positions.iter().map(|p| p.to_string()).collect(),
        avg_stats: stats,
        cat_values: Some(cat_values),
        status,
        protected,
    }
}

/// The user's five-man demo roster.
pub fn demo_roster() -> Vec<Player> {
    vec![
        player(
            "1",
            "Nikola Jokić",
            "DEN",
            &["C"],
            StatLine { pts: 26.1, reb: 12.3, ast: 9.0, stl: 1.3, blk: 0.9, fgp: 58.3, ftp: 81.7, tpm: 1.1, to: 3.0 },
            CatValues { pts: 2.1, reb: 2.8, ast: 3.0, stl: 1.2, blk: 0.8, fgp: 2.5, ftp: 0.5, tpm: -0.5, to: -1.8 },
            PlayerStatus::Healthy,
            true,
        ),
        player(
            "2",
            "Shai Gilgeous-Alexander",
            "OKC",
            &["PG"],
            StatLine { pts: 30.1, reb: 5.5, ast: 6.2, stl: 2.0, blk: 0.9, fgp: 53.5, ftp: 87.4, tpm: 1.3, to: 2.2 },
            CatValues { pts: 2.8, reb: 0.2, ast: 1.5, stl: 3.0, blk: 0.8, fgp: 1.8, ftp: 2.2, tpm: -0.2, to: -0.5 },
            PlayerStatus::Healthy,
            true,
        ),
        player(
            "3",
            "Luka Dončić",
            "DAL",
            &["PG", "SG"],
            StatLine { pts: 33.9, reb: 9.2, ast: 9.8, stl: 1.4, blk: 0.5, fgp: 48.7, ftp: 78.6, tpm: 4.1, to: 4.0 },
            CatValues { pts: 3.0, reb: 1.8, ast: 3.0, stl: 1.4, blk: -0.2, fgp: 0.2, ftp: -0.4, tpm: 3.0, to: -2.8 },
            PlayerStatus::DayToDay,
            false,
        ),
        player(
            "4",
            "Giannis Antetokounmpo",
            "MIL",
            &["PF", "C"],
            StatLine { pts: 30.4, reb: 11.5, ast: 6.5, stl: 1.2, blk: 1.1, fgp: 61.1, ftp: 65.7, tpm: 0.5, to: 3.4 },
            CatValues { pts: 2.9, reb: 2.5, ast: 1.6, stl: 1.1, blk: 1.4, fgp: 3.0, ftp: -3.0, tpm: -1.5, to: -2.2 },
            PlayerStatus::Healthy,
            false,
        ),
        player(
            "5",
            "Jayson Tatum",
            "BOS",
            &["SF", "PF"],
            StatLine { pts: 26.9, reb: 8.1, ast: 4.9, stl: 1.0, blk: 0.6, fgp: 47.1, ftp: 83.3, tpm: 3.1, to: 2.5 },
            CatValues { pts: 2.2, reb: 1.4, ast: 0.8, stl: 0.4, blk: 0.2, fgp: -0.2, ftp: 1.2, tpm: 2.1, to: -0.8 },
            PlayerStatus::Healthy,
            false,
        ),
    ]
}

/// The free-agent pool shown on the waiver wire.
pub fn waiver_pool() -> Vec<Player> {
    vec![
        player(
            "w1",
            "T.J. McConnell",
            "IND",
            &["PG"],
            StatLine { pts: 10.2, reb: 2.7, ast: 5.5, stl: 1.1, blk: 0.1, fgp: 55.6, ftp: 80.0, tpm: 0.2, to: 1.4 },
            CatValues { pts: -0.5, reb: -1.2, ast: 1.8, stl: 1.5, blk: -0.8, fgp: 1.5, ftp: 0.1, tpm: -2.0, to: 0.8 },
            PlayerStatus::Healthy,
            false,
        ),
        player(
            "w2",
            "Grayson Allen",
            "PHX",
            &["SG", "SF"],
            StatLine { pts: 13.5, reb: 3.9, ast: 3.0, stl: 0.9, blk: 0.6, fgp: 49.9, ftp: 87.8, tpm: 2.7, to: 1.1 },
            CatValues { pts: 0.2, reb: -0.5, ast: -0.2, stl: 0.5, blk: 0.2, fgp: 0.8, ftp: 1.5, tpm: 2.5, to: 1.2 },
            PlayerStatus::Healthy,
            false,
        ),
        player(
            "w3",
            "Daniel Gafford",
            "DAL",
            &["C"],
            StatLine { pts: 11.0, reb: 7.6, ast: 1.6, stl: 0.6, blk: 2.1, fgp: 72.5, ftp: 70.0, tpm: 0.0, to: 1.0 },
            CatValues { pts: -0.2, reb: 1.2, ast: -1.0, stl: -0.2, blk: 3.0, fgp: 3.0, ftp: -0.8, tpm: -2.0, to: 1.4 },
            PlayerStatus::Healthy,
            false,
        ),
        player(
            "w4",
            "Herbert Jones",
            "NOP",
            &["SF", "PF"],
            StatLine { pts: 11.0, reb: 3.6, ast: 2.6, stl: 1.4, blk: 0.8, fgp: 49.8, ftp: 86.7, tpm: 1.5, to: 1.3 },
            CatValues { pts: -0.2, reb: -0.6, ast: -0.4, stl: 2.2, blk: 0.9, fgp: 0.5, ftp: 1.2, tpm: 0.5, to: 1.0 },
            PlayerStatus::Healthy,
            false,
        ),
        player(
            "w5",
            "Josh Hart",
            "NYK",
            &["SG", "SF"],
            StatLine { pts: 9.4, reb: 8.3, ast: 4.1, stl: 0.9, blk: 0.3, fgp: 43.4, ftp: 79.1, tpm: 1.0, to: 1.5 },
            CatValues { pts: -0.8, reb: 2.2, ast: 0.8, stl: 0.5, blk: -0.2, fgp: -1.5, ftp: -0.1, tpm: -0.5, to: 0.5 },
            PlayerStatus::Healthy,
            false,
        ),
    ]
}

/// League standings snapshot.
pub fn league_teams() -> Vec<Team> {
    vec![
        Team {
            id: "t1".into(),
            name: "The Deep Web".into(),
            owner: "John Doe".into(),
            rank: 1,
            record: "10-3-1".into(),
            roster: demo_roster(),
        },
        Team {
            id: "t2".into(),
            name: "Brick City".into(),
            owner: "Jane Smith".into(),
            rank: 4,
            record: "8-6-0".into(),
            roster: vec![
                Player {
                    id: "b1".into(),
                    name: "Anthony Edwards".into(),
                    team: "MIN".into(),
                    positions: vec!["SG".into(), "SF".into()],
                    avg_stats: StatLine { pts: 25.9, reb: 5.4, ast: 5.1, stl: 1.3, blk: 0.5, fgp: 46.1, ftp: 81.7, tpm: 2.4, to: 3.1 },
                    cat_values: None,
                    status: PlayerStatus::Healthy,
                    protected: false,
                },
                Player {
                    id: "b2".into(),
                    name: "Domantas Sabonis".into(),
                    team: "SAC".into(),
                    positions: vec!["C".into()],
                    avg_stats: StatLine { pts: 19.4, reb: 13.1, ast: 8.2, stl: 0.9, blk: 0.6, fgp: 59.4, ftp: 70.4, tpm: 0.4, to: 3.3 },
                    cat_values: None,
                    status: PlayerStatus::Healthy,
                    protected: false,
                },
            ],
        },
        Team {
            id: "t3".into(),
            name: "Triple Double Mafia".into(),
            owner: "Mike Ross".into(),
            rank: 2,
            record: "9-4-1".into(),
            roster: vec![],
        },
        Team {
            id: "t4".into(),
            name: "Logo Lillard".into(),
            owner: "Harvey Specter".into(),
            rank: 3,
            record: "8-5-1".into(),
            roster: vec![],
        },
    ]
}

/// Six-week schedule slice around the current week.
pub fn season_schedule() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry {
            week: 11,
            opponent: "The Step-Backs".into(),
            status: WeekStatus::Past,
            result: Some(WeekResult { score: "6-3".into(), outcome: Outcome::W }),
            strategy_note: None,
        },
        ScheduleEntry {
            week: 12,
            opponent: "Logo Lillard".into(),
            status: WeekStatus::Past,
            result: Some(WeekResult { score: "4-5".into(), outcome: Outcome::L }),
            strategy_note: None,
        },
        ScheduleEntry {
            week: 13,
            opponent: "Triple Double Mafia".into(),
            status: WeekStatus::Past,
            result: Some(WeekResult { score: "5-4".into(), outcome: Outcome::W }),
            strategy_note: None,
        },
        ScheduleEntry {
            week: 14,
            opponent: "Brick City".into(),
            status: WeekStatus::Current,
            result: None,
            strategy_note: Some(StrategyNote { games_mine: 38, games_opp: 40, target_cat: "STL".into(), threat_cat: "FG%".into() }),
        },
        ScheduleEntry {
            week: 15,
            opponent: "Sky Hookers".into(),
            status: WeekStatus::Future,
            result: None,
            strategy_note: Some(StrategyNote { games_mine: 42, games_opp: 35, target_cat: "REB".into(), threat_cat: "3PM".into() }),
        },
        ScheduleEntry {
            week: 16,
            opponent: "Dime Droppers".into(),
            status: WeekStatus::Future,
            result: None,
            strategy_note: Some(StrategyNote { games_mine: 39, games_opp: 41, target_cat: "AST".into(), threat_cat: "BLK".into() }),
        },
    ]
}

/// The live week-14 matchup against Brick City.
pub fn current_matchup() -> Matchup {
    Matchup {
        my_team: "The Deep Web".into(),
        opp_team: "Brick City".into(),
        score_mine: 5,
        score_opp: 4,
        categories: vec![
            MatchupCategory::new(Category::Pts, 840.0, 790.0, 1120.0, 1050.0),
            MatchupCategory::new(Category::Reb, 320.0, 345.0, 440.0, 460.0),
            MatchupCategory::new(Category::Ast, 210.0, 195.0, 280.0, 260.0),
            MatchupCategory::new(Category::Stl, 55.0, 48.0, 72.0, 65.0),
            MatchupCategory::new(Category::Blk, 32.0, 41.0, 44.0, 55.0),
            MatchupCategory::new(Category::Tpm, 98.0, 105.0, 135.0, 140.0),
            MatchupCategory::new(Category::Fgp, 48.2, 46.5, 47.9, 47.1),
            MatchupCategory::new(Category::Ftp, 79.1, 81.4, 78.5, 80.8),
            MatchupCategory::new(Category::To, 85.0, 72.0, 115.0, 98.0),
        ],
        games: GamesVolume {
            played_mine: 22,
            played_opp: 24,
            remaining_mine: 14,
            remaining_opp: 11,
        },
    }
}
