// Shared message and snapshot types between the TUI, the orchestrator, and
// spawned advisory tasks.

use crate::ai::TradeSuggestion;
use crate::league::category::Category;
use crate::league::matchup::Matchup;
use crate::league::player::Player;
use crate::league::team::{ScheduleEntry, Team};
use crate::scoring::trade::CategoryImpact;
use crate::session::LeagueConnection;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// The eight dashboard sections, switched with keys 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    MyTeam,
    Matchup,
    LeagueHub,
    Schedule,
    WaiverWire,
    TradeArchitect,
    AiCoach,
    Settings,
}

impl SectionId {
    pub const ALL: [SectionId; 8] = [
        SectionId::MyTeam,
        SectionId::Matchup,
        SectionId::LeagueHub,
        SectionId::Schedule,
        SectionId::WaiverWire,
        SectionId::TradeArchitect,
        SectionId::AiCoach,
        SectionId::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionId::MyTeam => "My Team",
            SectionId::Matchup => "Live Matchup",
            SectionId::LeagueHub => "League Hub",
            SectionId::Schedule => "Schedule",
            SectionId::WaiverWire => "Waiver Wire",
            SectionId::TradeArchitect => "Trade Architect",
            SectionId::AiCoach => "AI Coach",
            SectionId::Settings => "Settings",
        }
    }

    /// Map a number key to its section.
    pub fn from_key(c: char) -> Option<SectionId> {
        let idx = c.to_digit(10)? as usize;
        if (1..=8).contains(&idx) {
            Some(SectionId::ALL[idx - 1])
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// TUI -> orchestrator commands
// ---------------------------------------------------------------------------

/// Commands sent from the input layer to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    SwitchSection(SectionId),
    /// Replace the waiver-wire search query.
    WaiverSearch(String),
    /// Cycle the waiver sort key (net value, then each stat).
    CycleSort,
    FlipSortOrder,
    ToggleProtect { player_id: String },
    SelectGive { player_id: String },
    SelectReceive { player_id: String },
    RequestInsights,
    RequestMatchupStrategy,
    RequestTradeScout,
    RequestTradeVerdict,
    RequestOpponentScout { team_id: String },
    RequestDeepDive { player_id: String },
    /// Persist an edited league connection for the current session.
    SaveLeague(LeagueConnection),
    /// Sign in with an identity-provider token pasted into the settings form.
    SignIn { token: String },
    SignOut,
    SyncLeague,
    Quit,
}

// ---------------------------------------------------------------------------
// Advisory tasks
// ---------------------------------------------------------------------------

/// Which advisory call a spawned task is running. One loading flag per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiRequestKind {
    TeamInsights,
    TradeScout,
    TradeVerdict,
    OpponentScout,
    MatchupStrategy,
    PlayerDeepDive,
}

/// Result of a spawned task, delivered back over mpsc.
#[derive(Debug, Clone)]
pub enum AiOutcome {
    Text { kind: AiRequestKind, text: String },
    Suggestions(Vec<TradeSuggestion>),
    Failed { kind: AiRequestKind, message: String },
    Synced { success: bool, message: String },
}

// ---------------------------------------------------------------------------
// Waiver view
// ---------------------------------------------------------------------------

/// Waiver-wire sort key: net value first, then each stat in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaiverSort {
    NetValue,
    Stat(Category),
}

impl WaiverSort {
    pub fn next(self) -> WaiverSort {
        match self {
            WaiverSort::NetValue => WaiverSort::Stat(Category::ALL[0]),
            WaiverSort::Stat(cat) => {
                let idx = Category::ALL.iter().position(|c| *c == cat).unwrap_or(0);
                match Category::ALL.get(idx + 1) {
                    Some(next) => WaiverSort::Stat(*next),
                    None => WaiverSort::NetValue,
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WaiverSort::NetValue => "NET",
            WaiverSort::Stat(cat) => cat.label(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WaiverView {
    pub query: String,
    pub sort: WaiverSort,
    pub descending: bool,
    /// Filtered + sorted pool, ready to render.
    pub players: Vec<Player>,
}

// ---------------------------------------------------------------------------
// Trade view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct TradeState {
    pub give: Option<Player>,
    pub receive: Option<Player>,
    pub impacts: Vec<CategoryImpact>,
    pub verdict: Option<String>,
    pub suggestions: Vec<TradeSuggestion>,
}

// ---------------------------------------------------------------------------
// Loading flags
// ---------------------------------------------------------------------------

/// Per-action in-flight flags. A trigger whose flag is set is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadingFlags {
    pub insights: bool,
    pub trade_scout: bool,
    pub trade_verdict: bool,
    pub opponent_scout: bool,
    pub strategy: bool,
    pub deep_dive: bool,
    pub sync: bool,
}

impl LoadingFlags {
    pub fn get(&self, kind: AiRequestKind) -> bool {
        match kind {
            AiRequestKind::TeamInsights => self.insights,
            AiRequestKind::TradeScout => self.trade_scout,
            AiRequestKind::TradeVerdict => self.trade_verdict,
            AiRequestKind::OpponentScout => self.opponent_scout,
            AiRequestKind::MatchupStrategy => self.strategy,
            AiRequestKind::PlayerDeepDive => self.deep_dive,
        }
    }

    pub fn set(&mut self, kind: AiRequestKind, value: bool) {
        match kind {
            AiRequestKind::TeamInsights => self.insights = value,
            AiRequestKind::TradeScout => self.trade_scout = value,
            AiRequestKind::TradeVerdict => self.trade_verdict = value,
            AiRequestKind::OpponentScout => self.opponent_scout = value,
            AiRequestKind::MatchupStrategy => self.strategy = value,
            AiRequestKind::PlayerDeepDive => self.deep_dive = value,
        }
    }

    /// True when any advisory call or the league sync is in flight.
    pub fn any(&self) -> bool {
        self.insights
            || self.trade_scout
            || self.trade_verdict
            || self.opponent_scout
            || self.strategy
            || self.deep_dive
            || self.sync
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Session summary rendered in the Settings section. Carries the raw league
/// connection alongside the display string so the edit form can prefill.
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub user_name: Option<String>,
    pub league_summary: Option<String>,
    pub connection: Option<LeagueConnection>,
    pub last_sync: Option<String>,
}

/// Everything the TUI needs to render one frame. The orchestrator sends a
/// fresh snapshot after every state change.
#[derive(Debug, Clone)]
pub struct UiSnapshot {
    pub section: SectionId,
    pub roster: Vec<Player>,
    pub matchup: Matchup,
    pub teams: Vec<Team>,
    pub schedule: Vec<ScheduleEntry>,
    pub waivers: WaiverView,
    pub trade: TradeState,
    pub coach_text: Option<String>,
    pub strategy_text: Option<String>,
    pub scout_text: Option<String>,
    pub deep_dive_text: Option<String>,
    pub loading: LoadingFlags,
    pub status: String,
    pub session: SessionSummary,
    pub ai_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_map_to_sections() {
        assert_eq!(SectionId::from_key('1'), Some(SectionId::MyTeam));
        assert_eq!(SectionId::from_key('5'), Some(SectionId::WaiverWire));
        assert_eq!(SectionId::from_key('8'), Some(SectionId::Settings));
        assert_eq!(SectionId::from_key('9'), None);
        assert_eq!(SectionId::from_key('0'), None);
        assert_eq!(SectionId::from_key('x'), None);
    }

    #[test]
    fn sort_cycle_visits_every_key_and_wraps() {
        let mut sort = WaiverSort::NetValue;
        let mut seen = vec![sort.label()];
        for _ in 0..9 {
            sort = sort.next();
            seen.push(sort.label());
        }
        assert_eq!(sort.next(), WaiverSort::NetValue);
        assert_eq!(seen.len(), 10);
        assert!(seen.contains(&"TO"));
        assert!(seen.contains(&"FG%"));
    }

    #[test]
    fn loading_flags_round_trip_per_kind() {
        let mut flags = LoadingFlags::default();
        for kind in [
            AiRequestKind::TeamInsights,
            AiRequestKind::TradeScout,
            AiRequestKind::TradeVerdict,
            AiRequestKind::OpponentScout,
            AiRequestKind::MatchupStrategy,
            AiRequestKind::PlayerDeepDive,
        ] {
            assert!(!flags.get(kind));
            flags.set(kind, true);
            assert!(flags.get(kind));
            flags.set(kind, false);
        }
    }
}
