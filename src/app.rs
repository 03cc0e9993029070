// Application state and orchestration logic.
//
// The central event loop that coordinates user commands from the TUI and
// results from spawned advisory tasks. Maintains the complete application
// state and pushes fresh snapshots to the TUI render loop after every change.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::ai::client::{AdvisoryService, AiClient, GenerateOpts};
use crate::ai::prompt;
use crate::config::Config;
use crate::league::matchup::Matchup;
use crate::league::player::Player;
use crate::league::team::{ScheduleEntry, Team};
use crate::protocol::{
    AiOutcome, AiRequestKind, LoadingFlags, SectionId, SessionSummary, TradeState, UiSnapshot,
    UserCommand, WaiverSort, WaiverView,
};
use crate::scoring::net_value::net_value;
use crate::scoring::trade::trade_impact;
use crate::session::AppContext;
use crate::store::KvStore;

/// Store key for the set of protected player ids.
const PROTECTED_KEY: &str = "protected_players";

// ---------------------------------------------------------------------------
// Waiver filtering and sorting
// ---------------------------------------------------------------------------

/// Filter the pool by a case-insensitive substring match on name, team, or
/// positions, then sort by the active key.
///
/// Ties and unscored players sort by name so the order is stable across
/// re-renders.
pub fn filter_and_sort_waivers(
    pool: &[Player],
    query: &str,
    sort: WaiverSort,
    descending: bool,
) -> Vec<Player> {
    let needle = query.trim().to_lowercase();
    let mut players: Vec<Player> = pool
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.team.to_lowercase().contains(&needle)
                || p.positions_str().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    let key = |p: &Player| -> f64 {
        match sort {
            WaiverSort::NetValue => net_value(p),
            WaiverSort::Stat(cat) => p.avg_stats.get(cat),
        }
    };

    players.sort_by(|a, b| {
        let ord = key(a).total_cmp(&key(b));
        let ord = if descending { ord.reverse() } else { ord };
        ord.then_with(|| a.name.cmp(&b.name))
    });

    players
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub store: KvStore,
    pub context: AppContext,
    pub section: SectionId,
    pub roster: Vec<Player>,
    pub waiver_pool: Vec<Player>,
    pub teams: Vec<Team>,
    pub schedule: Vec<ScheduleEntry>,
    pub matchup: Matchup,
    pub waiver_query: String,
    pub waiver_sort: WaiverSort,
    pub waiver_descending: bool,
    pub trade: TradeState,
    pub coach_text: Option<String>,
    pub strategy_text: Option<String>,
    pub scout_text: Option<String>,
    pub deep_dive_text: Option<String>,
    pub loading: LoadingFlags,
    pub status: String,
    pub last_sync: Option<String>,
    /// Advisory client, wrapped in Arc for sharing with spawned tasks.
    pub ai: Arc<AiClient>,
    /// Sender for task outcomes; spawned tasks use a clone of this sender to
    /// report back to the main event loop.
    pub ai_tx: mpsc::Sender<AiOutcome>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        store: KvStore,
        context: AppContext,
        roster: Vec<Player>,
        waiver_pool: Vec<Player>,
        teams: Vec<Team>,
        schedule: Vec<ScheduleEntry>,
        matchup: Matchup,
        ai: AiClient,
        ai_tx: mpsc::Sender<AiOutcome>,
    ) -> Self {
        let mut state = AppState {
            config,
            store,
            context,
            section: SectionId::MyTeam,
            roster,
            waiver_pool,
            teams,
            schedule,
            matchup,
            waiver_query: String::new(),
            waiver_sort: WaiverSort::NetValue,
            waiver_descending: true,
            trade: TradeState::default(),
            coach_text: None,
            strategy_text: None,
            scout_text: None,
            deep_dive_text: None,
            loading: LoadingFlags::default(),
            status: "Ready".to_string(),
            last_sync: None,
            ai: Arc::new(ai),
            ai_tx,
        };
        state.restore_protected();
        state
    }

    /// Re-apply the persisted protected set to the roster at startup.
    fn restore_protected(&mut self) {
        match self.store.get_json::<Vec<String>>(PROTECTED_KEY) {
            Ok(Some(ids)) => {
                for player in &mut self.roster {
                    player.protected = ids.contains(&player.id);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(%e, "failed to load protected set, keeping defaults"),
        }
    }

    fn persist_protected(&self) {
        let ids: Vec<&str> = self
            .roster
            .iter()
            .filter(|p| p.protected)
            .map(|p| p.id.as_str())
            .collect();
        if let Err(e) = self.store.put_json(PROTECTED_KEY, &ids) {
            warn!(%e, "failed to persist protected set");
        }
    }

    /// Build a `UiSnapshot` from the current application state.
    pub fn build_snapshot(&self) -> UiSnapshot {
        let waivers = WaiverView {
            query: self.waiver_query.clone(),
            sort: self.waiver_sort,
            descending: self.waiver_descending,
            players: filter_and_sort_waivers(
                &self.waiver_pool,
                &self.waiver_query,
                self.waiver_sort,
                self.waiver_descending,
            ),
        };

        let session = SessionSummary {
            user_name: self.context.user.as_ref().map(|u| u.name.clone()),
            league_summary: self.context.league.as_ref().map(|l| {
                format!(
                    "League {} / season {}{}",
                    l.league_id,
                    l.season_id,
                    if l.is_private { " (private)" } else { "" }
                )
            }),
            connection: self.context.league.clone(),
            last_sync: self.last_sync.clone(),
        };

        UiSnapshot {
            section: self.section,
            roster: self.roster.clone(),
            matchup: self.matchup.clone(),
            teams: self.teams.clone(),
            schedule: self.schedule.clone(),
            waivers,
            trade: self.trade.clone(),
            coach_text: self.coach_text.clone(),
            strategy_text: self.strategy_text.clone(),
            scout_text: self.scout_text.clone(),
            deep_dive_text: self.deep_dive_text.clone(),
            loading: self.loading,
            status: self.status.clone(),
            session,
            ai_enabled: self.ai.is_active(),
        }
    }

    /// Find a player anywhere in the league: roster, waiver pool, or an
    /// opposing team's roster.
    fn find_player(&self, player_id: &str) -> Option<&Player> {
        self.roster
            .iter()
            .chain(self.waiver_pool.iter())
            .chain(self.teams.iter().flat_map(|t| t.roster.iter()))
            .find(|p| p.id == player_id)
    }

    /// Toggle a roster player's protected flag.
    ///
    /// Protected players are excluded from AI drop/trade suggestions, so any
    /// cached coach advice is stale and cleared.
    pub fn toggle_protect(&mut self, player_id: &str) {
        let Some(player) = self.roster.iter_mut().find(|p| p.id == player_id) else {
            warn!(player_id, "protect toggle for unknown roster player");
            return;
        };
        player.protected = !player.protected;
        info!(player = %player.name, protected = player.protected, "protect toggled");

        self.coach_text = None;
        self.persist_protected();
    }

    /// Record a trade-architect selection and recompute the delta table when
    /// both sides are picked.
    pub fn select_trade_side(&mut self, player_id: &str, give_side: bool) {
        let Some(player) = self.find_player(player_id).cloned() else {
            warn!(player_id, "trade selection for unknown player");
            return;
        };
        if give_side {
            self.trade.give = Some(player);
        } else {
            self.trade.receive = Some(player);
        }

        self.trade.verdict = None;
        self.trade.impacts = match (&self.trade.give, &self.trade.receive) {
            (Some(give), Some(receive)) => trade_impact(give, receive),
            _ => Vec::new(),
        };
    }

    // -- session --

    /// Sign in from a pasted identity token, then bring back any league
    /// config saved under that account.
    pub fn sign_in(&mut self, token: &str) {
        let user = match crate::session::decode_identity_token(token) {
            Ok(user) => user,
            Err(e) => {
                warn!(%e, "sign-in token rejected");
                self.status = format!("Sign-in failed: {e}");
                return;
            }
        };
        let name = user.name.clone();
        if let Err(e) = self.context.save_user(&self.store, user) {
            warn!(%e, "failed to persist user record");
            self.status = format!("Sign-in failed: {e}");
            return;
        }
        if let Err(e) = self.context.restore_league(&self.store) {
            warn!(%e, "failed to restore league config");
        }
        info!(user = %name, "signed in");
        self.status = format!("Signed in as {name}");
    }

    // -- advisory tasks --

    /// Mark a request in flight. Returns `false` (and leaves state untouched)
    /// when the same kind is already loading; the trigger is ignored.
    pub fn begin_request(&mut self, kind: AiRequestKind) -> bool {
        if self.loading.get(kind) {
            info!(?kind, "request already in flight, ignoring trigger");
            return false;
        }
        self.loading.set(kind, true);
        true
    }

    /// Spawn one advisory call as a non-blocking task. The result comes back
    /// through the outcome channel; no cancellation, no timeout, no retry.
    fn spawn_generate(&self, kind: AiRequestKind, prompt: String, opts: GenerateOpts) {
        let client = Arc::clone(&self.ai);
        let tx = self.ai_tx.clone();
        tokio::spawn(async move {
            let outcome = match client.generate(&prompt, opts).await {
                Ok(text) => AiOutcome::Text { kind, text },
                Err(e) => {
                    warn!(?kind, %e, "advisory call failed");
                    AiOutcome::Failed {
                        kind,
                        message: e.to_string(),
                    }
                }
            };
            let _ = tx.send(outcome).await;
        });
    }

    fn spawn_trade_scout(&self, prompt: String) {
        let client = Arc::clone(&self.ai);
        let tx = self.ai_tx.clone();
        tokio::spawn(async move {
            let outcome = match client.generate_suggestions(&prompt).await {
                Ok(suggestions) => AiOutcome::Suggestions(suggestions),
                Err(e) => {
                    warn!(%e, "trade scout failed");
                    AiOutcome::Failed {
                        kind: AiRequestKind::TradeScout,
                        message: e.to_string(),
                    }
                }
            };
            let _ = tx.send(outcome).await;
        });
    }

    fn spawn_sync(&self) {
        let Some(conn) = self.context.league.clone() else {
            let tx = self.ai_tx.clone();
            tokio::spawn(async move {
                let _ = tx
                    .send(AiOutcome::Synced {
                        success: false,
                        message: "No league connection configured".to_string(),
                    })
                    .await;
            });
            return;
        };

        let tx = self.ai_tx.clone();
        tokio::spawn(async move {
            let outcome = match crate::espn::sync_league(&conn).await {
                Ok(report) => AiOutcome::Synced {
                    success: report.success,
                    message: report.message,
                },
                Err(e) => AiOutcome::Synced {
                    success: false,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(outcome).await;
        });
    }

    /// Route a finished task back into state and clear its loading flag.
    pub fn handle_outcome(&mut self, outcome: AiOutcome) {
        match outcome {
            AiOutcome::Text { kind, text } => {
                self.loading.set(kind, false);
                match kind {
                    AiRequestKind::TeamInsights => self.coach_text = Some(text),
                    AiRequestKind::MatchupStrategy => self.strategy_text = Some(text),
                    AiRequestKind::OpponentScout => self.scout_text = Some(text),
                    AiRequestKind::PlayerDeepDive => self.deep_dive_text = Some(text),
                    AiRequestKind::TradeVerdict => self.trade.verdict = Some(text),
                    AiRequestKind::TradeScout => {
                        // generate_suggestions reports Suggestions, never Text.
                        warn!("unexpected text outcome for trade scout");
                    }
                }
            }
            AiOutcome::Suggestions(suggestions) => {
                self.loading.set(AiRequestKind::TradeScout, false);
                info!(count = suggestions.len(), "trade suggestions received");
                self.trade.suggestions = suggestions;
            }
            AiOutcome::Failed { kind, message } => {
                self.loading.set(kind, false);
                self.status = message;
                let placeholder = placeholder_for(kind).to_string();
                match kind {
                    AiRequestKind::TeamInsights => self.coach_text = Some(placeholder),
                    AiRequestKind::MatchupStrategy => self.strategy_text = Some(placeholder),
                    AiRequestKind::OpponentScout => self.scout_text = Some(placeholder),
                    AiRequestKind::PlayerDeepDive => self.deep_dive_text = Some(placeholder),
                    AiRequestKind::TradeVerdict => self.trade.verdict = Some(placeholder),
                    AiRequestKind::TradeScout => self.trade.suggestions.clear(),
                }
            }
            AiOutcome::Synced { success, message } => {
                self.loading.sync = false;
                if success {
                    self.last_sync =
                        Some(chrono::Local::now().format("%Y-%m-%d %H:%M").to_string());
                }
                self.status = message;
            }
        }
    }
}

/// The inert placeholder shown when an advisory call fails.
fn placeholder_for(kind: AiRequestKind) -> &'static str {
    match kind {
        AiRequestKind::TeamInsights | AiRequestKind::PlayerDeepDive => {
            "Unable to fetch AI insights."
        }
        AiRequestKind::MatchupStrategy | AiRequestKind::TradeVerdict => {
            "Failed to generate strategy."
        }
        AiRequestKind::OpponentScout | AiRequestKind::TradeScout => {
            "Failed to generate scouting report."
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`: user commands from the
/// TUI and outcomes from spawned tasks. Pushes a fresh snapshot through
/// `ui_tx` after every handled event.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut ai_rx: mpsc::Receiver<AiOutcome>,
    ui_tx: mpsc::Sender<UiSnapshot>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("application event loop started");

    // Initial frame so the TUI has something to paint immediately.
    let _ = ui_tx.send(state.build_snapshot()).await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd);
                        let _ = ui_tx.send(state.build_snapshot()).await;
                    }
                    None => {
                        info!("command channel closed, shutting down");
                        break;
                    }
                }
            }

            outcome = ai_rx.recv() => {
                match outcome {
                    Some(outcome) => {
                        state.handle_outcome(outcome);
                        let _ = ui_tx.send(state.build_snapshot()).await;
                    }
                    None => {
                        info!("outcome channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    info!("application event loop exiting");
    Ok(())
}

/// Handle a user command from the TUI.
fn handle_user_command(state: &mut AppState, cmd: UserCommand) {
    match cmd {
        UserCommand::SwitchSection(section) => {
            state.section = section;
            info!(section = section.title(), "switched section");
        }
        UserCommand::WaiverSearch(query) => {
            state.waiver_query = query;
        }
        UserCommand::CycleSort => {
            state.waiver_sort = state.waiver_sort.next();
            info!(sort = state.waiver_sort.label(), "waiver sort cycled");
        }
        UserCommand::FlipSortOrder => {
            state.waiver_descending = !state.waiver_descending;
        }
        UserCommand::ToggleProtect { player_id } => {
            state.toggle_protect(&player_id);
        }
        UserCommand::SelectGive { player_id } => {
            state.select_trade_side(&player_id, true);
        }
        UserCommand::SelectReceive { player_id } => {
            state.select_trade_side(&player_id, false);
        }
        UserCommand::RequestInsights => {
            if state.begin_request(AiRequestKind::TeamInsights) {
                let p = prompt::build_team_insights_prompt(&state.roster, &state.matchup);
                let opts = GenerateOpts::with_thinking(state.config.llm.thinking_budget);
                state.spawn_generate(AiRequestKind::TeamInsights, p, opts);
            }
        }
        UserCommand::RequestMatchupStrategy => {
            if state.begin_request(AiRequestKind::MatchupStrategy) {
                let p = prompt::build_matchup_strategy_prompt(&state.matchup);
                state.spawn_generate(AiRequestKind::MatchupStrategy, p, GenerateOpts::default());
            }
        }
        UserCommand::RequestTradeScout => {
            if state.begin_request(AiRequestKind::TradeScout) {
                let others: Vec<_> = state
                    .teams
                    .iter()
                    .filter(|t| t.name != state.config.league.my_team)
                    .cloned()
                    .collect();
                let p = prompt::build_trade_scout_prompt(&state.roster, &others);
                state.spawn_trade_scout(p);
            }
        }
        UserCommand::RequestTradeVerdict => {
            let (Some(give), Some(receive)) = (&state.trade.give, &state.trade.receive) else {
                state.status = "Pick both sides of the trade first".to_string();
                return;
            };
            if state.loading.get(AiRequestKind::TradeVerdict) {
                info!("trade verdict already in flight, ignoring trigger");
                return;
            }
            let p = prompt::build_trade_verdict_prompt(give, receive, &state.trade.impacts);
            state.loading.set(AiRequestKind::TradeVerdict, true);
            state.spawn_generate(AiRequestKind::TradeVerdict, p, GenerateOpts::default());
        }
        UserCommand::RequestOpponentScout { team_id } => {
            let Some(team) = state.teams.iter().find(|t| t.id == team_id).cloned() else {
                warn!(team_id, "scout request for unknown team");
                return;
            };
            if state.begin_request(AiRequestKind::OpponentScout) {
                let p = prompt::build_opponent_scout_prompt(&team);
                state.spawn_generate(AiRequestKind::OpponentScout, p, GenerateOpts::default());
            }
        }
        UserCommand::RequestDeepDive { player_id } => {
            let Some(player) = state.find_player(&player_id).cloned() else {
                warn!(player_id, "deep dive for unknown player");
                return;
            };
            if state.begin_request(AiRequestKind::PlayerDeepDive) {
                let p = prompt::build_player_deep_dive_prompt(&player);
                let opts = GenerateOpts {
                    web_search: true,
                    ..Default::default()
                };
                state.spawn_generate(AiRequestKind::PlayerDeepDive, p, opts);
            }
        }
        UserCommand::SaveLeague(conn) => {
            match state.context.save_league(&state.store, conn) {
                Ok(()) => {
                    info!("league connection saved");
                    state.status = "League connection saved".to_string();
                }
                Err(e) => {
                    warn!(%e, "failed to save league connection");
                    state.status = format!("Could not save league connection: {e}");
                }
            }
        }
        UserCommand::SignIn { token } => {
            state.sign_in(&token);
        }
        UserCommand::SignOut => match state.context.logout(&state.store) {
            Ok(()) => {
                info!("signed out");
                state.status = "Signed out".to_string();
            }
            Err(e) => {
                warn!(%e, "sign-out failed");
                state.status = format!("Sign-out failed: {e}");
            }
        },
        UserCommand::SyncLeague => {
            if !state.loading.sync {
                state.loading.sync = true;
                state.status = "Syncing league...".to_string();
                state.spawn_sync();
            }
        }
        UserCommand::Quit => {
            // Handled in the main loop.
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::client::AiError;
    use crate::config::{BackoffConfig, CredentialsConfig, DataPaths, LeagueConfig, LlmConfig};
    use crate::league::category::Category;
    use crate::league::fixtures;

    fn test_config() -> Config {
        Config {
            league: LeagueConfig {
                name: "Hardwood Heroes".into(),
                my_team: "The Deep Web".into(),
                num_teams: 10,
                scoring_type: "h2h_each_category".into(),
            },
            llm: LlmConfig {
                model: "test".into(),
                max_output_tokens: 256,
                thinking_budget: 0,
            },
            backoff: BackoffConfig {
                initial_ms: 1,
                multiplier: 2.0,
                max_attempts: 1,
            },
            credentials: CredentialsConfig::default(),
            db_path: ":memory:".into(),
            data_paths: DataPaths {
                roster: "data/roster.csv".into(),
                waivers: "data/waivers.csv".into(),
            },
        }
    }

    fn test_state_with_store(store: KvStore, ai_tx: mpsc::Sender<AiOutcome>) -> AppState {
        AppState::new(
            test_config(),
            store,
            AppContext::default(),
            fixtures::demo_roster(),
            fixtures::waiver_pool(),
            fixtures::league_teams(),
            fixtures::season_schedule(),
            fixtures::current_matchup(),
            AiClient::Disabled,
            ai_tx,
        )
    }

    fn test_state() -> AppState {
        let (ai_tx, _ai_rx) = mpsc::channel(8);
        test_state_with_store(KvStore::open(":memory:").unwrap(), ai_tx)
    }

    // -- waiver filtering and sorting --

    #[test]
    fn waiver_search_matches_name_team_and_position() {
        let pool = fixtures::waiver_pool();

        let by_name = filter_and_sort_waivers(&pool, "gafford", WaiverSort::NetValue, true);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Daniel Gafford");

        let by_team = filter_and_sort_waivers(&pool, "IND", WaiverSort::NetValue, true);
        assert_eq!(by_team.len(), 1);
        assert_eq!(by_team[0].name, "T.J. McConnell");
    }

    #[test]
    fn empty_query_keeps_the_whole_pool() {
        let pool = fixtures::waiver_pool();
        let all = filter_and_sort_waivers(&pool, "", WaiverSort::NetValue, true);
        assert_eq!(all.len(), pool.len());
    }

    #[test]
    fn net_value_sort_puts_gafford_first() {
        let pool = fixtures::waiver_pool();
        let sorted = filter_and_sort_waivers(&pool, "", WaiverSort::NetValue, true);
        assert_eq!(sorted[0].name, "Daniel Gafford");
    }

    #[test]
    fn stat_sort_ascending_flips_the_order() {
        let pool = fixtures::waiver_pool();
        let desc = filter_and_sort_waivers(&pool, "", WaiverSort::Stat(Category::Ast), true);
        let asc = filter_and_sort_waivers(&pool, "", WaiverSort::Stat(Category::Ast), false);
        assert_eq!(desc[0].name, asc[asc.len() - 1].name);
        // McConnell leads the fixture pool in assists.
        assert_eq!(desc[0].name, "T.J. McConnell");
    }

    // -- protect toggle --

    #[tokio::test]
    async fn protect_toggle_clears_cached_coach_advice() {
        let mut state = test_state();
        state.coach_text = Some("old advice".into());

        let tatum_id = state
            .roster
            .iter()
            .find(|p| p.name == "Jayson Tatum")
            .unwrap()
            .id
            .clone();
        state.toggle_protect(&tatum_id);

        assert!(state.roster.iter().any(|p| p.id == tatum_id && p.protected));
        assert!(state.coach_text.is_none());
    }

    #[tokio::test]
    async fn protected_set_survives_a_restart() {
        let (ai_tx, _ai_rx) = mpsc::channel(8);
        let mut state =
            test_state_with_store(KvStore::open(":memory:").unwrap(), ai_tx.clone());

        let tatum_id = state
            .roster
            .iter()
            .find(|p| p.name == "Jayson Tatum")
            .unwrap()
            .id
            .clone();
        state.toggle_protect(&tatum_id);

        // Rebuild from the same store; a fresh fixture roster starts over.
        let rebuilt = test_state_with_store(state.store, ai_tx);
        let tatum = rebuilt.roster.iter().find(|p| p.id == tatum_id).unwrap();
        assert!(tatum.protected);
        // Restore replaces defaults wholesale: fixture-protected players not
        // in the saved set come back unprotected.
        let jokic = rebuilt
            .roster
            .iter()
            .find(|p| p.name == "Nikola Jokić")
            .unwrap();
        assert!(!jokic.protected);
    }

    // -- trade selection --

    #[tokio::test]
    async fn trade_impacts_appear_once_both_sides_are_picked() {
        let mut state = test_state();
        let give_id = state
            .roster
            .iter()
            .find(|p| p.name == "Jayson Tatum")
            .unwrap()
            .id
            .clone();
        let receive_id = state
            .waiver_pool
            .iter()
            .find(|p| p.name == "Daniel Gafford")
            .unwrap()
            .id
            .clone();

        state.select_trade_side(&give_id, true);
        assert!(state.trade.impacts.is_empty());

        state.select_trade_side(&receive_id, false);
        assert_eq!(state.trade.impacts.len(), 9);
    }

    #[tokio::test]
    async fn re_selecting_a_side_clears_the_stale_verdict() {
        let mut state = test_state();
        let give_id = state.roster[0].id.clone();
        state.trade.verdict = Some("ACCEPT".into());
        state.select_trade_side(&give_id, true);
        assert!(state.trade.verdict.is_none());
    }

    // -- loading guard --

    #[tokio::test]
    async fn second_trigger_while_loading_is_ignored() {
        let mut state = test_state();
        assert!(state.begin_request(AiRequestKind::TeamInsights));
        assert!(!state.begin_request(AiRequestKind::TeamInsights));
        // Other kinds are independent.
        assert!(state.begin_request(AiRequestKind::MatchupStrategy));
    }

    // -- outcome routing --

    #[tokio::test]
    async fn text_outcomes_land_in_their_section_and_clear_the_flag() {
        let mut state = test_state();
        state.loading.set(AiRequestKind::TeamInsights, true);

        state.handle_outcome(AiOutcome::Text {
            kind: AiRequestKind::TeamInsights,
            text: "push blocks this week".into(),
        });

        assert_eq!(state.coach_text.as_deref(), Some("push blocks this week"));
        assert!(!state.loading.insights);
    }

    #[tokio::test]
    async fn failed_outcome_shows_the_inert_placeholder() {
        let mut state = test_state();
        state.loading.set(AiRequestKind::MatchupStrategy, true);

        state.handle_outcome(AiOutcome::Failed {
            kind: AiRequestKind::MatchupStrategy,
            message: AiError::NotConfigured.to_string(),
        });

        assert_eq!(
            state.strategy_text.as_deref(),
            Some("Failed to generate strategy.")
        );
        assert!(!state.loading.strategy);
        assert_eq!(state.status, "advisory model not configured");
    }

    #[tokio::test]
    async fn sync_outcome_records_the_demo_message() {
        let mut state = test_state();
        state.loading.sync = true;

        state.handle_outcome(AiOutcome::Synced {
            success: true,
            message: "Connected to ESPN (Demo Mode)".into(),
        });

        assert!(!state.loading.sync);
        assert!(state.last_sync.is_some());
        assert_eq!(state.status, "Connected to ESPN (Demo Mode)");
    }

    // -- session commands --

    fn public_connection() -> crate::session::LeagueConnection {
        crate::session::LeagueConnection {
            league_id: "1234".into(),
            season_id: "2026".into(),
            is_private: false,
            espn_s2: None,
            swid: None,
        }
    }

    fn forged_token(payload: &str) -> String {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine as _;
        format!("hdr.{}.sig", URL_SAFE_NO_PAD.encode(payload.as_bytes()))
    }

    #[tokio::test(start_paused = true)]
    async fn saved_league_connection_makes_sync_reachable() {
        let (ai_tx, mut ai_rx) = mpsc::channel(8);
        let mut state = test_state_with_store(KvStore::open(":memory:").unwrap(), ai_tx);

        // Without a connection the sync degrades to a failure report.
        handle_user_command(&mut state, UserCommand::SyncLeague);
        let outcome = ai_rx.recv().await.unwrap();
        match &outcome {
            AiOutcome::Synced { success, message } => {
                assert!(!success);
                assert_eq!(message, "No league connection configured");
            }
            other => panic!("expected Synced, got: {other:?}"),
        }
        state.handle_outcome(outcome);

        handle_user_command(&mut state, UserCommand::SaveLeague(public_connection()));
        assert_eq!(state.status, "League connection saved");
        assert!(state.context.league.is_some());

        handle_user_command(&mut state, UserCommand::SyncLeague);
        match ai_rx.recv().await.unwrap() {
            AiOutcome::Synced { success, message } => {
                assert!(success);
                assert_eq!(message, "Connected to ESPN (Demo Mode)");
            }
            other => panic!("expected Synced, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn sign_in_restores_that_accounts_league_config() {
        let store = KvStore::open(":memory:").unwrap();

        // Seed a previous session for this account, then sign it out.
        let mut seeded = AppContext::default();
        seeded
            .save_user(
                &store,
                crate::session::decode_identity_token(&forged_token(
                    r#"{"sub":"u-77","name":"Alex","email":"alex@example.com"}"#,
                ))
                .unwrap(),
            )
            .unwrap();
        seeded.save_league(&store, public_connection()).unwrap();
        seeded.logout(&store).unwrap();

        let (ai_tx, _ai_rx) = mpsc::channel(8);
        let mut state = test_state_with_store(store, ai_tx);
        assert!(state.context.user.is_none());

        let token = forged_token(r#"{"sub":"u-77","name":"Alex","email":"alex@example.com"}"#);
        handle_user_command(&mut state, UserCommand::SignIn { token });

        assert_eq!(
            state.context.user.as_ref().map(|u| u.name.as_str()),
            Some("Alex")
        );
        assert_eq!(state.context.league, Some(public_connection()));
        assert_eq!(state.status, "Signed in as Alex");

        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.session.user_name.as_deref(), Some("Alex"));
        assert_eq!(snapshot.session.connection, Some(public_connection()));
    }

    #[tokio::test]
    async fn rejected_token_reports_the_failure_in_the_status() {
        let mut state = test_state();
        handle_user_command(
            &mut state,
            UserCommand::SignIn {
                token: "definitely-not-a-jwt".into(),
            },
        );
        assert!(state.status.starts_with("Sign-in failed"));
        assert!(state.context.user.is_none());
    }

    #[tokio::test]
    async fn sign_out_clears_the_session() {
        let mut state = test_state();
        state.sign_in(&forged_token(
            r#"{"sub":"u-1","name":"Sam","email":"sam@example.com"}"#,
        ));
        handle_user_command(&mut state, UserCommand::SaveLeague(public_connection()));

        handle_user_command(&mut state, UserCommand::SignOut);
        assert!(state.context.user.is_none());
        assert!(state.context.league.is_none());
        assert_eq!(state.status, "Signed out");
    }

    // -- snapshot --

    #[tokio::test]
    async fn snapshot_reflects_waiver_view_and_session() {
        let mut state = test_state();
        state.waiver_query = "gafford".into();
        let snapshot = state.build_snapshot();

        assert_eq!(snapshot.waivers.players.len(), 1);
        assert!(!snapshot.ai_enabled);
        assert!(snapshot.session.user_name.is_none());
        assert_eq!(snapshot.status, "Ready");
    }
}
