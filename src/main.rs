// HoopsAI entry point.
//
// Startup sequence:
// 1. Start file-based tracing (the terminal belongs to the TUI)
// 2. Load configuration, seeding defaults on first run
// 3. Open the key-value store, restore the saved session
// 4. Load player data, compute standardized category values
// 5. Create mpsc channels and the advisory client
// 6. Spawn the app orchestrator task
// 7. Run the TUI event loop (blocking until the user quits)
// 8. Cleanup on exit

use std::path::Path;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use hoops_coach::ai::AiClient;
use hoops_coach::app;
use hoops_coach::config;
use hoops_coach::league::fixtures;
use hoops_coach::league::import;
use hoops_coach::league::player::Player;
use hoops_coach::scoring::normalize::normalize_roster;
use hoops_coach::session::AppContext;
use hoops_coach::store::KvStore;
use hoops_coach::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Start file-based tracing (the terminal belongs to the TUI)
    init_tracing()?;
    info!("HoopsAI starting up");

    // 2. Load configuration
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} teams, scoring={}",
        config.league.name, config.league.num_teams, config.league.scoring_type
    );

    // 3. Open the store and restore the saved session
    let store = KvStore::open(&config.db_path).context("failed to open store")?;
    info!("Store opened at {}", config.db_path);

    let context = AppContext::load(&store).context("failed to restore session")?;
    match &context.user {
        Some(user) => info!("Session restored for {}", user.name),
        None => info!("No saved session, starting as guest"),
    }

    // 4. Load player data; CSV files are optional and fall back to the demo
    //    fixtures so the dashboard always has something to show.
    let mut roster = load_or_fallback(&config.data_paths.roster, fixtures::demo_roster);
    let mut waiver_pool = load_or_fallback(&config.data_paths.waivers, fixtures::waiver_pool);
    info!(
        "Loaded {} roster players, {} free agents",
        roster.len(),
        waiver_pool.len()
    );

    // Standardize everyone against the combined player pool so net values
    // are comparable across the roster and the wire.
    let pool: Vec<Player> = roster.iter().chain(waiver_pool.iter()).cloned().collect();
    normalize_roster(&mut roster, &pool);
    normalize_roster(&mut waiver_pool, &pool);

    let teams = fixtures::league_teams();
    let schedule = fixtures::season_schedule();
    let matchup = fixtures::current_matchup();

    // 5. Channels and the advisory client
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ai_tx, ai_rx) = mpsc::channel(256);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // An active client must answer a readiness check within the bounded
    // backoff window, or it is downgraded to disabled for this run.
    let ai_client = AiClient::from_config(&config)
        .ensure_ready(config.backoff.to_policy())
        .await;
    if ai_client.is_active() {
        info!("Advisory client initialized (API key configured)");
    } else {
        info!("Advisory client disabled (no API key or API unreachable)");
    }

    let app_state = app::AppState::new(
        config,
        store,
        context,
        roster,
        waiver_pool,
        teams,
        schedule,
        matchup,
        ai_client,
        ai_tx,
    );

    // 6. Spawn the app orchestrator task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ai_rx, ui_tx, app_state).await {
            error!("orchestrator exited with error: {e}");
        }
    });

    // 7. Run the TUI event loop (blocking until the user quits)
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("terminal UI exited with error: {e}");
    }

    // 8. Cleanup: wait for the app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("HoopsAI shut down cleanly");
    Ok(())
}

/// Load players from a CSV path, falling back to fixtures when the file is
/// missing or malformed.
fn load_or_fallback(path: &str, fallback: fn() -> Vec<Player>) -> Vec<Player> {
    match import::load_players(Path::new(path)) {
        Ok(players) if !players.is_empty() => players,
        Ok(_) => {
            warn!(path, "player file is empty, using demo data");
            fallback()
        }
        Err(e) => {
            warn!(path, %e, "could not load player file, using demo data");
            fallback()
        }
    }
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("hoopsai.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hoops_coach=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
