// League sync boundary.
//
// The URL builder targets the real v3 fantasy API so a live fetch can be
// dropped in later; the fetch itself is demo-stubbed and returns a canned
// report after a fixed delay.

use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::session::LeagueConnection;

const FANTASY_API_BASE: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/fba";

/// Simulated round-trip for the demo sync.
const DEMO_SYNC_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("league connection is incomplete: {0}")]
    InvalidConnection(String),

    #[error("private league requires espn_s2 and SWID cookies")]
    MissingCredentials,
}

/// Outcome of a league sync attempt, shown in the Settings section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub success: bool,
    pub message: String,
}

/// Build the v3 fantasy endpoint URL for a league connection.
///
/// The mRoster/mTeam/mSettings views cover everything the dashboard reads.
pub fn league_url(conn: &LeagueConnection) -> String {
    format!(
        "{FANTASY_API_BASE}/seasons/{}/segments/0/leagues/{}?view=mRoster&view=mTeam&view=mSettings",
        conn.season_id, conn.league_id
    )
}

fn validate(conn: &LeagueConnection) -> Result<(), SyncError> {
    if conn.league_id.trim().is_empty() {
        return Err(SyncError::InvalidConnection("league_id is empty".into()));
    }
    if conn.season_id.trim().is_empty() {
        return Err(SyncError::InvalidConnection("season_id is empty".into()));
    }
    if conn.is_private {
        let has_s2 = conn.espn_s2.as_deref().is_some_and(|s| !s.is_empty());
        let has_swid = conn.swid.as_deref().is_some_and(|s| !s.is_empty());
        if !has_s2 || !has_swid {
            return Err(SyncError::MissingCredentials);
        }
    }
    Ok(())
}

/// Run the (demo-stubbed) league sync: validate the connection, wait out the
/// simulated round-trip, and report success.
pub async fn sync_league(conn: &LeagueConnection) -> Result<SyncReport, SyncError> {
    validate(conn)?;

    info!(
        league_id = %conn.league_id,
        season_id = %conn.season_id,
        url = %league_url(conn),
        "starting league sync (demo)"
    );

    tokio::time::sleep(DEMO_SYNC_DELAY).await;

    Ok(SyncReport {
        success: true,
        message: "Connected to ESPN (Demo Mode)".to_string(),
    })
}
