// Session state: the signed-in user, per-user league connection config,
// identity-token decoding, and provider-readiness backoff.
//
// All session state flows through an explicit `AppContext` loaded once at
// startup and saved on change; there is no ambient singleton.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::store::{KvStore, StoreError};

/// Store key for the signed-in user record.
const USER_KEY: &str = "hoopsai_user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("malformed identity token: {0}")]
    InvalidToken(String),

    #[error("provider unavailable after {attempts} attempts")]
    ProviderUnavailable { attempts: u32 },
}

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: String,
}

/// Per-user league connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueConnection {
    pub league_id: String,
    pub season_id: String,
    pub is_private: bool,
    pub espn_s2: Option<String>,
    pub swid: Option<String>,
}

fn league_key(user_id: &str) -> String {
    format!("league_config:{user_id}")
}

// ---------------------------------------------------------------------------
// AppContext
// ---------------------------------------------------------------------------

/// Explicit session context threaded through the app.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub user: Option<User>,
    pub league: Option<LeagueConnection>,
}

impl AppContext {
    /// Load session state from the store at startup.
    ///
    /// A corrupt user record is logged and treated as "no session" rather
    /// than failing startup; a corrupt league record likewise degrades to
    /// "not configured".
    pub fn load(store: &KvStore) -> Result<Self, SessionError> {
        let user = match store.get_json::<User>(USER_KEY) {
            Ok(user) => user,
            Err(StoreError::Corrupt { key, source }) => {
                warn!(key, %source, "corrupt session record, signing out");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let league = match &user {
            Some(user) => match store.get_json::<LeagueConnection>(&league_key(&user.id)) {
                Ok(league) => league,
                Err(StoreError::Corrupt { key, source }) => {
                    warn!(key, %source, "corrupt league config, ignoring");
                    None
                }
                Err(e) => return Err(e.into()),
            },
            None => None,
        };

        Ok(AppContext { user, league })
    }

    /// Record a newly signed-in user and persist it.
    pub fn save_user(&mut self, store: &KvStore, user: User) -> Result<(), SessionError> {
        store.put_json(USER_KEY, &user)?;
        self.user = Some(user);
        Ok(())
    }

    /// Persist the current user's league connection.
    pub fn save_league(
        &mut self,
        store: &KvStore,
        league: LeagueConnection,
    ) -> Result<(), SessionError> {
        if let Some(user) = &self.user {
            store.put_json(&league_key(&user.id), &league)?;
        }
        self.league = Some(league);
        Ok(())
    }

    /// Reload the signed-in user's saved league config. Called after a
    /// sign-in so the config persisted under that account comes back
    /// without a restart. A signed-out context keeps `league` untouched.
    pub fn restore_league(&mut self, store: &KvStore) -> Result<(), SessionError> {
        let Some(user) = &self.user else {
            return Ok(());
        };
        self.league = match store.get_json::<LeagueConnection>(&league_key(&user.id)) {
            Ok(league) => league,
            Err(StoreError::Corrupt { key, source }) => {
                warn!(key, %source, "corrupt league config, ignoring");
                None
            }
            Err(e) => return Err(e.into()),
        };
        Ok(())
    }

    /// Sign out: drop the user record (league config is kept for the next
    /// sign-in of the same account).
    pub fn logout(&mut self, store: &KvStore) -> Result<(), SessionError> {
        store.delete(USER_KEY)?;
        self.user = None;
        self.league = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Identity token decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct IdentityClaims {
    sub: String,
    name: String,
    email: String,
    #[serde(default)]
    picture: String,
}

/// Decode the payload of an identity-provider JWT into a `User`.
///
/// Only the payload segment is decoded (base64url, no padding) and parsed;
/// signature verification belongs to the provider. Any malformed token is a
/// `SessionError::InvalidToken`, which callers treat as "no session".
pub fn decode_identity_token(token: &str) -> Result<User, SessionError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| SessionError::InvalidToken("missing payload segment".into()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| SessionError::InvalidToken(format!("base64 decode: {e}")))?;

    let claims: IdentityClaims = serde_json::from_slice(&bytes)
        .map_err(|e| SessionError::InvalidToken(format!("payload parse: {e}")))?;

    Ok(User {
        id: claims.sub,
        name: claims.name,
        email: claims.email,
        picture: claims.picture,
    })
}

// ---------------------------------------------------------------------------
// Provider readiness backoff
// ---------------------------------------------------------------------------

/// Bounded exponential backoff for external-provider readiness probes.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    pub initial: std::time::Duration,
    pub multiplier: f64,
    pub max_attempts: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        BackoffPolicy {
            initial: std::time::Duration::from_millis(500),
            multiplier: 2.0,
            max_attempts: 5,
        }
    }
}

/// Probe until `probe` reports ready, sleeping with exponential backoff
/// between attempts. Returns the number of attempts used, or a terminal
/// `ProviderUnavailable` once `max_attempts` probes have failed.
pub async fn wait_ready<F, Fut>(mut probe: F, policy: BackoffPolicy) -> Result<u32, SessionError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let mut delay = policy.initial;
    for attempt in 1..=policy.max_attempts {
        if probe().await {
            return Ok(attempt);
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(delay).await;
            delay = delay.mul_f64(policy.multiplier);
        }
    }
    Err(SessionError::ProviderUnavailable {
        attempts: policy.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn open_mem() -> KvStore {
        KvStore::open(":memory:").unwrap()
    }

    fn sample_user() -> User {
        User {
            id: "108".into(),
            name: "Jordan".into(),
            email: "jordan@example.com".into(),
            picture: "https://example.com/pic.jpg".into(),
        }
    }

    fn sample_league() -> LeagueConnection {
        LeagueConnection {
            league_id: "12345".into(),
            season_id: "2025".into(),
            is_private: true,
            espn_s2: Some("s2-cookie-value".into()),
            swid: Some("{SWID}".into()),
        }
    }

    // ---- AppContext persistence ----

    #[test]
    fn context_round_trip_is_field_for_field() {
        let store = open_mem();
        let mut ctx = AppContext::default();
        ctx.save_user(&store, sample_user()).unwrap();
        ctx.save_league(&store, sample_league()).unwrap();

        let reloaded = AppContext::load(&store).unwrap();
        assert_eq!(reloaded.user, Some(sample_user()));
        assert_eq!(reloaded.league, Some(sample_league()));
    }

    #[test]
    fn load_with_empty_store_is_logged_out() {
        let store = open_mem();
        let ctx = AppContext::load(&store).unwrap();
        assert!(ctx.user.is_none());
        assert!(ctx.league.is_none());
    }

    #[test]
    fn corrupt_user_record_degrades_to_no_session() {
        let store = open_mem();
        store.put_raw("hoopsai_user", "{definitely not json").unwrap();
        let ctx = AppContext::load(&store).unwrap();
        assert!(ctx.user.is_none());
    }

    #[test]
    fn logout_removes_the_user_record() {
        let store = open_mem();
        let mut ctx = AppContext::default();
        ctx.save_user(&store, sample_user()).unwrap();
        ctx.logout(&store).unwrap();
        assert!(ctx.user.is_none());

        let reloaded = AppContext::load(&store).unwrap();
        assert!(reloaded.user.is_none());
    }

    #[test]
    fn league_config_is_scoped_per_user() {
        let store = open_mem();
        let mut ctx = AppContext::default();
        ctx.save_user(&store, sample_user()).unwrap();
        ctx.save_league(&store, sample_league()).unwrap();

        // A different user sees no league config.
        let mut other = sample_user();
        other.id = "999".into();
        ctx.save_user(&store, other).unwrap();
        let reloaded = AppContext::load(&store).unwrap();
        assert!(reloaded.league.is_none());
    }

    #[test]
    fn league_config_comes_back_on_the_next_sign_in() {
        let store = open_mem();
        let mut ctx = AppContext::default();
        ctx.save_user(&store, sample_user()).unwrap();
        ctx.save_league(&store, sample_league()).unwrap();
        ctx.logout(&store).unwrap();
        assert!(ctx.league.is_none());

        ctx.save_user(&store, sample_user()).unwrap();
        ctx.restore_league(&store).unwrap();
        assert_eq!(ctx.league, Some(sample_league()));
    }

    #[test]
    fn restore_league_without_a_user_is_a_noop() {
        let store = open_mem();
        let mut ctx = AppContext::default();
        ctx.restore_league(&store).unwrap();
        assert!(ctx.league.is_none());
    }

    // ---- Identity token decoding ----

    fn forge_token(payload: &str) -> String {
        let encoded = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("hdr.{encoded}.sig")
    }

    #[test]
    fn decodes_a_well_formed_token() {
        let token = forge_token(
            r#"{"sub":"108","name":"Jordan","email":"jordan@example.com","picture":"p.jpg"}"#,
        );
        let user = decode_identity_token(&token).unwrap();
        assert_eq!(user.id, "108");
        assert_eq!(user.name, "Jordan");
        assert_eq!(user.picture, "p.jpg");
    }

    #[test]
    fn missing_picture_defaults_to_empty() {
        let token = forge_token(r#"{"sub":"1","name":"A","email":"a@b.c"}"#);
        let user = decode_identity_token(&token).unwrap();
        assert_eq!(user.picture, "");
    }

    #[test]
    fn token_without_payload_segment_is_invalid() {
        assert!(matches!(
            decode_identity_token("onlyonesegment"),
            Err(SessionError::InvalidToken(_))
        ));
    }

    #[test]
    fn token_with_bad_base64_is_invalid() {
        assert!(matches!(
            decode_identity_token("hdr.!!!notbase64!!!.sig"),
            Err(SessionError::InvalidToken(_))
        ));
    }

    #[test]
    fn token_with_non_json_payload_is_invalid() {
        let token = forge_token("not json at all");
        assert!(matches!(
            decode_identity_token(&token),
            Err(SessionError::InvalidToken(_))
        ));
    }

    // ---- Backoff ----

    #[tokio::test(start_paused = true)]
    async fn ready_on_first_probe_takes_one_attempt() {
        let attempts = wait_ready(|| async { true }, BackoffPolicy::default())
            .await
            .unwrap();
        assert_eq!(attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let count = Arc::new(AtomicU32::new(0));
        let probe_count = count.clone();
        let attempts = wait_ready(
            move || {
                let count = probe_count.clone();
                async move { count.fetch_add(1, Ordering::SeqCst) >= 2 }
            },
            BackoffPolicy::default(),
        )
        .await
        .unwrap();
        assert_eq!(attempts, 3);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let count = Arc::new(AtomicU32::new(0));
        let probe_count = count.clone();
        let err = wait_ready(
            move || {
                let count = probe_count.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    false
                }
            },
            BackoffPolicy {
                initial: std::time::Duration::from_millis(100),
                multiplier: 2.0,
                max_attempts: 4,
            },
        )
        .await
        .unwrap_err();

        match err {
            SessionError::ProviderUnavailable { attempts } => assert_eq!(attempts, 4),
            other => panic!("expected ProviderUnavailable, got: {other}"),
        }
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }
}
