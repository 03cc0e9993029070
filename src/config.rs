// Configuration loading and parsing (league.toml, strategy.toml, credentials.toml).

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::session::BackoffPolicy;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub llm: LlmConfig,
    pub backoff: BackoffConfig,
    pub credentials: CredentialsConfig,
    pub db_path: String,
    pub data_paths: DataPaths,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub my_team: String,
    pub num_teams: usize,
    pub scoring_type: String,
}

// ---------------------------------------------------------------------------
// strategy.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire strategy.toml file.
#[derive(Debug, Clone, Deserialize)]
struct StrategyFile {
    llm: LlmConfig,
    backoff: BackoffConfig,
    database: DatabaseSection,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseSection {
    path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub max_output_tokens: u32,
    /// Thinking-token budget passed through to the model's generation config.
    pub thinking_budget: u32,
}

/// Readiness-probe backoff for the advisory provider.
#[derive(Debug, Clone, Deserialize)]
pub struct BackoffConfig {
    pub initial_ms: u64,
    pub multiplier: f64,
    pub max_attempts: u32,
}

impl BackoffConfig {
    pub fn to_policy(&self) -> BackoffPolicy {
        BackoffPolicy {
            initial: std::time::Duration::from_millis(self.initial_ms),
            multiplier: self.multiplier,
            max_attempts: self.max_attempts,
        }
    }
}

/// CSV locations for roster and waiver-wire players; missing files fall back
/// to the bundled demo fixtures.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub roster: String,
    pub waivers: String,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub gemini_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse one TOML file into `T`. A missing file is `FileNotFound`.
fn parse_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate configuration from `config/league.toml`,
/// `config/strategy.toml`, and (optionally) `config/credentials.toml`,
/// all relative to `base_dir`. Does not auto-copy defaults; prefer
/// `load_config()` which does.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let league_file: LeagueFile = parse_toml(&config_dir.join("league.toml"))?;
    let strategy: StrategyFile = parse_toml(&config_dir.join("strategy.toml"))?;

    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        parse_toml(&credentials_path)?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        league: league_file.league,
        llm: strategy.llm,
        backoff: strategy.backoff,
        credentials,
        db_path: strategy.database.path,
        data_paths: strategy.data_paths,
    };
    validate(&config)?;
    Ok(config)
}

/// First-run setup: copy each file from `defaults/` into `config/` unless it
/// is already there. `.example` templates are never copied. Returns the paths
/// that were created.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    let copy_err = |message: String| ConfigError::DefaultsCopyError { message };

    if !defaults_dir.exists() {
        if config_dir.exists() {
            // Nothing to seed from, but an existing config/ can still load.
            return Ok(vec![]);
        }
        return Err(copy_err(format!(
            "neither defaults/ nor config/ directory found in {}; \
             run from the project root or ensure defaults/ is present",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_err(format!("failed to create config directory: {e}")))?;

    let mut copied = Vec::new();
    let entries = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_err(format!("failed to read defaults directory: {e}")))?;

    for entry in entries {
        let source = entry
            .map_err(|e| copy_err(format!("failed to read defaults entry: {e}")))?
            .path();
        if !source.is_file() {
            continue;
        }
        let Some(file_name) = source.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        if target.exists() {
            // User-edited files win over defaults.
            continue;
        }
        std::fs::copy(&source, &target)
            .map_err(|e| copy_err(format!("failed to copy {}: {e}", source.display())))?;
        copied.push(target);
    }

    Ok(copied)
}

/// Load config relative to the current working directory, copying defaults
/// into place first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.num_teams < 2 {
        return Err(invalid("league.num_teams", "must be at least 2"));
    }
    if config.league.my_team.trim().is_empty() {
        return Err(invalid("league.my_team", "must not be empty"));
    }

    if config.llm.model.trim().is_empty() {
        return Err(invalid("llm.model", "must not be empty"));
    }
    if config.llm.max_output_tokens == 0 {
        return Err(invalid("llm.max_output_tokens", "must be > 0"));
    }

    if config.backoff.initial_ms == 0 {
        return Err(invalid("backoff.initial_ms", "must be > 0"));
    }
    if config.backoff.multiplier < 1.0 {
        return Err(invalid(
            "backoff.multiplier",
            format!("must be >= 1.0, got {}", config.backoff.multiplier),
        ));
    }
    if config.backoff.max_attempts == 0 {
        return Err(invalid("backoff.max_attempts", "must be > 0"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const LEAGUE_TOML: &str = r#"
[league]
name = "Hardwood Heroes"
my_team = "The Deep Web"
num_teams = 10
scoring_type = "h2h_each_category"
"#;

    const STRATEGY_TOML: &str = r#"
[llm]
model = "gemini-3-pro-preview"
max_output_tokens = 1024
thinking_budget = 4000

[backoff]
initial_ms = 500
multiplier = 2.0
max_attempts = 5

[database]
path = "hoopsai.db"

[data_paths]
roster = "data/roster.csv"
waivers = "data/waivers.csv"
"#;

    /// Fresh temp project dir with the given league.toml and strategy.toml
    /// text under `config/`.
    fn project_dir(tag: &str, league: &str, strategy: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(format!("hoopsai_config_test_{tag}"));
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("league.toml"), league).unwrap();
        fs::write(config_dir.join("strategy.toml"), strategy).unwrap();
        tmp
    }

    fn validation_field(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config() {
        let tmp = project_dir("valid", LEAGUE_TOML, STRATEGY_TOML);
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.league.name, "Hardwood Heroes");
        assert_eq!(config.league.my_team, "The Deep Web");
        assert_eq!(config.league.num_teams, 10);
        assert_eq!(config.league.scoring_type, "h2h_each_category");

        assert_eq!(config.llm.model, "gemini-3-pro-preview");
        assert_eq!(config.llm.max_output_tokens, 1024);
        assert_eq!(config.llm.thinking_budget, 4000);

        assert_eq!(config.backoff.initial_ms, 500);
        assert_eq!(config.backoff.max_attempts, 5);

        assert_eq!(config.db_path, "hoopsai.db");
        assert_eq!(config.data_paths.roster, "data/roster.csv");
        assert_eq!(config.data_paths.waivers, "data/waivers.csv");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn backoff_config_converts_to_policy() {
        let tmp = project_dir("policy", LEAGUE_TOML, STRATEGY_TOML);
        let config = load_config_from(&tmp).unwrap();

        let policy = config.backoff.to_policy();
        assert_eq!(policy.initial, std::time::Duration::from_millis(500));
        assert_eq!(policy.max_attempts, 5);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_credentials_toml_is_ok() {
        let tmp = project_dir("no_creds", LEAGUE_TOML, STRATEGY_TOML);
        let config = load_config_from(&tmp).expect("should load without credentials.toml");
        assert!(config.credentials.gemini_api_key.is_none());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn credentials_toml_with_api_key() {
        let tmp = project_dir("with_creds", LEAGUE_TOML, STRATEGY_TOML);
        fs::write(
            tmp.join("config/credentials.toml"),
            "gemini_api_key = \"test-api-key\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load with credentials.toml");
        assert_eq!(
            config.credentials.gemini_api_key.as_deref(),
            Some("test-api-key")
        );
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_single_team_league() {
        let league = LEAGUE_TOML.replace("num_teams = 10", "num_teams = 1");
        let tmp = project_dir("one_team", &league, STRATEGY_TOML);
        let field = validation_field(load_config_from(&tmp).unwrap_err());
        assert_eq!(field, "league.num_teams");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_my_team() {
        let league = LEAGUE_TOML.replace("my_team = \"The Deep Web\"", "my_team = \"  \"");
        let tmp = project_dir("empty_team", &league, STRATEGY_TOML);
        let field = validation_field(load_config_from(&tmp).unwrap_err());
        assert_eq!(field, "league.my_team");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_max_output_tokens() {
        let strategy = STRATEGY_TOML.replace("max_output_tokens = 1024", "max_output_tokens = 0");
        let tmp = project_dir("zero_tokens", LEAGUE_TOML, &strategy);
        let field = validation_field(load_config_from(&tmp).unwrap_err());
        assert_eq!(field, "llm.max_output_tokens");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_shrinking_backoff() {
        let strategy = STRATEGY_TOML.replace("multiplier = 2.0", "multiplier = 0.5");
        let tmp = project_dir("shrinking_backoff", LEAGUE_TOML, &strategy);
        let field = validation_field(load_config_from(&tmp).unwrap_err());
        assert_eq!(field, "backoff.multiplier");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_league_toml() {
        let tmp = std::env::temp_dir().join("hoopsai_config_test_missing_league");
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("strategy.toml"), STRATEGY_TOML).unwrap();

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("league.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = project_dir("invalid_toml", "this is not valid [[[ toml", STRATEGY_TOML);
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("league.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("hoopsai_config_test_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join("league.toml"), LEAGUE_TOML).unwrap();
        fs::write(defaults_dir.join("strategy.toml"), STRATEGY_TOML).unwrap();
        fs::write(
            defaults_dir.join("credentials.toml.example"),
            "gemini_api_key = \"...\"\n",
        )
        .unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 2);

        assert!(tmp.join("config/league.toml").exists());
        assert!(tmp.join("config/strategy.toml").exists());
        // Templates stay templates.
        assert!(!tmp.join("config/credentials.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("hoopsai_config_test_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(defaults_dir.join("league.toml"), LEAGUE_TOML).unwrap();
        fs::write(defaults_dir.join("strategy.toml"), STRATEGY_TOML).unwrap();

        fs::write(config_dir.join("league.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(copied[0].ends_with("strategy.toml"));

        let content = fs::read_to_string(config_dir.join("league.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("hoopsai_config_test_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match ensure_config_files(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }
}
