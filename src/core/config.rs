//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.spatnav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::bootstrap::BootstrapTiming;
use crate::core::engine::EngineOptions;
use crate::core::geometry::DEFAULT_MIN_SIZE;
use crate::core::input::{Command, KeyMap};
use crate::core::registry::{
    DEFAULT_CANDIDATE_SELECTORS, DEFAULT_MARKER_CLASS, DEFAULT_OVERLAY_ID, RegistryOptions,
};
use crate::core::selector::{DEFAULT_DEAD_ZONE, Direction};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SpatnavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    #[serde(default)]
    pub keys: KeyConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub min_size: Option<f64>,
    pub dead_zone: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SelectorConfig {
    pub candidates: Option<Vec<String>>,
    pub marker_class: Option<String>,
    pub overlay_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BootstrapConfig {
    pub poll_interval_ms: Option<u64>,
    pub max_polls: Option<u32>,
    pub settle_delay_ms: Option<u64>,
}

/// Extra key aliases, added on top of the built-in bindings.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KeyConfig {
    #[serde(default)]
    pub left: Vec<String>,
    #[serde(default)]
    pub right: Vec<String>,
    #[serde(default)]
    pub up: Vec<String>,
    #[serde(default)]
    pub down: Vec<String>,
    #[serde(default)]
    pub activate: Vec<String>,
    #[serde(default)]
    pub back: Vec<String>,
    #[serde(default)]
    pub refresh: Vec<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_MAX_POLLS: u32 = 120;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1500;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub page: Option<PathBuf>,
    pub engine: EngineOptions,
    pub timing: BootstrapTiming,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.spatnav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".spatnav").join("config.toml"))
}

/// Load config from `~/.spatnav/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SpatnavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SpatnavConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SpatnavConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SpatnavConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<SpatnavConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SpatnavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# spatnav Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# page = "pages/home.toml"           # Or set SPATNAV_PAGE / pass --page

# [navigation]
# min_size = 30.0                    # Elements must be wider AND taller than this
# dead_zone = 30.0                   # Minimum center offset along the move axis

# [selectors]
# candidates = [".back", "button", "a", "[role=\"button\"]", "div[onclick]"]
# marker_class = "tv-focusable"
# overlay_id = "tv-play-overlay"

# [bootstrap]
# poll_interval_ms = 500             # How often to check that the page rendered
# max_polls = 120                    # Give up after this many checks (0 = check once)
# settle_delay_ms = 1500             # Wait before the first focus is applied

# [keys]                             # Extra aliases on top of the built-in keys
# back = ["XF86Back"]
# activate = ["Select"]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_page` is from the `--page` flag (None = not specified).
pub fn resolve(config: &SpatnavConfig, cli_page: Option<&str>) -> ResolvedConfig {
    resolve_with(config, cli_page, |name| std::env::var(name).ok())
}

fn resolve_with<F>(config: &SpatnavConfig, cli_page: Option<&str>, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Page: CLI → env → config
    let page = cli_page
        .map(|s| s.to_string())
        .or_else(|| env("SPATNAV_PAGE"))
        .or_else(|| config.general.page.clone())
        .map(PathBuf::from);

    // Thresholds: env → config → default
    let min_size = env_f64(&env, "SPATNAV_MIN_SIZE")
        .or(config.navigation.min_size)
        .unwrap_or(DEFAULT_MIN_SIZE);
    let dead_zone = env_f64(&env, "SPATNAV_DEAD_ZONE")
        .or(config.navigation.dead_zone)
        .unwrap_or(DEFAULT_DEAD_ZONE);

    let registry = RegistryOptions {
        candidates: config.selectors.candidates.clone().unwrap_or_else(|| {
            DEFAULT_CANDIDATE_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect()
        }),
        marker_class: config
            .selectors
            .marker_class
            .clone()
            .unwrap_or_else(|| DEFAULT_MARKER_CLASS.to_string()),
        overlay_id: config
            .selectors
            .overlay_id
            .clone()
            .unwrap_or_else(|| DEFAULT_OVERLAY_ID.to_string()),
        min_size,
    };

    let timing = BootstrapTiming {
        poll_interval: Duration::from_millis(
            config
                .bootstrap
                .poll_interval_ms
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        ),
        max_polls: config.bootstrap.max_polls.unwrap_or(DEFAULT_MAX_POLLS),
        settle_delay: Duration::from_millis(
            config
                .bootstrap
                .settle_delay_ms
                .unwrap_or(DEFAULT_SETTLE_DELAY_MS),
        ),
    };

    ResolvedConfig {
        page,
        engine: EngineOptions {
            registry,
            dead_zone,
            keymap: build_keymap(&config.keys),
        },
        timing,
    }
}

fn env_f64<F>(env: &F, name: &str) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = env(name)?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => {
            warn!("Ignoring {}={:?}: not a non-negative number", name, raw);
            None
        }
    }
}

/// Built-in bindings plus the configured aliases.
fn build_keymap(keys: &KeyConfig) -> KeyMap {
    let mut map = KeyMap::default();
    map.bind_all(keys.left.iter().cloned(), Command::Move(Direction::Left));
    map.bind_all(keys.right.iter().cloned(), Command::Move(Direction::Right));
    map.bind_all(keys.up.iter().cloned(), Command::Move(Direction::Up));
    map.bind_all(keys.down.iter().cloned(), Command::Move(Direction::Down));
    map.bind_all(keys.activate.iter().cloned(), Command::Activate);
    map.bind_all(keys.back.iter().cloned(), Command::Back);
    map.bind_all(keys.refresh.iter().cloned(), Command::Refresh);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = SpatnavConfig::default();
        assert!(config.general.page.is_none());
        assert!(config.selectors.candidates.is_none());
        assert!(config.keys.back.is_empty());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&SpatnavConfig::default(), None, no_env);
        assert!(resolved.page.is_none());
        assert_eq!(resolved.engine.dead_zone, DEFAULT_DEAD_ZONE);
        assert_eq!(resolved.engine.registry.min_size, DEFAULT_MIN_SIZE);
        assert_eq!(resolved.engine.registry.marker_class, "tv-focusable");
        assert_eq!(
            resolved.engine.registry.candidates.len(),
            DEFAULT_CANDIDATE_SELECTORS.len()
        );
        assert_eq!(resolved.timing.poll_interval, Duration::from_millis(500));
        assert_eq!(resolved.timing.max_polls, DEFAULT_MAX_POLLS);
        assert_eq!(resolved.timing.settle_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_toml_values_override_defaults() {
        let toml_str = r#"
[general]
page = "pages/home.toml"

[navigation]
min_size = 10.0
dead_zone = 5.5

[selectors]
candidates = [".tile", "button"]
marker_class = "nav"

[bootstrap]
settle_delay_ms = 0

[keys]
back = ["XF86Back"]
"#;
        let config: SpatnavConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve_with(&config, None, no_env);

        assert_eq!(resolved.page, Some(PathBuf::from("pages/home.toml")));
        assert_eq!(resolved.engine.registry.min_size, 10.0);
        assert_eq!(resolved.engine.dead_zone, 5.5);
        assert_eq!(resolved.engine.registry.candidates, vec![".tile", "button"]);
        assert_eq!(resolved.engine.registry.marker_class, "nav");
        assert_eq!(resolved.engine.registry.overlay_id, DEFAULT_OVERLAY_ID);
        assert_eq!(resolved.timing.settle_delay, Duration::ZERO);
        assert_eq!(resolved.engine.keymap.lookup("XF86Back"), Some(Command::Back));
        assert_eq!(resolved.engine.keymap.lookup("Escape"), Some(Command::Back));
    }

    #[test]
    fn test_env_overrides_config_and_cli_overrides_env() {
        let config: SpatnavConfig = toml::from_str(
            r#"
[general]
page = "from-config.toml"
[navigation]
dead_zone = 12.0
"#,
        )
        .unwrap();
        let env = |name: &str| match name {
            "SPATNAV_PAGE" => Some("from-env.toml".to_string()),
            "SPATNAV_DEAD_ZONE" => Some("44".to_string()),
            _ => None,
        };

        let resolved = resolve_with(&config, None, env);
        assert_eq!(resolved.page, Some(PathBuf::from("from-env.toml")));
        assert_eq!(resolved.engine.dead_zone, 44.0);

        let resolved = resolve_with(&config, Some("from-cli.toml"), env);
        assert_eq!(resolved.page, Some(PathBuf::from("from-cli.toml")));
    }

    #[test]
    fn test_bad_env_number_falls_through() {
        let config = SpatnavConfig {
            navigation: NavigationConfig {
                min_size: Some(12.0),
                dead_zone: None,
            },
            ..Default::default()
        };
        let env = |name: &str| (name == "SPATNAV_MIN_SIZE").then(|| "wide".to_string());
        let resolved = resolve_with(&config, None, env);
        assert_eq!(resolved.engine.registry.min_size, 12.0);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: SpatnavConfig = toml::from_str("[navigation]\nmin_size = 20.0\n").unwrap();
        assert_eq!(config.navigation.min_size, Some(20.0));
        assert!(config.navigation.dead_zone.is_none());
        assert!(config.bootstrap.max_polls.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[navigation\nmin_size = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("config I/O error"));
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        generate_default_config(&path);
        let config = load_config_from(&path).unwrap();
        assert!(config.general.page.is_none());
    }
}
