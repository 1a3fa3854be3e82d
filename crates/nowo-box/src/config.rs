//! # Configuration
//!
//! [`NowoConfig`] holds the account credentials and the source-list
//! preferences shared by every player.
//!
//! ## Loading Priority
//!
//! Configuration is loaded from the first source that provides a value:
//!
//! 1. Explicit struct fields (programmatic construction)
//! 2. TOML config file at an explicit path
//! 3. File named by the `NOWO_CONFIG` environment variable
//! 4. `./nowo.toml` in the current directory
//! 5. `~/.config/nowo-box/nowo.toml`
//! 6. Environment variables only (`NOWO_USERNAME`, `NOWO_PASSWORD`, ...)
//!
//! Individual fields can always be overridden by environment variables,
//! even when loading from a file.
//!
//! ## File format
//!
//! ```toml
//! username = "me@example.com"
//! password = "hunter2"
//! favorites = true
//! source_filters = ["RTP", "SIC"]
//!
//! [timeouts]
//! request_timeout_secs = 15
//! ```
//!
//! The keys `favorites-mode`, `sourcefilter` and `source-name-filters` are
//! accepted as aliases.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::SourceFilter;
use crate::error::{NowoError, NowoResult};
use crate::protocol::constants::DEFAULT_API_URL;

/// Default per-request timeout in seconds.
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Name of the config file searched in the current and home directories.
const CONFIG_FILE_NAME: &str = "nowo.toml";

/// Environment variable names.
const ENV_USERNAME: &str = "NOWO_USERNAME";
const ENV_PASSWORD: &str = "NOWO_PASSWORD";
const ENV_API_URL: &str = "NOWO_API_URL";
const ENV_FAVORITES: &str = "NOWO_FAVORITES";
const ENV_SOURCE_FILTERS: &str = "NOWO_SOURCE_FILTERS";
const ENV_CONFIG: &str = "NOWO_CONFIG";

/// Configuration for the NOWO client and its players.
///
/// # Examples
///
/// ## Programmatic
///
/// ```
/// use nowo_box::config::NowoConfig;
///
/// let mut config = NowoConfig::new("me@example.com", "hunter2");
/// config.favorites = true;
/// config.source_filters = vec!["RTP".into()];
/// assert!(config.source_filter().favorites_only);
/// ```
///
/// ## From a TOML file
///
/// ```no_run
/// use nowo_box::config::NowoConfig;
///
/// let config = NowoConfig::from_file("nowo.toml").expect("Bad config");
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct NowoConfig {
    /// NOWO account username.
    pub username: String,

    /// NOWO account password.
    pub password: String,

    /// Only expose channels marked as favorites.
    #[serde(default, alias = "favorites-mode")]
    pub favorites: bool,

    /// Case-insensitive substrings; when non-empty, only channels whose
    /// name contains at least one of them are exposed.
    #[serde(default, alias = "sourcefilter", alias = "source-name-filters")]
    pub source_filters: Vec<String>,

    /// Base URL of the NOWO API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Timeout configuration.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

/// Timeout settings for outbound requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Timeout for a single HTTP request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

// ─── Defaults ───────────────────────────────────────────────────────────

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

// ─── NowoConfig impl ───────────────────────────────────────────────────

impl NowoConfig {
    /// Create a config with just credentials (all other fields use defaults).
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            favorites: false,
            source_filters: Vec::new(),
            api_url: default_api_url(),
            timeouts: TimeoutConfig::default(),
        }
    }

    /// Load config from environment variables.
    ///
    /// Required: `NOWO_USERNAME`, `NOWO_PASSWORD`
    ///
    /// Optional: `NOWO_API_URL`, `NOWO_FAVORITES`, `NOWO_SOURCE_FILTERS`
    /// (comma-separated)
    pub fn from_env() -> NowoResult<Self> {
        Self::from_lookup(&process_env)
    }

    /// Load config from a TOML file, with environment variable overrides.
    #[cfg(feature = "config-toml")]
    pub fn from_file(path: impl AsRef<Path>) -> NowoResult<Self> {
        Self::from_file_with(path.as_ref(), &process_env)
    }

    /// Discover and load config from the standard search path:
    ///
    /// 1. Explicit path (if `Some`)
    /// 2. `NOWO_CONFIG` environment variable
    /// 3. `./nowo.toml`
    /// 4. `~/.config/nowo-box/nowo.toml`
    ///
    /// Falls back to environment-variable-only config if no file is found.
    #[cfg(feature = "config-toml")]
    pub fn discover(explicit_path: Option<&Path>) -> NowoResult<Self> {
        let cwd = std::env::current_dir()?;
        Self::discover_in(explicit_path, &cwd, &process_env)
    }

    /// The source-list filter described by this config.
    #[must_use]
    pub fn source_filter(&self) -> SourceFilter {
        SourceFilter::new(self.favorites, self.source_filters.clone())
    }

    /// Check that the required credentials are present.
    pub fn validate(&self) -> NowoResult<()> {
        if self.username.trim().is_empty() {
            return Err(NowoError::ConfigError {
                reason: "username is required".into(),
            });
        }
        if self.password.is_empty() {
            return Err(NowoError::ConfigError {
                reason: "password is required".into(),
            });
        }
        Ok(())
    }

    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> NowoResult<Self> {
        let missing = |variable: &str| NowoError::MissingCredentials {
            variable: variable.to_string(),
        };
        let username = lookup(ENV_USERNAME).ok_or_else(|| missing(ENV_USERNAME))?;
        let password = lookup(ENV_PASSWORD).ok_or_else(|| missing(ENV_PASSWORD))?;

        let mut config = Self::new(username, password);
        config.apply_overrides(lookup);
        Ok(config)
    }

    #[cfg(feature = "config-toml")]
    fn from_file_with(
        path: &Path,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> NowoResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| NowoError::ConfigError {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        let mut config: Self = toml::from_str(&contents)?;

        if let Some(username) = lookup(ENV_USERNAME) {
            config.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            config.password = password;
        }
        config.apply_overrides(lookup);

        Ok(config)
    }

    #[cfg(feature = "config-toml")]
    fn discover_in(
        explicit_path: Option<&Path>,
        cwd: &Path,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> NowoResult<Self> {
        // 1. Explicit path
        if let Some(path) = explicit_path {
            return Self::from_file_with(path, lookup);
        }

        // 2. NOWO_CONFIG env var
        if let Some(path) = lookup(ENV_CONFIG) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::from_file_with(&path, lookup);
            }
        }

        // 3. ./nowo.toml
        let local_path = cwd.join(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Self::from_file_with(&local_path, lookup);
        }

        // 4. ~/.config/nowo-box/nowo.toml
        if let Some(config_path) = user_config_path(lookup) {
            if config_path.exists() {
                return Self::from_file_with(&config_path, lookup);
            }
        }

        // 5. Environment variables only
        Self::from_lookup(lookup)
    }

    /// Optional fields that environment variables may override.
    fn apply_overrides(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(favorites) = lookup(ENV_FAVORITES) {
            self.favorites = parse_flag(&favorites);
        }
        if let Some(filters) = lookup(ENV_SOURCE_FILTERS) {
            self.source_filters = split_filters(&filters);
        }
    }
}

// The password is a credential; keep it out of debug output.
impl std::fmt::Debug for NowoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NowoConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("favorites", &self.favorites)
            .field("source_filters", &self.source_filters)
            .field("api_url", &self.api_url)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn split_filters(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Platform-appropriate config file path.
#[cfg(feature = "config-toml")]
fn user_config_path(lookup: &dyn Fn(&str) -> Option<String>) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        lookup("APPDATA")
            .map(|dir| PathBuf::from(dir).join("nowo-box").join(CONFIG_FILE_NAME))
    }
    #[cfg(not(target_os = "windows"))]
    {
        lookup("HOME").map(|dir| {
            PathBuf::from(dir)
                .join(".config")
                .join("nowo-box")
                .join(CONFIG_FILE_NAME)
        })
    }
}
