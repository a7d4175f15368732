//! Configuration management for navigation decoration.
//!
//! Parses `navbar.toml` with serde and provides auto-discovery of the file in
//! the current directory and its parents. Every section is optional; missing
//! values fall back to the defaults below.
//!
//! ```toml
//! [index]
//! url = "https://main--boilerplate--eds-codeland.aem.page/query-index.json"
//! timeout_secs = 10
//!
//! [fragment]
//! path = "/nav"
//! root = "content"
//!
//! [navigation]
//! placeholder = "placeholder"
//! default_language = "ITA"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `index.url` and `fragment.root` support `${VAR}` and `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navbar.toml";

/// Default page index endpoint.
const DEFAULT_INDEX_URL: &str = "https://main--boilerplate--eds-codeland.aem.page/query-index.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page index configuration.
    pub index: IndexConfig,
    /// Fragment configuration (root is a relative string from TOML).
    fragment: FragmentConfigRaw,
    /// Navigation rendering configuration.
    pub navigation: NavigationConfig,

    /// Resolved fragment configuration (set after loading).
    #[serde(skip)]
    pub fragment_resolved: FragmentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Page index configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// JSON endpoint of the page index.
    pub url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl IndexConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INDEX_URL.to_owned(),
            timeout_secs: 10,
        }
    }
}

/// Raw fragment configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FragmentConfigRaw {
    path: Option<String>,
    root: Option<String>,
}

/// Resolved fragment configuration with an absolute root.
#[derive(Debug, Default)]
pub struct FragmentConfig {
    /// Fragment path handed to the loader (e.g. "/nav").
    pub path: String,
    /// Directory fragments are read from.
    pub root: PathBuf,
}

/// Navigation rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Sentinel token marking placeholder entries.
    pub placeholder: String,
    /// Language label used when the tools section lists none.
    pub default_language: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            placeholder: "placeholder".to_owned(),
            default_language: "ITA".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`index.url`").
        field: String,
        /// Error message (e.g., "${`INDEX_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `navbar.toml` in the current directory and parents, falling back to
    /// defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default_with_cwd()),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            index: IndexConfig::default(),
            fragment: FragmentConfigRaw::default(),
            navigation: NavigationConfig::default(),
            fragment_resolved: FragmentConfig {
                path: "/nav".to_owned(),
                root: base.join("content"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.index.url, "index.url")?;
        require_http_url(&self.index.url, "index.url")?;
        if self.index.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "index.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        if !self.fragment_resolved.path.starts_with('/') {
            return Err(ConfigError::Validation(
                "fragment.path must start with /".to_owned(),
            ));
        }

        require_non_empty(&self.navigation.placeholder, "navigation.placeholder")?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.index.url = expand::expand_env(&self.index.url, "index.url")?;
        if let Some(ref root) = self.fragment.root {
            self.fragment.root = Some(expand::expand_env(root, "fragment.root")?);
        }
        Ok(())
    }

    /// Resolve the fragment root against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.fragment_resolved = FragmentConfig {
            path: self.fragment.path.clone().unwrap_or_else(|| "/nav".to_owned()),
            root: config_dir.join(self.fragment.root.as_deref().unwrap_or("content")),
        };
    }
}
