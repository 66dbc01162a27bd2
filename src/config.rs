//! Configuration management for lekh using the prefer crate.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_client::USER_AGENT;
use crate::importer::{DEFAULT_COLLECTION, DEFAULT_MAX_PER_MONTH};
use crate::models::ArchivePeriod;
use crate::normalize::DEFAULT_SLUG_MAX_LEN;

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "lekh.db";

/// Blog the importer reads from unless configured otherwise.
pub const DEFAULT_SOURCE_URL: &str = "https://mritunjaysharma13.blogspot.com";

/// Author handle prefixed to post titles on the source blog.
pub const DEFAULT_AUTHOR_HANDLE: &str = "mritunjay13";

/// Newest archive month imported by default.
const DEFAULT_NEWEST_MONTH: (u16, u8) = (2026, 1);

/// Number of months imported by default (2026/01 back to 2024/09).
const DEFAULT_MONTH_COUNT: usize = 17;

/// Months imported when none are given, newest first.
pub fn default_archive_months() -> Vec<ArchivePeriod> {
    let (year, month) = DEFAULT_NEWEST_MONTH;
    ArchivePeriod::new(year, month)
        .map(|newest| newest.descending(DEFAULT_MONTH_COUNT))
        .unwrap_or_default()
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    pub database_url: Option<String>,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Delay between post fetches in milliseconds.
    pub request_delay_ms: u64,
    /// Root URL of the source blog.
    pub source_url: String,
    /// Handle stripped from the front of post titles.
    pub author_handle: String,
    /// Store collection posts are imported into.
    pub collection: String,
    /// Per-month cap on processed post URLs.
    pub max_per_month: usize,
    /// Months imported when none are given on the command line.
    pub archive_months: Vec<ArchivePeriod>,
    /// Maximum slug length.
    pub slug_max_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        // Documents dir -> Home dir -> Current dir
        let data_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lekh");

        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            user_agent: USER_AGENT.to_string(),
            request_timeout: 30,
            request_delay_ms: 200,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            author_handle: DEFAULT_AUTHOR_HANDLE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            max_per_month: DEFAULT_MAX_PER_MONTH,
            archive_months: default_archive_months(),
            slug_max_len: DEFAULT_SLUG_MAX_LEN,
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            url.clone()
        } else {
            format!("sqlite:{}", self.database_path().display())
        }
    }

    /// Get the full path to the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Check if the database appears to be initialized.
    pub fn database_exists(&self) -> bool {
        self.database_url.is_some() || self.database_path().exists()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        tracing::debug!("data_dir check: path={}", self.data_dir.display());
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// `DATABASE_URL`, `LEKH_SOURCE_URL` and `LEKH_AUTHOR_HANDLE` take
    /// precedence over the config file. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

        if let Some(url) = var("DATABASE_URL") {
            tracing::debug!("Using DATABASE_URL from environment: {}", url);
            self.database_url = Some(url);
        }
        if let Some(source) = var("LEKH_SOURCE_URL") {
            tracing::debug!("Using LEKH_SOURCE_URL from environment: {}", source);
            self.source_url = source.trim_end_matches('/').to_string();
        }
        if let Some(handle) = var("LEKH_AUTHOR_HANDLE") {
            self.author_handle = handle;
        }
    }
}

/// Configuration file contents. Every field is optional; unset fields keep
/// the [`Settings`] default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data directory (`~` and relative paths allowed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Database filename inside the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Delay between post fetches in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_delay_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_month: Option<usize>,
    /// Archive months as `"YYYY/MM"` strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_months: Option<Vec<ArchivePeriod>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug_max_len: Option<usize>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers lekh config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("lekh").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => Self::load_from_path(path).await.unwrap_or_else(|e| {
                    tracing::warn!("{}", e);
                    Self::default()
                }),
                None => Self::default(),
            },
            // No config file found
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config text in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, String> {
        match ext {
            "toml" => toml::from_str(contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e)),
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
        }
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(delay) = self.request_delay_ms {
            settings.request_delay_ms = delay;
        }
        if let Some(ref source_url) = self.source_url {
            settings.source_url = source_url.trim_end_matches('/').to_string();
        }
        if let Some(ref handle) = self.author_handle {
            settings.author_handle = handle.clone();
        }
        if let Some(ref collection) = self.collection {
            settings.collection = collection.clone();
        }
        if let Some(max) = self.max_per_month {
            settings.max_per_month = max;
        }
        if let Some(ref months) = self.archive_months {
            settings.archive_months = months.clone();
        }
        if let Some(max) = self.slug_max_len {
            settings.slug_max_len = max;
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Data directory (--data-dir flag).
    pub data_dir: Option<PathBuf>,
}

/// Load settings with explicit options.
///
/// Precedence, lowest to highest: defaults, config file, `--data-dir`,
/// environment.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await.unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            Config::default()
        }),
        None => Config::load().await,
    };

    let mut settings = Settings::default();
    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    config.apply_to_settings(&mut settings, &base_dir);

    if let Some(ref data_dir) = options.data_dir {
        let expanded = shellexpand::tilde(&data_dir.to_string_lossy()).into_owned();
        settings.data_dir = PathBuf::from(expanded);
    }

    settings.apply_env(|name| std::env::var(name).ok());

    (settings, config)
}
