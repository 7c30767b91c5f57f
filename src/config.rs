//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::amazon::regions::Region;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Placeholder tag accepted by the API when no associate account is set up.
pub const DEFAULT_ASSOCIATE_TAG: &str = "PutYourAssociateTagHere";

/// Application configuration with layered loading.
///
/// API credentials are intentionally absent; they are read from the
/// environment by the CLI and passed to the lookup explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Amazon store
    #[serde(default)]
    pub region: Region,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Associate tag sent with every API request
    #[serde(default = "default_associate_tag")]
    pub associate_tag: String,

    /// Wishlist page ceiling; unset means no limit
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_associate_tag() -> String {
    DEFAULT_ASSOCIATE_TAG.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: Region::Uk,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            associate_tag: default_associate_tag(),
            max_pages: None,
            format: OutputFormat::Tsv,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if config.max_pages == Some(0) {
            anyhow::bail!("Invalid config file {}: max_pages must be at least 1", path.display());
        }

        Ok(config)
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("amz-catalog").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(self) -> Self {
        self.with_vars(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`; unparseable values are ignored.
    fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(region) = lookup("AMZ_REGION") {
            match region.parse() {
                Ok(r) => self.region = r,
                Err(e) => warn!("Ignoring AMZ_REGION: {}", e),
            }
        }

        if let Some(proxy) = lookup("AMZ_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Some(tag) = lookup("AMZ_ASSOCIATE_TAG") {
            self.associate_tag = tag;
        }

        if let Some(max) = lookup("AMZ_MAX_PAGES") {
            match max.parse::<u32>() {
                Ok(m) if m > 0 => self.max_pages = Some(m),
                _ => warn!("Ignoring AMZ_MAX_PAGES: '{}' is not a positive page count", max),
            }
        }

        if let Some(timeout) = lookup("AMZ_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" | "tab" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: tsv, csv, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
