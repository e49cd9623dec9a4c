use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// kubemon CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub poll_interval_ms: u64,
    /// Persisted auto-refresh toggle
    pub auto_refresh: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: String,
    pub colors: bool,
    pub timestamps: bool,
    pub max_width: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
    pub structured: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            auto_refresh: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "compact".to_string(),
            colors: true,
            timestamps: true,
            max_width: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            structured: false,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl DashboardConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Config {
    /// Load configuration from the standard locations
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        let config_file = Self::config_file()?;
        if config_file.exists() {
            debug!("Loading config from {}", config_file.display());
            config = Self::load_from_file(&config_file).with_context(|| {
                format!("Failed to load config from {}", config_file.display())
            })?;
        }

        // Override with environment variables
        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("KUBEMON_SERVER_URL") {
            self.server.url = url;
        }

        if let Ok(level) = std::env::var("KUBEMON_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(colors) = std::env::var("KUBEMON_COLORS") {
            self.output.colors = colors.parse().unwrap_or(true);
        }

        if let Ok(auto_refresh) = std::env::var("KUBEMON_AUTO_REFRESH") {
            if let Ok(enabled) = auto_refresh.parse() {
                self.dashboard.auto_refresh = enabled;
            }
        }
    }

    /// Get the config directory for this user
    pub fn config_dir() -> Result<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".config"))
                    .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))
            })
            .map(|dir| dir.join("kubemon"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Record the auto-refresh toggle in the config file at `path`.
    ///
    /// The file is re-read first so command-line and environment overrides
    /// in the running config are not written back.
    pub fn persist_auto_refresh_at(path: &Path, enabled: bool) -> Result<()> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        config.dashboard.auto_refresh = enabled;
        config.save_to(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }
}
