use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Polling parameters (`[poll]` section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Total wall-clock budget for one poll, in milliseconds.
    pub timeout_ms: u64,
    /// Extra consecutive `true` observations required after the first one.
    pub debounce: u32,
    /// Pause between two predicate evaluations, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    300
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            debounce: 0,
            interval_ms: default_interval_ms(),
        }
    }
}

impl PollConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Reject values the poller cannot honour. A zero interval would
    /// re-check back-to-back for the whole timeout.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.interval_ms > 0,
            "poll.interval_ms must be at least 1 (got {})",
            self.interval_ms
        );
        Ok(())
    }
}

/// Global configuration loaded from `~/.config/settle/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleConfig {
    /// Defaults for every poll started by the CLI; missing section = built-in defaults.
    #[serde(default)]
    pub poll: PollConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("settle")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SettleConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SettleConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<SettleConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: SettleConfig = toml::from_str(&data)?;
    cfg.poll.validate()?;
    Ok(cfg)
}
