use anyhow::{bail, Context, Result};
use macro_deck_dispatch::platform::{self, OsFamily};
use macro_deck_dispatch::{ActionDispatcher, SystemShellExecutor};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const CONFIG_ENV: &str = "MACRO_DECK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "macro-deck.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Force a platform command table instead of detecting the host.
    pub platform: Option<OsFamily>,
    /// Kill commands that run longer than this. Unset waits forever.
    pub timeout_ms: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: None,
            timeout_ms: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(Self::path())
    }

    /// A missing file yields the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == Some(0) {
            bail!("timeout_ms must be greater than 0 (omit it to disable the timeout)");
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown log level: {}", self.log_level))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn family(&self) -> Result<OsFamily> {
        match self.platform {
            Some(family) => Ok(family),
            None => OsFamily::detect().context("Cannot detect host platform"),
        }
    }

    /// Build the dispatcher once, checking its command table up front.
    pub fn dispatcher(&self) -> Result<ActionDispatcher> {
        let family = self.family()?;
        let table = platform::for_family(family);
        platform::verify_coverage(table.as_ref())
            .with_context(|| format!("Incomplete command table for {family}"))?;

        Ok(ActionDispatcher::new(table, Arc::new(SystemShellExecutor::new()))
            .with_timeout(self.timeout()))
    }
}
