use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::directive::{self, Directive};
use crate::error::{ConfigError, Result};

/// Default shell interpreter for scheduled commands.
pub const DEFAULT_SHELL: &str = "sh";

/// Top-level config (belltower.toml + BELLTOWER_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BelltowerConfig {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Scheduler subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Path to the tab file of schedule directives.
    /// Override with env var: BELLTOWER_SCHEDULER_TAB=/etc/belltower/tab
    #[serde(default = "default_tab_path")]
    pub tab: String,

    /// Shell interpreter used to run commands (`<shell> -c <command>`).
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tab: default_tab_path(),
            shell: default_shell(),
        }
    }
}

impl BelltowerConfig {
    /// Load config from a TOML file with BELLTOWER_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.belltower/belltower.toml
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: BelltowerConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("BELLTOWER_").split("_"))
            .extract()
            .map_err(|e| ConfigError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Read and parse the configured tab file.
    ///
    /// A missing tab file is an empty schedule, not an error — the host
    /// idles. An unreadable or malformed file aborts setup.
    pub fn load_tab(&self) -> Result<Vec<Directive>> {
        let path = &self.scheduler.tab;
        if !std::path::Path::new(path).exists() {
            return Ok(Vec::new());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        directive::parse_tab(&text)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{home}/.belltower/belltower.toml")
}

fn default_tab_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{home}/.belltower/tab")
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
