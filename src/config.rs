//! Watcher configuration. Everything the core needs (editor name, helper allow-lists,
//! cadences, plugin root) is supplied here rather than hard-coded.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Base name of the editor executable whose top-level instances anchor the tree
    pub editor_executable: String,
    /// AI assistants and language servers worth showing
    pub helpers: HelperConfig,
    /// Live refresh and maintenance-log cadences
    pub supervisor: SupervisorConfig,
    /// Plugin directory maintenance
    pub maintenance: MaintenanceConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// Exact executable base names
    pub exact_names: Vec<String>,
    /// Case-insensitive substrings of the full executable path
    pub substring_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Coarse cadence: collect and log only (seconds)
    pub maintenance_interval_secs: u64,
    /// Fine cadence: collect, render and log (milliseconds)
    pub refresh_interval_ms: u64,
    /// Rows written to the log on each coarse tick
    pub log_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Directory whose immediate subdirectories are plugin checkouts
    pub root_path: PathBuf,
    /// Jobs per window
    pub batch_size: usize,
    /// Progress ticker cadence (milliseconds)
    pub tick_interval_ms: u64,
    /// Length of each progress bar
    pub bar_total: u64,
    /// Version-control program used for status, fetch and checkout
    pub vcs_program: String,
    /// Draw progress bars on the terminal
    pub show_progress: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
    /// Log file; stderr when unset
    pub file: Option<PathBuf>,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            editor_executable: "nvim".to_string(),
            helpers: HelperConfig::default(),
            supervisor: SupervisorConfig::default(),
            maintenance: MaintenanceConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for HelperConfig {
    fn default() -> Self {
        let exact = [
            "Codeium",
            "Copilot",
            "TabNine",
            "biome",
            "biome-agent",
            "biome-registry",
            "biome-service",
            "biomesyncd",
            "biomed",
            "clangd",
            "copilot",
            "cssls",
            "gopls",
            "html_ls",
            "jedi_language_server",
            "json_ls",
            "language_server_arm_macos",
            "pyls",
            "rust-analyzer",
            "sourcery",
            "sqls",
            "sumneko_lua",
            "terraform-ls",
            "tsserver",
        ];
        let partial = ["lsp", "biome", "rubocop", "codeium", "sourcery", "tabnine", "copilot"];
        Self {
            exact_names: exact.iter().map(|s| s.to_string()).collect(),
            substring_patterns: partial.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            maintenance_interval_secs: 30 * 60,
            refresh_interval_ms: 1000,
            log_rows: 10,
        }
    }
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        let root_path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local")
            .join("share")
            .join("nvim")
            .join("lazy");
        Self {
            root_path,
            batch_size: 3,
            tick_interval_ms: 300,
            bar_total: 100,
            vcs_program: "git".to_string(),
            show_progress: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
            file: Some(PathBuf::from("logs").join("nvim-watcher.log")),
        }
    }
}

impl SupervisorConfig {
    pub fn maintenance_interval(&self) -> Duration {
        Duration::from_secs(self.maintenance_interval_secs.max(1))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }
}

impl MaintenanceConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl WatcherConfig {
    /// Load from JSON file if present; otherwise return default. A file that cannot be
    /// read or parsed is reported on stderr (logging is not up yet) and ignored.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("nvim-watcher: {e}; using defaults");
                Self::default()
            }
        }
    }

    /// Like [`WatcherConfig::load`] but surfaces read and parse failures. A missing file
    /// is not an error.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
