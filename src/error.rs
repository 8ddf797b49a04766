use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The process table could not be read for this cycle.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("process snapshot unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("not attached to a terminal")]
    NotATerminal,

    #[error("cannot read terminal geometry: {source}")]
    TerminalGeometry {
        #[source]
        source: std::io::Error,
    },

    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error(transparent)]
    Snapshot(#[from] CollectError),

    #[error("collection task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum MaintenanceError {
    #[error("cannot read plugin root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("conflicting version-control processes running: {}", format_pids(.pids))]
    ConflictingProcesses { pids: Vec<u32> },

    #[error(transparent)]
    Snapshot(#[from] CollectError),

    #[error("maintenance task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn format_pids(pids: &[u32]) -> String {
    pids.iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
