//! nvim-watcher: live view of editor-spawned processes and plugin maintenance.
//!
//! Modular structure:
//! - [`collectors`]: Process table snapshots (sysinfo) as unified records
//! - [`processes`]: Helper allow-list, editor-rooted tree, top-N ranking
//! - [`display`]: Sort/view state shared with the key listener
//! - [`supervisor`]: Refresh and maintenance cadences
//! - [`render`]: Terminal session, bar chart, key bindings
//! - [`maintenance`]: Outdated plugin detection and windowed fetches
//! - [`logging`]: Structured JSON logging

pub mod collectors;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod maintenance;
pub mod processes;
pub mod render;
pub mod supervisor;

pub use collectors::{ProcessRecord, ProcessSource, SysinfoSource};
pub use config::WatcherConfig;
pub use display::{DisplaySettings, DisplayState, ViewMode};
pub use error::{CollectError, ConfigError, MaintenanceError, WatchError};
pub use logging::StructuredLogger;
pub use maintenance::{BatchRunner, OutdatedDetector};
pub use processes::{ProcessTree, RelevantSetFilter, SortKey, ViewSelector};
pub use supervisor::Supervisor;
