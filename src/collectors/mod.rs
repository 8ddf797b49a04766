//! Process table snapshots. One record shape for everything downstream; a source trait so
//! the core can be driven by the live OS table or by a fixed list in tests.

mod affinity;
mod process;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CollectError;

pub use affinity::cpu_affinity;
pub use process::SysinfoSource;

/// One OS process as seen by a single snapshot. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: u32,
    /// `None` when the parent could not be resolved
    pub ppid: Option<u32>,
    /// Executable base name
    pub name: String,
    /// Full executable path, when readable
    pub exe: Option<PathBuf>,
    pub rss_bytes: u64,
    pub memory_percent: f32,
    pub cpu_percent: f32,
    /// Logical CPU indices the process may run on
    pub cpu_affinity: Vec<usize>,
}

impl ProcessRecord {
    /// Minimal record; metrics zeroed. Mostly useful for fixtures.
    pub fn new(pid: u32, ppid: Option<u32>, name: impl Into<String>) -> Self {
        Self {
            pid,
            ppid,
            name: name.into(),
            exe: None,
            rss_bytes: 0,
            memory_percent: 0.0,
            cpu_percent: 0.0,
            cpu_affinity: Vec::new(),
        }
    }

    pub fn with_exe(mut self, exe: impl Into<PathBuf>) -> Self {
        self.exe = Some(exe.into());
        self
    }

    pub fn with_usage(mut self, cpu_percent: f32, memory_percent: f32) -> Self {
        self.cpu_percent = cpu_percent;
        self.memory_percent = memory_percent;
        self
    }

    /// Executable path for display and logging; empty when unknown.
    pub fn exe_display(&self) -> String {
        self.exe
            .as_deref()
            .map(Path::to_string_lossy)
            .map(|s| s.into_owned())
            .unwrap_or_default()
    }
}

/// Anything that can produce the full current process list.
pub trait ProcessSource: Send + Sync {
    fn snapshot(&self) -> Result<Vec<ProcessRecord>, CollectError>;
}

/// Fixed snapshot; handy for replaying a captured table.
impl ProcessSource for Vec<ProcessRecord> {
    fn snapshot(&self) -> Result<Vec<ProcessRecord>, CollectError> {
        Ok(self.clone())
    }
}
