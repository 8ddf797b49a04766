//! Live process table via sysinfo.

use super::{cpu_affinity, ProcessRecord, ProcessSource};
use crate::error::CollectError;
use std::path::Path;
use std::sync::Mutex;
use sysinfo::System;

/// Keeps one `System` across refreshes; sysinfo derives CPU usage from the delta between
/// two consecutive refreshes, so each cadence should own its own source.
pub struct SysinfoSource {
    sys: Mutex<System>,
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSource {
    pub fn new() -> Self {
        Self {
            sys: Mutex::new(System::new_all()),
        }
    }
}

impl ProcessSource for SysinfoSource {
    fn snapshot(&self) -> Result<Vec<ProcessRecord>, CollectError> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|_| CollectError::Unavailable("process table lock poisoned".into()))?;
        sys.refresh_memory();
        sys.refresh_processes();

        let total_memory = sys.total_memory();
        if sys.processes().is_empty() {
            return Err(CollectError::Unavailable("empty process table".into()));
        }

        let mut records: Vec<ProcessRecord> = sys
            .processes()
            .iter()
            .map(|(pid, proc_)| {
                let exe = proc_.exe().map(Path::to_path_buf);
                // Prefer the executable's base name; sysinfo's name can be truncated.
                let name = exe
                    .as_deref()
                    .and_then(Path::file_name)
                    .and_then(|n| n.to_str())
                    .map(String::from)
                    .unwrap_or_else(|| proc_.name().to_string());
                let rss_bytes = proc_.memory();
                let memory_percent = if total_memory == 0 {
                    0.0
                } else {
                    (rss_bytes as f64 / total_memory as f64 * 100.0) as f32
                };
                ProcessRecord {
                    pid: pid.as_u32(),
                    ppid: proc_.parent().map(|p| p.as_u32()),
                    name,
                    exe,
                    rss_bytes,
                    memory_percent,
                    cpu_percent: proc_.cpu_usage(),
                    cpu_affinity: cpu_affinity(pid.as_u32()),
                }
            })
            .collect();
        // HashMap iteration order is arbitrary; PID order keeps ties stable across cycles.
        records.sort_by_key(|r| r.pid);
        Ok(records)
    }
}
