//! Structured logging: subscriber setup plus the two record shapes the rest of the crate
//! emits (process snapshot, command executed).

mod format;

pub use format::StructuredLogger;

use crate::collectors::ProcessRecord;
use std::path::Path;
use tracing::info;

/// One "process snapshot" record for a displayed (or logged) process.
pub fn log_process(cycle: &'static str, process: &ProcessRecord) {
    info!(
        target: "nvim_watcher::snapshot",
        cycle,
        pid = process.pid,
        name = %process.name,
        exe = %process.exe_display(),
        mem_percent = process.memory_percent,
        cpu_percent = process.cpu_percent,
        "process snapshot"
    );
}

/// One "command executed" record, emitted before the command runs.
pub fn log_command(command: &str, args: &[&str], dir: &Path) {
    info!(
        target: "nvim_watcher::command",
        command,
        args = %args.join(" "),
        dir = %dir.display(),
        "command executed"
    );
}
