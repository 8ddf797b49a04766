//! Finds plugin checkouts that are behind upstream or sitting on a detached HEAD, and
//! moves detached ones back onto `main` (or `master`).

use super::command::CommandRunner;
use crate::collectors::ProcessSource;
use crate::config::MaintenanceConfig;
use crate::error::MaintenanceError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use walkdir::WalkDir;

const BEHIND_MARKER: &str = "branch is behind";
const DETACHED_MARKER: &str = "HEAD detached at";
const INVALID_REF_MARKER: &str = "not a valid ref";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoStatus {
    UpToDate,
    Behind,
    Detached,
}

impl RepoStatus {
    /// Classify `status -uno` output.
    pub fn classify(output: &str) -> Self {
        if output.contains(BEHIND_MARKER) {
            RepoStatus::Behind
        } else if output.contains(DETACHED_MARKER) {
            RepoStatus::Detached
        } else {
            RepoStatus::UpToDate
        }
    }

    pub fn is_outdated(self) -> bool {
        self != RepoStatus::UpToDate
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Subdirectories inspected
    pub scanned: usize,
    /// Behind or detached, in directory-name order
    pub outdated: Vec<PathBuf>,
    /// Detached checkouts moved back onto a branch
    pub recovered: Vec<PathBuf>,
    /// Detached checkouts whose fetch or checkout failed
    pub recovery_failed: Vec<PathBuf>,
    /// Directories whose status check could not run
    pub status_failed: Vec<PathBuf>,
}

pub struct OutdatedDetector {
    runner: Arc<dyn CommandRunner>,
    source: Arc<dyn ProcessSource>,
    program: String,
}

impl OutdatedDetector {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        source: Arc<dyn ProcessSource>,
        config: &MaintenanceConfig,
    ) -> Self {
        Self {
            runner,
            source,
            program: config.vcs_program.clone(),
        }
    }

    /// PIDs of running version-control processes (the program itself or one of its
    /// `<program>-*` helpers), excluding this process.
    pub fn conflicting_processes(&self) -> Result<Vec<u32>, MaintenanceError> {
        let own = std::process::id();
        let helper_prefix = format!("{}-", self.program);
        let mut pids: Vec<u32> = self
            .source
            .snapshot()?
            .into_iter()
            .filter(|p| p.pid != own)
            .filter(|p| p.name == self.program || p.name.starts_with(&helper_prefix))
            .map(|p| p.pid)
            .collect();
        pids.sort_unstable();
        Ok(pids)
    }

    /// Immediate subdirectories of `root`, sorted by name.
    pub fn list_dirs(root: &Path) -> Result<Vec<PathBuf>, MaintenanceError> {
        let unreadable = |source: io::Error| MaintenanceError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        };
        let meta = std::fs::metadata(root).map_err(unreadable)?;
        if !meta.is_dir() {
            return Err(unreadable(io::Error::new(
                io::ErrorKind::Other,
                "not a directory",
            )));
        }

        let mut dirs = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            match entry {
                Ok(e) if e.file_type().is_dir() => dirs.push(e.into_path()),
                Ok(_) => {}
                Err(e) if e.depth() == 0 => {
                    let msg = e.to_string();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, msg));
                    return Err(unreadable(source));
                }
                Err(e) => warn!(error = %e, "skipping unreadable entry"),
            }
        }
        Ok(dirs)
    }

    /// Status of one checkout; `None` when the status command could not run or failed.
    pub fn status(&self, dir: &Path) -> Option<RepoStatus> {
        match self.runner.run(&self.program, &["status", "-uno"], dir) {
            Ok(out) if out.success => Some(RepoStatus::classify(&out.output)),
            Ok(out) => {
                error!(dir = %dir.display(), output = %out.output.trim_end(), "status check failed");
                None
            }
            Err(e) => {
                error!(dir = %dir.display(), error = %e, "status check failed");
                None
            }
        }
    }

    /// `main` when `refs/heads/main` verifies, otherwise `master`.
    pub fn recovery_branch(&self, dir: &Path) -> &'static str {
        let args = ["show-ref", "--verify", "refs/heads/main"];
        match self.runner.run(&self.program, &args, dir) {
            Ok(out) if out.success && !out.output.contains(INVALID_REF_MARKER) => "main",
            _ => "master",
        }
    }

    /// Fetch and check out the recovery branch. Returns whether the checkout succeeded.
    pub fn recover(&self, dir: &Path) -> bool {
        let branch = self.recovery_branch(dir);

        match self.runner.run(&self.program, &["fetch", "origin", branch], dir) {
            Ok(out) if out.success => {}
            Ok(out) => warn!(dir = %dir.display(), branch, output = %out.output.trim_end(), "branch fetch failed"),
            Err(e) => warn!(dir = %dir.display(), branch, error = %e, "branch fetch failed"),
        }

        match self.runner.run(&self.program, &["checkout", branch], dir) {
            Ok(out) if out.success => {
                info!(dir = %dir.display(), branch, "detached checkout recovered");
                true
            }
            Ok(out) => {
                error!(dir = %dir.display(), branch, output = %out.output.trim_end(), "checkout failed");
                false
            }
            Err(e) => {
                error!(dir = %dir.display(), branch, error = %e, "checkout failed");
                false
            }
        }
    }

    /// Guard against concurrent version-control activity, then classify every immediate
    /// subdirectory of `root`, recovering detached ones along the way.
    pub fn scan(&self, root: &Path) -> Result<ScanReport, MaintenanceError> {
        let pids = self.conflicting_processes()?;
        if !pids.is_empty() {
            return Err(MaintenanceError::ConflictingProcesses { pids });
        }

        info!(root = %root.display(), "finding outdated plugins");
        let dirs = Self::list_dirs(root)?;
        let mut report = ScanReport {
            scanned: dirs.len(),
            ..ScanReport::default()
        };

        for dir in dirs {
            let Some(status) = self.status(&dir) else {
                report.status_failed.push(dir);
                continue;
            };
            match status {
                RepoStatus::UpToDate => {}
                RepoStatus::Behind => {
                    info!(dir = %dir.display(), "found an outdated plugin");
                    report.outdated.push(dir);
                }
                RepoStatus::Detached => {
                    info!(dir = %dir.display(), "found a plugin with a detached HEAD");
                    if self.recover(&dir) {
                        report.recovered.push(dir.clone());
                    } else {
                        report.recovery_failed.push(dir.clone());
                    }
                    report.outdated.push(dir);
                }
            }
        }

        info!(
            scanned = report.scanned,
            outdated = report.outdated.len(),
            recovered = report.recovered.len(),
            "scan finished"
        );
        Ok(report)
    }
}
