//! Windowed fetch runner. The work list is cut into consecutive windows of `batch_size`;
//! every job in a window runs concurrently, and the next window starts only after each
//! job of the current one has signalled completion. That caps concurrent child
//! processes at the batch size.

use super::command::CommandRunner;
use super::progress;
use crate::config::MaintenanceConfig;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

/// Fixed argument set for every fetch.
pub const FETCH_ARGS: [&str; 5] = [
    "fetch",
    "--recurse-submodules",
    "--tags",
    "--force",
    "--progress",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceJob {
    /// Directory base name
    pub name: String,
    pub path: PathBuf,
    /// Window index
    pub window: usize,
    /// Position inside the window
    pub slot: usize,
}

impl MaintenanceJob {
    pub fn label(&self) -> String {
        format!("Batch#{} Job#{} {}:", self.window, self.slot, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub job: MaintenanceJob,
    pub success: bool,
    /// Combined command output, or the spawn error
    pub output: String,
    pub started_at: Instant,
    pub finished_at: Instant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[JobOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.success).count();
        Self {
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

/// Consecutive windows of `batch_size` (a zero size is treated as one). Only the last
/// window may be shorter.
pub fn partition<T: Clone>(items: &[T], batch_size: usize) -> Vec<Vec<T>> {
    items
        .chunks(batch_size.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Jobs for `dirs`, already grouped into windows.
pub fn plan(dirs: &[PathBuf], batch_size: usize) -> Vec<Vec<MaintenanceJob>> {
    partition(dirs, batch_size)
        .into_iter()
        .enumerate()
        .map(|(window, paths)| {
            paths
                .into_iter()
                .enumerate()
                .map(|(slot, path)| MaintenanceJob {
                    name: dir_name(&path),
                    path,
                    window,
                    slot,
                })
                .collect()
        })
        .collect()
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub struct BatchRunner {
    runner: Arc<dyn CommandRunner>,
    program: String,
    batch_size: usize,
    tick: Duration,
    bar_total: u64,
    show_progress: bool,
}

impl BatchRunner {
    pub fn new(runner: Arc<dyn CommandRunner>, config: &MaintenanceConfig) -> Self {
        Self {
            runner,
            program: config.vcs_program.clone(),
            batch_size: config.batch_size.max(1),
            tick: config.tick_interval(),
            bar_total: config.bar_total,
            show_progress: config.show_progress,
        }
    }

    /// Fetch every directory in `work`, window by window. One outcome per directory, in
    /// work-list order. A failed job never stops its siblings or later windows.
    pub async fn run(&self, work: &[PathBuf]) -> Vec<JobOutcome> {
        let windows = plan(work, self.batch_size);
        info!(jobs = work.len(), windows = windows.len(), batch_size = self.batch_size, "fetch run starting");

        let mut outcomes = Vec::with_capacity(work.len());
        for (index, window) in windows.into_iter().enumerate() {
            let mut window_outcomes = self.run_window(index, window).await;
            window_outcomes.sort_by_key(|o| o.job.slot);
            outcomes.extend(window_outcomes);
        }

        let summary = RunSummary::from_outcomes(&outcomes);
        info!(succeeded = summary.succeeded, failed = summary.failed, "fetch run finished");
        outcomes
    }

    async fn run_window(&self, index: usize, window: Vec<MaintenanceJob>) -> Vec<JobOutcome> {
        info!(window = index, jobs = window.len(), "window starting");
        let multi = progress::window_progress(self.show_progress);
        let (tx, mut rx) = mpsc::unbounded_channel::<JobOutcome>();

        let mut handles = Vec::with_capacity(window.len());
        for job in window {
            let bar = progress::job_bar(&multi, self.bar_total, job.label());
            let handle = tokio::spawn(run_job(
                Arc::clone(&self.runner),
                self.program.clone(),
                job.clone(),
                bar,
                self.tick,
                tx.clone(),
            ));
            handles.push((job, handle));
        }
        // The channel closes once every job has sent (or died without sending).
        drop(tx);

        let mut outcomes = Vec::with_capacity(handles.len());
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }
        for (job, handle) in handles {
            if let Err(e) = handle.await {
                warn!(dir = %job.path.display(), error = %e, "fetch task aborted");
                let now = Instant::now();
                outcomes.push(JobOutcome {
                    job,
                    success: false,
                    output: e.to_string(),
                    started_at: now,
                    finished_at: now,
                });
            }
        }
        info!(window = index, "window complete");
        outcomes
    }
}

/// One job: run the fetch, settle its progress bar, then signal the window exactly once.
async fn run_job(
    runner: Arc<dyn CommandRunner>,
    program: String,
    job: MaintenanceJob,
    bar: ProgressBar,
    tick: Duration,
    window_tx: mpsc::UnboundedSender<JobOutcome>,
) {
    let (done_tx, done_rx) = oneshot::channel();
    let ticker = tokio::spawn(progress::drive(bar, done_rx, tick));

    let started_at = Instant::now();
    info!(window = job.window, job = job.slot, dir = %job.path.display(), "fetch started");
    let path = job.path.clone();
    let result =
        tokio::task::spawn_blocking(move || runner.run(&program, &FETCH_ARGS, &path)).await;
    let (success, output) = match result {
        Ok(Ok(out)) => (out.success, out.output),
        Ok(Err(e)) => (false, e.to_string()),
        Err(e) => (false, e.to_string()),
    };

    if success {
        info!(dir = %job.path.display(), output = %output.trim_end(), "fetch succeeded");
    } else {
        warn!(dir = %job.path.display(), output = %output.trim_end(), "fetch failed");
    }

    let _ = done_tx.send(success);
    let _ = ticker.await;

    let _ = window_tx.send(JobOutcome {
        job,
        success,
        output,
        started_at,
        finished_at: Instant::now(),
    });
}
