//! Periodic supervisor: a fine cadence that collects, renders and logs, and a coarse
//! cadence that collects and logs only. Both run concurrently until a quit signal.

use crate::collectors::{ProcessRecord, ProcessSource};
use crate::config::SupervisorConfig;
use crate::display::DisplayState;
use crate::error::WatchError;
use crate::logging::log_process;
use crate::processes::{rows_for_height, ViewSelector};
use crate::render::chart::{CHROME_LINES, SERIES};
use crate::render::{Chart, ChartRenderer};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Returns (columns, rows) of the output terminal.
pub type GeometryFn = fn() -> Result<(u16, u16), WatchError>;

pub struct Supervisor {
    config: SupervisorConfig,
    selector: ViewSelector,
    state: Arc<DisplayState>,
    /// Source for the refresh cadence
    live: Arc<dyn ProcessSource>,
    /// Source for the maintenance cadence; kept separate so CPU deltas stay per-cadence
    audit: Arc<dyn ProcessSource>,
    renderer: Arc<dyn ChartRenderer>,
    geometry: GeometryFn,
}

impl Supervisor {
    pub fn new(
        config: SupervisorConfig,
        selector: ViewSelector,
        state: Arc<DisplayState>,
        live: Arc<dyn ProcessSource>,
        audit: Arc<dyn ProcessSource>,
        renderer: Arc<dyn ChartRenderer>,
        geometry: GeometryFn,
    ) -> Self {
        Self {
            config,
            selector,
            state,
            live,
            audit,
            renderer,
            geometry,
        }
    }

    pub fn state(&self) -> &Arc<DisplayState> {
        &self.state
    }

    async fn snapshot(source: &Arc<dyn ProcessSource>) -> Result<Vec<ProcessRecord>, WatchError> {
        let source = Arc::clone(source);
        let snapshot = tokio::task::spawn_blocking(move || source.snapshot()).await??;
        Ok(snapshot)
    }

    /// One fine-cadence cycle. Returns the rows that were drawn.
    pub async fn refresh_once(&self) -> Result<Vec<ProcessRecord>, WatchError> {
        let (width, height) = (self.geometry)()?;
        let rows = rows_for_height(height, CHROME_LINES, SERIES.len());
        let snapshot = Self::snapshot(&self.live).await?;
        let settings = self.state.settings();
        let selected = self.selector.select(&snapshot, settings, rows);

        let chart = Chart::from_processes(&selected, settings, width);
        if let Err(e) = self.renderer.draw(&chart) {
            warn!(error = %e, "chart draw failed");
        }
        for process in &selected {
            log_process("refresh", process);
        }
        Ok(selected)
    }

    /// One coarse-cadence cycle: same selection, log sink only.
    pub async fn log_once(&self) -> Result<Vec<ProcessRecord>, WatchError> {
        let snapshot = Self::snapshot(&self.audit).await?;
        let settings = self.state.settings();
        let selected = self.selector.select(&snapshot, settings, self.config.log_rows);
        info!(
            count = selected.len(),
            sort = %settings.sort,
            view = %settings.view,
            "maintenance snapshot"
        );
        for process in &selected {
            log_process("maintenance", process);
        }
        Ok(selected)
    }

    async fn refresh_loop(&self, start: Instant) -> Result<(), WatchError> {
        let mut ticker = interval_at(start, self.config.refresh_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut cycle: u64 = 0;
        loop {
            ticker.tick().await;
            cycle += 1;
            match self.refresh_once().await {
                Ok(rows) => debug!(cycle, rows = rows.len(), "refresh cycle"),
                // A missing snapshot only costs this cycle
                Err(WatchError::Snapshot(e)) => warn!(cycle, error = %e, "refresh cycle skipped"),
                Err(e) => return Err(e),
            }
        }
    }

    async fn maintenance_loop(&self, start: Instant) {
        let period = self.config.maintenance_interval();
        let mut ticker = interval_at(start + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval_secs = period.as_secs(), "maintenance cadence scheduled");
        loop {
            ticker.tick().await;
            if let Err(e) = self.log_once().await {
                warn!(error = %e, "maintenance cycle failed");
            }
        }
    }

    /// Run both cadences until `quit` fires (or its senders are gone). A terminal failure
    /// in the refresh cadence ends the run with that error.
    pub async fn run(self, mut quit: UnboundedReceiver<()>) -> Result<(), WatchError> {
        let this = Arc::new(self);
        let start = Instant::now();

        let audit = {
            let this = Arc::clone(&this);
            tokio::spawn(async move { this.maintenance_loop(start).await })
        };

        let result = tokio::select! {
            _ = quit.recv() => {
                info!("quit requested");
                Ok(())
            }
            r = this.refresh_loop(start) => r,
        };
        audit.abort();
        result
    }
}
