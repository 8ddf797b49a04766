//! Per-job progress bars. The bar is an approximation: a timer advances it at a fixed
//! cadence and the job's one-shot completion event settles it. Completion always wins
//! over a pending tick, and the timer alone never fills the bar.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;

const TEMPLATE: &str = "{prefix:.bold} [{bar:40.cyan/blue}] {percent:>3}% {msg}";

/// Container for one window's bars; hidden when progress display is off.
pub fn window_progress(visible: bool) -> MultiProgress {
    if visible {
        MultiProgress::new()
    } else {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }
}

pub fn job_bar(multi: &MultiProgress, total: u64, label: String) -> ProgressBar {
    let style = ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bar = multi.add(ProgressBar::new(total));
    bar.set_style(style);
    bar.set_prefix(label);
    bar
}

/// Tick `bar` every `tick` until `done` fires. `true` finishes the bar; `false` (or a
/// dropped sender) resets it and leaves it abandoned. Returns the completion value.
pub async fn drive(bar: ProgressBar, mut done: oneshot::Receiver<bool>, tick: Duration) -> bool {
    let cap = bar.length().unwrap_or(0).saturating_sub(1);
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // interval's first tick is immediate
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;
            result = &mut done => {
                let succeeded = result.unwrap_or(false);
                if succeeded {
                    bar.finish_with_message("done");
                } else {
                    bar.set_position(0);
                    bar.abandon_with_message("failed");
                }
                return succeeded;
            }
            _ = ticker.tick() => {
                if bar.position() < cap {
                    bar.inc(1);
                }
            }
        }
    }
}
