//! Ranking benchmark: snapshot → editor tree → ranked rows (one refresh cycle's CPU work).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nvim_watcher::collectors::ProcessRecord;
use nvim_watcher::config::HelperConfig;
use nvim_watcher::display::{DisplaySettings, ViewMode};
use nvim_watcher::processes::{rank, ProcessTree, RelevantSetFilter, SortKey, ViewSelector};

/// `n` processes: every 50th is an editor, the rest hang off the nearest editor or init.
fn make_snapshot(n: u32) -> Vec<ProcessRecord> {
    (2..n + 2)
        .map(|pid| {
            let name = match pid % 50 {
                0 => "nvim".to_string(),
                7 => "gopls".to_string(),
                _ => format!("proc_{}", pid),
            };
            let ppid = if pid % 50 == 0 { 1 } else { (pid / 50) * 50 };
            ProcessRecord::new(pid, Some(ppid.max(1)), name)
                .with_exe(format!("/usr/bin/proc_{}", pid))
                .with_usage((pid % 97) as f32, (pid % 13) as f32)
        })
        .collect()
}

fn bench_tree_build(c: &mut Criterion) {
    let snapshot = make_snapshot(2000);
    c.bench_function("tree_build_2000", |b| {
        b.iter(|| ProcessTree::build(black_box(&snapshot), "nvim"))
    });
}

fn bench_select(c: &mut Criterion) {
    let selector = ViewSelector::new("nvim", RelevantSetFilter::from_config(&HelperConfig::default()));

    let mut g = c.benchmark_group("select_by_size");
    for n in [200u32, 1000, 5000] {
        let snapshot = make_snapshot(n);
        for view in [ViewMode::Children, ViewMode::Parents] {
            let settings = DisplaySettings {
                sort: SortKey::Cpu,
                view,
            };
            g.bench_function(format!("{}_{}", view, n).as_str(), |b| {
                b.iter(|| selector.select(black_box(&snapshot), settings, 20))
            });
        }
    }
    g.finish();
}

fn bench_rank(c: &mut Criterion) {
    let snapshot = make_snapshot(5000);
    c.bench_function("rank_memory_5000", |b| {
        b.iter(|| rank(black_box(&snapshot), SortKey::Memory, 20))
    });
}

criterion_group!(benches, bench_tree_build, bench_select, bench_rank);
criterion_main!(benches);
