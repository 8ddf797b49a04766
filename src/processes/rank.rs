//! Top-N ranking by CPU or memory share.

use crate::collectors::ProcessRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Cpu,
    Memory,
}

impl SortKey {
    pub fn toggled(self) -> Self {
        match self {
            SortKey::Cpu => SortKey::Memory,
            SortKey::Memory => SortKey::Cpu,
        }
    }

    pub fn metric(self, process: &ProcessRecord) -> f32 {
        match self {
            SortKey::Cpu => process.cpu_percent,
            SortKey::Memory => process.memory_percent,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Cpu => "cpu",
            SortKey::Memory => "memory",
        })
    }
}

/// Descending by `key`, stable on ties, truncated to at most `n` entries.
/// Fewer than `n` inputs returns all of them.
pub fn rank<P>(processes: &[P], key: SortKey, n: usize) -> Vec<ProcessRecord>
where
    P: std::borrow::Borrow<ProcessRecord>,
{
    let mut ranked: Vec<&ProcessRecord> = processes.iter().map(|p| p.borrow()).collect();
    ranked.sort_by(|a, b| descending(key.metric(a), key.metric(b)));
    ranked.truncate(n);
    ranked.into_iter().cloned().collect()
}

fn descending(a: f32, b: f32) -> Ordering {
    b.total_cmp(&a)
}

/// Chart rows that fit a terminal `height` once `reserved` lines (title, footer) are
/// taken and each row spans `lines_per_row` lines. Always at least one.
pub fn rows_for_height(height: u16, reserved: u16, lines_per_row: usize) -> usize {
    let free = usize::from(height.saturating_sub(reserved));
    (free / lines_per_row.max(1)).max(1)
}
