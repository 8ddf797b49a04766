//! Process relationship discovery and ranking: allow-list filter, editor-rooted tree,
//! top-N ranking, and the view selection that ties them to the display state.

pub mod filter;
pub mod rank;
pub mod tree;

pub use filter::RelevantSetFilter;
pub use rank::{rank, rows_for_height, SortKey};
pub use tree::{ProcessTree, RootGroup};

use crate::collectors::ProcessRecord;
use crate::config::WatcherConfig;
use crate::display::{DisplaySettings, ViewMode};
use std::collections::HashSet;

/// Turns a raw snapshot into the ranked rows for one cycle.
#[derive(Debug, Clone)]
pub struct ViewSelector {
    editor: String,
    filter: RelevantSetFilter,
}

impl ViewSelector {
    pub fn new(editor: impl Into<String>, filter: RelevantSetFilter) -> Self {
        Self {
            editor: editor.into(),
            filter,
        }
    }

    pub fn from_config(config: &WatcherConfig) -> Self {
        Self::new(
            config.editor_executable.clone(),
            RelevantSetFilter::from_config(&config.helpers),
        )
    }

    /// Process group for `mode`, unranked.
    ///
    /// Children: direct children of every root, then allow-listed helpers that are not
    /// roots and were not already included. Parents: roots with at least one child.
    pub fn group(&self, snapshot: &[ProcessRecord], mode: ViewMode) -> Vec<ProcessRecord> {
        let tree = ProcessTree::build(snapshot, &self.editor);
        match mode {
            ViewMode::Parents => tree.parents().into_iter().cloned().collect(),
            ViewMode::Children => {
                let roots: HashSet<u32> = tree.roots().map(|r| r.pid).collect();
                let mut seen: HashSet<u32> = HashSet::new();
                let mut out = Vec::new();
                for child in tree.children() {
                    if seen.insert(child.pid) {
                        out.push(child.clone());
                    }
                }
                for helper in self.filter.filter(snapshot) {
                    if helper.name == self.editor || roots.contains(&helper.pid) {
                        continue;
                    }
                    if seen.insert(helper.pid) {
                        out.push(helper.clone());
                    }
                }
                out
            }
        }
    }

    /// Ranked rows for the given display settings.
    pub fn select(
        &self,
        snapshot: &[ProcessRecord],
        settings: DisplaySettings,
        rows: usize,
    ) -> Vec<ProcessRecord> {
        let group = self.group(snapshot, settings.view);
        rank(&group, settings.sort, rows)
    }
}
