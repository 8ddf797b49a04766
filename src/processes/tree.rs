//! One-generation process tree anchored on top-level editor instances.

use crate::collectors::ProcessRecord;
use std::collections::{HashMap, HashSet};

/// A top-level editor process and the processes it spawned directly.
#[derive(Debug, Clone, PartialEq)]
pub struct RootGroup {
    pub root: ProcessRecord,
    pub children: Vec<ProcessRecord>,
}

/// Roots keep snapshot order; children keep snapshot order within their root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessTree {
    groups: Vec<RootGroup>,
}

impl ProcessTree {
    /// Build from a full snapshot.
    ///
    /// A root is a process named exactly `editor` whose parent is known and is not itself
    /// an editor process (that excludes embedded/child editor instances). Every other
    /// process whose parent PID is a root's PID is attached to that root. Grandchildren
    /// are not followed, and processes whose parent cannot be resolved are skipped.
    pub fn build(snapshot: &[ProcessRecord], editor: &str) -> Self {
        let by_pid: HashMap<u32, &ProcessRecord> = snapshot.iter().map(|p| (p.pid, p)).collect();

        let mut groups: Vec<RootGroup> = Vec::new();
        let mut root_index: HashMap<u32, usize> = HashMap::new();
        for process in snapshot {
            if process.name != editor || root_index.contains_key(&process.pid) {
                continue;
            }
            let Some(ppid) = process.ppid else {
                continue;
            };
            let parent_is_editor = by_pid.get(&ppid).is_some_and(|parent| parent.name == editor);
            if parent_is_editor {
                continue;
            }
            root_index.insert(process.pid, groups.len());
            groups.push(RootGroup {
                root: process.clone(),
                children: Vec::new(),
            });
        }

        let mut assigned: HashSet<u32> = HashSet::new();
        for process in snapshot {
            if root_index.contains_key(&process.pid) {
                continue;
            }
            let Some(ppid) = process.ppid else {
                continue;
            };
            if let Some(&idx) = root_index.get(&ppid) {
                if assigned.insert(process.pid) {
                    groups[idx].children.push(process.clone());
                }
            }
        }

        Self { groups }
    }

    pub fn groups(&self) -> &[RootGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.groups.iter().map(|g| &g.root)
    }

    /// Every matched child across all roots.
    pub fn children(&self) -> Vec<&ProcessRecord> {
        self.groups.iter().flat_map(|g| g.children.iter()).collect()
    }

    /// Roots with at least one matched child.
    pub fn parents(&self) -> Vec<&ProcessRecord> {
        self.groups
            .iter()
            .filter(|g| !g.children.is_empty())
            .map(|g| &g.root)
            .collect()
    }

    pub fn children_of(&self, root_pid: u32) -> Option<&[ProcessRecord]> {
        self.groups
            .iter()
            .find(|g| g.root.pid == root_pid)
            .map(|g| g.children.as_slice())
    }
}
