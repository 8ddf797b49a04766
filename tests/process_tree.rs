//! Editor-rooted tree: root detection, one-generation grouping, exclusions.

use nvim_watcher::collectors::ProcessRecord;
use nvim_watcher::processes::ProcessTree;
use std::collections::HashSet;

fn proc(pid: u32, ppid: u32, name: &str) -> ProcessRecord {
    ProcessRecord::new(pid, Some(ppid), name)
}

fn pids<'a>(records: impl IntoIterator<Item = &'a ProcessRecord>) -> Vec<u32> {
    records.into_iter().map(|p| p.pid).collect()
}

#[test]
fn single_editor_with_two_children() {
    let snapshot = vec![
        proc(10, 1, "nvim"),
        proc(11, 10, "gopls"),
        proc(12, 10, "node"),
        proc(13, 1, "zsh"),
    ];
    let tree = ProcessTree::build(&snapshot, "nvim");

    assert_eq!(pids(tree.roots()), vec![10]);
    assert_eq!(pids(tree.children_of(10).unwrap()), vec![11, 12]);
    assert!(!pids(tree.children()).contains(&13));
}

#[test]
fn empty_snapshot_gives_empty_tree() {
    let tree = ProcessTree::build(&[], "nvim");
    assert!(tree.is_empty());
    assert!(tree.children().is_empty());
    assert!(tree.parents().is_empty());
}

#[test]
fn embedded_editor_is_a_child_not_a_root() {
    // nvim TUI (20) spawns `nvim --embed` (21), which spawns an LSP (22)
    let snapshot = vec![
        proc(1, 0, "launchd"),
        proc(20, 1, "nvim"),
        proc(21, 20, "nvim"),
        proc(22, 21, "lua-language-server"),
    ];
    let tree = ProcessTree::build(&snapshot, "nvim");

    assert_eq!(pids(tree.roots()), vec![20]);
    assert_eq!(pids(tree.children_of(20).unwrap()), vec![21]);
    // no grandchildren
    assert!(!pids(tree.children()).contains(&22));
}

#[test]
fn process_without_parent_is_skipped() {
    let snapshot = vec![
        ProcessRecord::new(30, None, "nvim"),
        proc(31, 30, "gopls"),
        proc(40, 1, "nvim"),
        ProcessRecord::new(41, None, "copilot"),
    ];
    let tree = ProcessTree::build(&snapshot, "nvim");

    // 30 has no resolvable parent, so it cannot be a root and 31 is orphaned
    assert_eq!(pids(tree.roots()), vec![40]);
    assert!(tree.children().is_empty());
}

#[test]
fn independent_editor_instances_get_their_own_groups() {
    let snapshot = vec![
        proc(10, 1, "nvim"),
        proc(11, 10, "gopls"),
        proc(20, 1, "nvim"),
        proc(21, 20, "rust-analyzer"),
        proc(22, 20, "copilot"),
        proc(30, 1, "nvim"),
    ];
    let tree = ProcessTree::build(&snapshot, "nvim");

    assert_eq!(pids(tree.roots()), vec![10, 20, 30]);
    assert_eq!(pids(tree.children_of(20).unwrap()), vec![21, 22]);
    // 30 has no children, so it is not a parent
    assert_eq!(pids(tree.parents()), vec![10, 20]);
}

#[test]
fn name_must_match_exactly() {
    let snapshot = vec![proc(10, 1, "nvim-qt"), proc(11, 10, "gopls")];
    let tree = ProcessTree::build(&snapshot, "nvim");
    assert!(tree.is_empty());
}

#[test]
fn children_always_point_at_a_root_and_appear_once() {
    // Deterministic pseudo-random tables: every third process is an editor.
    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as u32
    };

    for _ in 0..50 {
        let len = 1 + next() % 60;
        let snapshot: Vec<ProcessRecord> = (1..=len)
            .map(|pid| {
                let name = if pid % 3 == 0 { "nvim" } else { "worker" };
                let ppid = if next() % 5 == 0 { None } else { Some(next() % (len + 1)) };
                ProcessRecord::new(pid, ppid, name)
            })
            .collect();
        let tree = ProcessTree::build(&snapshot, "nvim");

        let root_pids: HashSet<u32> = tree.roots().map(|r| r.pid).collect();
        let mut seen = HashSet::new();
        for group in tree.groups() {
            for child in &group.children {
                assert_eq!(child.ppid, Some(group.root.pid));
                assert!(root_pids.contains(&child.ppid.unwrap()));
                assert!(seen.insert(child.pid), "pid {} under two roots", child.pid);
            }
        }
    }
}
