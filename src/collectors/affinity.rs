//! CPU affinity lookup. Linux reads the scheduler mask; elsewhere the set is left empty.

#[cfg(target_os = "linux")]
use nix::sched::{sched_getaffinity, CpuSet};
#[cfg(target_os = "linux")]
use nix::unistd::Pid;

/// Logical CPUs `pid` may run on; empty when the mask cannot be read (e.g. the process
/// exited between listing and querying).
#[cfg(target_os = "linux")]
pub fn cpu_affinity(pid: u32) -> Vec<usize> {
    let Ok(raw) = i32::try_from(pid) else {
        return Vec::new();
    };
    match sched_getaffinity(Pid::from_raw(raw)) {
        Ok(set) => (0..CpuSet::count())
            .filter(|&cpu| set.is_set(cpu).unwrap_or(false))
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(not(target_os = "linux"))]
pub fn cpu_affinity(_pid: u32) -> Vec<usize> {
    Vec::new()
}
