//! Live display state shared between the key listener (writer) and the render cycle
//! (reader). Both fields sit behind one mutex so a reader always sees a consistent pair.

use crate::processes::SortKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Children,
    Parents,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Children => ViewMode::Parents,
            ViewMode::Parents => ViewMode::Children,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Children => "children",
            ViewMode::Parents => "parents",
        })
    }
}

/// Point-in-time copy of the display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub sort: SortKey,
    pub view: ViewMode,
}

/// Starts at {cpu, children}; lives as long as the program. No reset.
#[derive(Debug, Default)]
pub struct DisplayState {
    inner: Mutex<DisplaySettings>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    // The guarded value is plain Copy data, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, DisplaySettings> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn current_sort_key(&self) -> SortKey {
        self.lock().sort
    }

    pub fn current_view_mode(&self) -> ViewMode {
        self.lock().view
    }

    pub fn settings(&self) -> DisplaySettings {
        *self.lock()
    }

    /// Flip cpu <-> memory; returns the new key.
    pub fn toggle_sort(&self) -> SortKey {
        let mut s = self.lock();
        s.sort = s.sort.toggled();
        s.sort
    }

    /// Flip children <-> parents; returns the new mode.
    pub fn toggle_view(&self) -> ViewMode {
        let mut s = self.lock();
        s.view = s.view.toggled();
        s.view
    }
}
