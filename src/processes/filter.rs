//! Allow-list matching for editor helpers (AI assistants, language servers).

use crate::collectors::ProcessRecord;
use crate::config::HelperConfig;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct RelevantSetFilter {
    exact_names: HashSet<String>,
    /// Lowercased once so matching stays case-insensitive
    substring_patterns: Vec<String>,
}

impl RelevantSetFilter {
    pub fn new<I, J, S, T>(exact_names: I, substring_patterns: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: AsRef<str>,
    {
        Self {
            exact_names: exact_names.into_iter().map(Into::into).collect(),
            substring_patterns: substring_patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &HelperConfig) -> Self {
        Self::new(config.exact_names.iter().cloned(), &config.substring_patterns)
    }

    /// Exact base-name match, or a case-insensitive substring of the full path.
    /// A process without a readable path can still match by name.
    pub fn matches(&self, process: &ProcessRecord) -> bool {
        if self.exact_names.contains(&process.name) {
            return true;
        }
        let Some(exe) = process.exe.as_deref() else {
            return false;
        };
        let exe = exe.to_string_lossy().to_lowercase();
        self.substring_patterns.iter().any(|p| exe.contains(p.as_str()))
    }

    /// Matching processes in snapshot order, each PID at most once.
    pub fn filter<'a>(&self, snapshot: &'a [ProcessRecord]) -> Vec<&'a ProcessRecord> {
        let mut seen = HashSet::new();
        snapshot
            .iter()
            .filter(|p| self.matches(p))
            .filter(|p| seen.insert(p.pid))
            .collect()
    }
}
