//! Plugin directory maintenance: outdated detection with detached-HEAD recovery, and a
//! windowed concurrent fetch runner with per-job progress bars.

pub mod batch;
pub mod command;
pub mod outdated;
pub mod progress;

pub use batch::{partition, plan, BatchRunner, JobOutcome, MaintenanceJob, RunSummary, FETCH_ARGS};
pub use command::{CommandOutput, CommandRunner, SystemCommand};
pub use outdated::{OutdatedDetector, RepoStatus, ScanReport};
