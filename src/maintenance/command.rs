//! External command execution. Callers classify results by inspecting the combined
//! output text, so that is what a run returns alongside a success flag.

use crate::logging::log_command;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// stdout followed by stderr
    pub output: String,
}

impl CommandOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// Runs one program to completion in a working directory. Blocking.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> io::Result<CommandOutput>;
}

/// Spawns real child processes.
#[derive(Debug, Default, Clone)]
pub struct SystemCommand;

impl CommandRunner for SystemCommand {
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> io::Result<CommandOutput> {
        log_command(program, args, dir);
        let out = Command::new(program).args(args).current_dir(dir).output()?;
        let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&out.stderr));
        info!(
            command = program,
            dir = %dir.display(),
            success = out.status.success(),
            output = %output.trim_end(),
            "command finished"
        );
        Ok(CommandOutput {
            success: out.status.success(),
            output,
        })
    }
}
