//! External process execution
//!
//! Every pipeline stage builds an argument list and hands it to a
//! [`CommandExecutor`]. The real implementation spawns the process; tests
//! substitute a recording executor.

use std::process::Command;

use log::{debug, error};

use crate::errors::{TileError, TileResult};

/// Runs an external program to completion
pub trait CommandExecutor {
    /// Run `program` with `args` and wait for it to exit
    ///
    /// # Returns
    /// Captured standard output, or `ExternalToolError` on a non-zero exit
    fn execute(&self, program: &str, args: &[String]) -> TileResult<String>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn execute(&self, program: &str, args: &[String]) -> TileResult<String> {
        (**self).execute(program, args)
    }
}

/// Render a program and its arguments as a single command line
pub fn command_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push_str(&format!("{:?}", arg));
        } else {
            line.push_str(arg);
        }
    }
    line
}

/// Executor that spawns real processes and blocks until they exit
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        ProcessExecutor
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, program: &str, args: &[String]) -> TileResult<String> {
        let line = command_line(program, args);
        debug!("Running: {}", line);

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| TileError::ExternalToolError {
                command: line.clone(),
                exit_code: None,
                stderr: format!("failed to start {}: {}", program, e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            error!("Command failed ({}): {}", output.status, line);
            return Err(TileError::ExternalToolError {
                command: line,
                exit_code: output.status.code(),
                stderr,
            });
        }

        if !stderr.trim().is_empty() {
            debug!("{} stderr: {}", program, stderr.trim_end());
        }
        Ok(stdout)
    }
}
