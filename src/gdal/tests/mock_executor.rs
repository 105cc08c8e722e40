use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::errors::{TileError, TileResult};
use crate::gdal::executor::{command_line, CommandExecutor};

/// Executor that records invocations instead of running them
///
/// `gdalinfo` answers with canned JSON, `gdal_retile.py` writes the
/// configured manifest into its `-targetDir`, and any program can be made
/// to fail.
#[derive(Default)]
pub struct RecordingExecutor {
    pub calls: RefCell<Vec<(String, Vec<String>)>>,
    pub responses: HashMap<String, String>,
    pub manifest: Option<String>,
    pub failing: Option<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        RecordingExecutor::default()
    }

    pub fn with_response(mut self, program: &str, stdout: &str) -> Self {
        self.responses.insert(program.to_string(), stdout.to_string());
        self
    }

    pub fn with_manifest(mut self, manifest: &str) -> Self {
        self.manifest = Some(manifest.to_string());
        self
    }

    pub fn failing_on(mut self, program: &str) -> Self {
        self.failing = Some(program.to_string());
        self
    }

    /// Programs in call order
    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(program, _)| program.clone()).collect()
    }

    pub fn args_of(&self, program: &str) -> Vec<String> {
        self.calls.borrow().iter()
            .find(|(p, _)| p == program)
            .map(|(_, args)| args.clone())
            .unwrap_or_default()
    }

    fn flag_value(args: &[String], flag: &str) -> Option<String> {
        args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1)).cloned()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, program: &str, args: &[String]) -> TileResult<String> {
        self.calls.borrow_mut().push((program.to_string(), args.to_vec()));

        if self.failing.as_deref() == Some(program) {
            return Err(TileError::ExternalToolError {
                command: command_line(program, args),
                exit_code: Some(1),
                stderr: "mock failure".to_string(),
            });
        }

        if program == "gdal_retile.py" {
            if let Some(manifest) = &self.manifest {
                let dir = Self::flag_value(args, "-targetDir").unwrap_or_else(|| ".".to_string());
                let name = Self::flag_value(args, "-csv").unwrap_or_else(|| "tiles.csv".to_string());
                fs::write(PathBuf::from(dir).join(name), manifest)?;
            }
        }

        Ok(self.responses.get(program).cloned().unwrap_or_default())
    }
}
