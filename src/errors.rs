//! Custom error types for the tiling pipeline

use std::fmt;
use std::io;

/// Errors raised while stacking, reprojecting, retiling or naming tiles
#[derive(Debug)]
pub enum TileError {
    /// I/O error
    IoError(io::Error),
    /// Malformed or insufficient input geometry
    InputError(String),
    /// An external tool exited unsuccessfully
    ExternalToolError {
        /// Full command line that was run
        command: String,
        /// Exit code, `None` if the process was killed or never started
        exit_code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },
    /// A manifest line could not be parsed
    ManifestParseError {
        /// 1-based line number in the manifest
        line_number: usize,
        /// The offending line
        line: String,
        /// What was wrong with it
        reason: String,
    },
    /// Tile filename is not `base.middle.extension`
    FilenameFormatError(String),
    /// Template references a key with no value
    MissingAttributeError(String),
    /// Template string is malformed
    TemplateSyntaxError(String),
    /// Invalid configuration value or unknown option
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::IoError(e) => write!(f, "I/O error: {}", e),
            TileError::InputError(msg) => write!(f, "Input error: {}", msg),
            TileError::ExternalToolError { command, exit_code, stderr } => {
                match exit_code {
                    Some(code) => write!(f, "External tool failed with exit code {}: {}", code, command)?,
                    None => write!(f, "External tool terminated abnormally: {}", command)?,
                }
                if !stderr.trim().is_empty() {
                    write!(f, "\n{}", stderr.trim_end())?;
                }
                Ok(())
            }
            TileError::ManifestParseError { line_number, line, reason } => {
                write!(f, "Manifest line {} ({:?}): {}", line_number, line, reason)
            }
            TileError::FilenameFormatError(name) => {
                write!(f, "Tile filename {:?} is not of the form base.middle.extension", name)
            }
            TileError::MissingAttributeError(key) => {
                write!(f, "Filename template references unknown attribute: {}", key)
            }
            TileError::TemplateSyntaxError(msg) => write!(f, "Invalid filename template: {}", msg),
            TileError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TileError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for TileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TileError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TileError {
    fn from(error: io::Error) -> Self {
        TileError::IoError(error)
    }
}

impl From<String> for TileError {
    fn from(msg: String) -> Self {
        TileError::GenericError(msg)
    }
}

/// Result type for tiling operations
pub type TileResult<T> = Result<T, TileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_tool_error_mentions_command_and_code() {
        let err = TileError::ExternalToolError {
            command: "gdalwarp -t_srs EPSG:4326 in.vrt out.vrt".to_string(),
            exit_code: Some(1),
            stderr: "ERROR 1: bad srs\n".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("exit code 1"));
        assert!(text.contains("gdalwarp -t_srs EPSG:4326"));
        assert!(text.ends_with("ERROR 1: bad srs"));
    }

    #[test]
    fn test_manifest_error_mentions_line() {
        let err = TileError::ManifestParseError {
            line_number: 3,
            line: "a.nc;1;2".to_string(),
            reason: "expected 5 fields, found 3".to_string(),
        };
        assert!(err.to_string().contains("line 3"));
    }
}
