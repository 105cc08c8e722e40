//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, but adds file output capabilities.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata};

use crate::gdal::TileFile;
use crate::naming::Rename;

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level written when used as the global logger
    level: Level,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new<P: AsRef<Path>>(log_file: P) -> io::Result<Self> {
        let file = File::create(log_file.as_ref())?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: Level::Info,
        })
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs the tiles produced by a run as a table
    ///
    /// # Arguments
    ///
    /// * `tiles` - Tiles in manifest order
    pub fn log_tile_files(&self, tiles: &[TileFile]) -> io::Result<()> {
        self.log(&format!("Tiles ({}):", tiles.len()))?;

        for tile in tiles {
            let message = format!(
                "  {}  lon [{}, {}]  lat [{}, {}]",
                tile.filename, tile.minlon, tile.maxlon, tile.minlat, tile.maxlat
            );
            self.log(&message)?;
        }

        Ok(())
    }

    /// Logs a rename mapping
    pub fn log_renames(&self, renames: &[Rename]) -> io::Result<()> {
        self.log(&format!("Renames ({}):", renames.len()))?;
        for (old, new) in renames {
            self.log(&format!("  {} -> {}", old, new))?;
        }
        Ok(())
    }

    /// Static method to initialize the global logger
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the global log file
    /// * `verbose` - Include debug records (external command lines)
    pub fn init_global_logger<P: AsRef<Path>>(log_file: P, verbose: bool) -> io::Result<()> {
        let mut global_logger = Logger::new(log_file)?;
        global_logger.level = if verbose { Level::Debug } else { Level::Info };
        let max_level = global_logger.level.to_level_filter();

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            // Logger was already set - this should not happen in normal usage
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(max_level);
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log(&message);

            // Also print to console
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_log_tile_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let logger = Logger::new(&path).unwrap();

        logger.log_tile_files(&[TileFile {
            filename: "s.v_1_1.nc".to_string(), minlon: 148, maxlon: 149.0, minlat: -35, maxlat: -34.0,
        }]).unwrap();
        logger.log_renames(&[("s.v_1_1.nc".to_string(), "148_-35.nc".to_string())]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Tiles (1):"));
        assert!(contents.contains("s.v_1_1.nc  lon [148, 149]  lat [-35, -34]"));
        assert!(contents.contains("s.v_1_1.nc -> 148_-35.nc"));
    }
}
