//! Moving tiles to their mapped names

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::mapper::Rename;
use crate::errors::{TileError, TileResult};

/// Move tiles to the filenames computed by the mapper
///
/// Both sides of each rename are resolved against `base_dir`, normally the
/// retile target directory. All renames are checked before any file is
/// moved: every source must exist, no destination may exist, and no two
/// tiles may map to the same destination. Missing parent directories of
/// the destinations are created.
///
/// # Returns
/// The destination paths, in input order
pub fn apply_renames(base_dir: &Path, renames: &[Rename]) -> TileResult<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut moves = Vec::with_capacity(renames.len());

    for (old, new) in renames {
        let source = base_dir.join(old);
        let destination = base_dir.join(new);

        if !source.is_file() {
            return Err(TileError::GenericError(format!("Tile {} does not exist", source.display())));
        }
        if destination.exists() {
            return Err(TileError::GenericError(format!(
                "Refusing to overwrite existing file {}", destination.display()
            )));
        }
        if !seen.insert(destination.clone()) {
            return Err(TileError::GenericError(format!(
                "More than one tile maps to {}", destination.display()
            )));
        }
        moves.push((source, destination));
    }

    let mut moved = Vec::with_capacity(moves.len());
    for (source, destination) in moves {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&source, &destination)?;
        moved.push(destination);
    }

    info!("Moved {} tiles under {}", moved.len(), base_dir.display());
    Ok(moved)
}
