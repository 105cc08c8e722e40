//! Substitution values for filename templates

use std::collections::BTreeMap;

use log::warn;

use super::dataset::DatasetAttributes;
use crate::gdal::TileFile;

/// Keys derived from the tile itself
pub mod keys {
    /// Minimum longitude of the tile (truncated)
    pub const X: &str = "x";
    /// Minimum latitude of the tile (truncated)
    pub const Y: &str = "y";
    /// Extension of the tile file
    pub const EXTENSION: &str = "extension";

    pub const TILE_KEYS: [&str; 3] = [X, Y, EXTENSION];
}

/// Flat key/value mapping a template is rendered against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        TemplateContext::default()
    }

    /// Context holding the dataset attributes
    ///
    /// Attributes named like a tile key (`x`, `y`, `extension`) are skipped;
    /// the tile value always wins.
    pub fn for_dataset(dataset: &DatasetAttributes) -> Self {
        let mut context = TemplateContext::new();
        for (key, value) in dataset.iter() {
            if keys::TILE_KEYS.contains(&key) {
                warn!("Dataset attribute {:?} is shadowed by the tile value", key);
                continue;
            }
            context.insert(key, value);
        }
        context
    }

    /// Copy of this context with the keys derived from one tile added
    pub fn with_tile(&self, tile: &TileFile, extension: &str) -> Self {
        let mut context = self.clone();
        context.insert(keys::X, &tile.minlon.to_string());
        context.insert(keys::Y, &tile.minlat.to_string());
        context.insert(keys::EXTENSION, extension);
        context
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

}
