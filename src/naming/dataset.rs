//! Dataset attributes exposed to filename templates

use std::collections::BTreeMap;

use crate::errors::{TileError, TileResult};

/// Named attributes of the dataset the tiles belong to
///
/// Values are kept as the strings they are substituted as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetAttributes {
    attributes: BTreeMap<String, String>,
}

impl DatasetAttributes {
    pub fn new() -> Self {
        DatasetAttributes::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a `KEY=VALUE` assignment and add it
    pub fn insert_assignment(&mut self, assignment: &str) -> TileResult<()> {
        match assignment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                self.insert(key.trim(), value);
                Ok(())
            }
            _ => Err(TileError::ConfigError(format!("Attribute {:?} is not KEY=VALUE", assignment))),
        }
    }

    /// Read attributes from a TOML table
    ///
    /// Strings, integers, floats, booleans and datetimes are accepted; arrays
    /// and nested tables are not.
    pub fn from_toml_table(table: &toml::value::Table) -> TileResult<Self> {
        let mut dataset = DatasetAttributes::new();
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Datetime(d) => d.to_string(),
                _ => {
                    return Err(TileError::ConfigError(format!(
                        "Dataset attribute {:?} must be a scalar value", key
                    )))
                }
            };
            dataset.insert(key, &text);
        }
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment() {
        let mut dataset = DatasetAttributes::new();
        dataset.insert_assignment("ga_label=LS8_OLI_NBAR_2015").unwrap();
        dataset.insert_assignment("note=a=b").unwrap();
        assert_eq!(dataset.get("ga_label"), Some("LS8_OLI_NBAR_2015"));
        assert_eq!(dataset.get("note"), Some("a=b"));
        assert!(dataset.insert_assignment("novalue").is_err());
        assert!(dataset.insert_assignment("=x").is_err());
    }

    #[test]
    fn test_from_toml_table() {
        let value: toml::Value = "product_name = \"NBAR\"\nyear = 2015\n".parse().unwrap();
        let dataset = DatasetAttributes::from_toml_table(value.as_table().unwrap()).unwrap();
        assert_eq!(dataset.get("product_name"), Some("NBAR"));
        assert_eq!(dataset.get("year"), Some("2015"));

        let nested: toml::Value = "bands = [1, 2]".parse().unwrap();
        assert!(DatasetAttributes::from_toml_table(nested.as_table().unwrap()).is_err());
    }
}
