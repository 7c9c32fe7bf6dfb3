use std::collections::HashMap;

use super::{models::RestTypeConfig, CatalogError};

/// Named rest durations available to a training service.
///
/// Names are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RestTypeCatalog {
    entries: HashMap<String, RestTypeConfig>,
}

impl RestTypeCatalog {
    pub fn new(configs: impl IntoIterator<Item = RestTypeConfig>) -> Result<Self, CatalogError> {
        let mut entries = HashMap::new();
        for config in configs {
            if config.default_duration_secs == 0 {
                return Err(CatalogError::ZeroDuration(config.name));
            }
            let key = config.name.to_lowercase();
            if entries.contains_key(&key) {
                return Err(CatalogError::DuplicateRestType(config.name));
            }
            entries.insert(key, config);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&RestTypeConfig> {
        self.entries.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &RestTypeConfig> {
        let mut configs: Vec<_> = self.entries.values().collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));
        configs.into_iter()
    }
}
