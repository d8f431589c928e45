//! Translation table loader.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Flat key to text table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<String, String>);

impl Translations {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Translations
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Loader for translation tables from RON files.
pub struct TranslationLoader;

impl TranslationLoader {
    pub fn load(path: &Path) -> LoadResult<Translations> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse translations RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_flat_map() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("translations.ron");
        std::fs::write(
            &path,
            r#"{ "storage.fridge.name": "Fridge", "Strings\\BigCraftables:Chest_Name": "Chest" }"#,
        )
        .unwrap();

        let translations = TranslationLoader::load(&path).unwrap();
        assert_eq!(translations.len(), 2);
        assert_eq!(translations.get("storage.fridge.name"), Some("Fridge"));
        assert_eq!(translations.get("storage.default.name"), None);
    }
}
