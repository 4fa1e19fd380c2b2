use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Key of the only flag kept between sessions.
pub const ONBOARDING_KEY: &str = "matplan.onboarding_shown";

const SHOWN: &str = "true";

/// String key/value store that outlives a session.
pub trait LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Entries kept as one JSON object on disk. The file and its parent
/// directory are created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Invalid storage file {}", self.path.display()))
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(entries)?)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}

/// Whether the first-run introduction has been shown.
pub struct Onboarding<S> {
    storage: S,
}

impl<S: LocalStorage> Onboarding<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Only the exact value "true" counts as shown.
    pub fn has_been_shown(&self) -> Result<bool> {
        Ok(self.storage.get(ONBOARDING_KEY)?.as_deref() == Some(SHOWN))
    }

    pub fn mark_shown(&mut self) -> Result<()> {
        self.storage.set(ONBOARDING_KEY, SHOWN)?;
        tracing::debug!("onboarding marked as shown");
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.storage.remove(ONBOARDING_KEY)
    }

    pub fn into_inner(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_onboarding() {
        let mut onboarding = Onboarding::new(MemoryStorage::default());
        assert!(!onboarding.has_been_shown().unwrap());

        onboarding.mark_shown().unwrap();
        assert!(onboarding.has_been_shown().unwrap());

        onboarding.reset().unwrap();
        assert!(!onboarding.has_been_shown().unwrap());
    }

    #[test]
    fn test_other_values_are_not_shown() {
        let mut storage = MemoryStorage::default();
        storage.set(ONBOARDING_KEY, "yes").unwrap();

        let onboarding = Onboarding::new(storage);
        assert!(!onboarding.has_been_shown().unwrap());
    }

    #[test]
    fn test_stores_literal_true() {
        let mut onboarding = Onboarding::new(MemoryStorage::default());
        onboarding.mark_shown().unwrap();

        let storage = onboarding.into_inner();
        assert_eq!(storage.get(ONBOARDING_KEY).unwrap().as_deref(), Some("true"));
    }
}
