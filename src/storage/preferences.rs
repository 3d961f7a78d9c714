//! Durable string key-value storage for user preferences.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::errors::{DealVaultError, Result};

use super::write_atomic;

const PREFERENCES_FILE: &str = "preferences.json";

/// A small key-value store. Every failure is reported as
/// [`DealVaultError::PersistenceUnavailable`].
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// Preferences kept as one JSON object file.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `preferences.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path).map_err(|err| self.unavailable(err))?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&data).map_err(|err| self.unavailable(err))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(values).map_err(|err| self.unavailable(err))?;
        write_atomic(&self.path, &json).map_err(|err| self.unavailable(err))
    }

    fn unavailable(&self, err: impl std::fmt::Display) -> DealVaultError {
        DealVaultError::PersistenceUnavailable(format!("{}: {err}", self.path.display()))
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// Process-local preferences for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| DealVaultError::PersistenceUnavailable("preference lock poisoned".into()))
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferenceStore::in_dir(dir.path());
        assert_eq!(store.get("dealvault-theme").unwrap(), None);
        store.set("dealvault-theme", "dark").unwrap();

        let reopened = JsonPreferenceStore::in_dir(dir.path());
        assert_eq!(
            reopened.get("dealvault-theme").unwrap().as_deref(),
            Some("dark")
        );
        reopened.remove("dealvault-theme").unwrap();
        assert_eq!(store.get("dealvault-theme").unwrap(), None);
    }

    #[test]
    fn corrupt_file_reports_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferenceStore::in_dir(dir.path());
        fs::write(store.path(), "not json").unwrap();
        let err = store.get("dealvault-theme").unwrap_err();
        assert!(matches!(err, DealVaultError::PersistenceUnavailable(_)));
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryPreferenceStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
