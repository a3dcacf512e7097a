use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::foundation::error::{MotionError, MotionResult};

/// Durable client-side key/value storage.
pub trait Storage {
    fn get(&self, key: &str) -> MotionResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> MotionResult<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> MotionResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> MotionResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A flat JSON object on disk. Missing files read as empty.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> MotionResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) if s.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(s) => serde_json::from_str(&s).map_err(|e| {
                MotionError::storage(format!("parse '{}': {e}", self.path.display()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(MotionError::storage(format!(
                "read '{}': {e}",
                self.path.display()
            ))),
        }
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> MotionResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> MotionResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                MotionError::storage(format!("create dir '{}': {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json)
            .map_err(|e| MotionError::storage(format!("write '{}': {e}", self.path.display())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/platform/storage.rs"]
mod tests;
