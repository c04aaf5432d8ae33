#[cfg(test)]
#[path = "local_storage_test.rs"]
mod tests;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde_json::Map;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Durable string key/value storage backed by a single JSON object on disk.
/// Keys written by other parts of the client are left untouched.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    pub file_path: PathBuf,
}

impl Default for LocalStorage {
    fn default() -> LocalStorage {
        return LocalStorage::new(PathBuf::from(Config::get(ConfigKey::StorageFile)));
    }
}

impl LocalStorage {
    pub fn new(file_path: PathBuf) -> LocalStorage {
        return LocalStorage { file_path };
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.file_path.exists() {
            return Ok(Map::new());
        }

        let contents = fs::read_to_string(&self.file_path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        let data: Map<String, Value> = serde_json::from_str(&contents)?;
        return Ok(data);
    }

    fn write_all(&self, data: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let text = serde_json::to_string_pretty(data)?;
        fs::write(&self.file_path, text)?;

        return Ok(());
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let data = self.read_all()?;
        let value = data
            .get(key)
            .and_then(|value| return value.as_str())
            .map(|value| return value.to_string());

        return Ok(value);
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.read_all()?;
        data.insert(key.to_string(), Value::String(value.to_string()));
        return self.write_all(&data);
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut data = self.read_all()?;
        if data.remove(key).is_none() {
            return Ok(());
        }

        return self.write_all(&data);
    }
}
