use std::{collections::BTreeMap, fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LibraryError, Result};

pub const KEY_COLORS: &str = "ui.cli.colors";
pub const KEY_PAGING: &str = "ui.cli.paging";
pub const KEY_DOWNLOAD_DIR: &str = "downloads.directory";
pub const KEY_EPISODE_LIMIT: &str = "limit.episodes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Int(i) => write!(f, "{}", i),
            SettingValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl SettingValue {
    /// Parses `raw` into a value of the same kind as `self`.
    fn parse_like(&self, raw: &str) -> Option<SettingValue> {
        match self {
            SettingValue::Bool(_) => match raw.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(SettingValue::Bool(true)),
                "false" | "no" | "off" | "0" => Some(SettingValue::Bool(false)),
                _ => None,
            },
            SettingValue::Int(_) => raw.trim().parse().ok().map(SettingValue::Int),
            SettingValue::Text(_) => Some(SettingValue::Text(raw.to_string())),
        }
    }

    fn same_kind(&self, other: &SettingValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

fn defaults() -> BTreeMap<String, SettingValue> {
    BTreeMap::from([
        (KEY_COLORS.to_string(), SettingValue::Bool(true)),
        (KEY_PAGING.to_string(), SettingValue::Bool(true)),
        (KEY_DOWNLOAD_DIR.to_string(), SettingValue::Text(String::new())),
        (KEY_EPISODE_LIMIT.to_string(), SettingValue::Int(200)),
    ])
}

/// Typed key/value settings, persisted as JSON.
///
/// The set of keys is fixed by [`defaults`]; values read from disk are only
/// taken over when their key is known and their type matches the default.
pub struct SettingsManager {
    path: Option<PathBuf>,
    values: BTreeMap<String, SettingValue>,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SettingsManager {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            values: defaults(),
        }
    }

    pub async fn load(path: PathBuf) -> Result<Self> {
        let mut manager = Self::new(Some(path.clone()));
        if !path.is_file() {
            return Ok(manager);
        }

        let json = async_fs::read_to_string(&path).await?;
        let stored: BTreeMap<String, SettingValue> = serde_json::from_str(&json)?;
        for (key, value) in stored {
            match manager.values.get_mut(&key) {
                Some(current) if current.same_kind(&value) => *current = value,
                _ => tracing::warn!("ignoring stored setting {} = {}", key, value),
            }
        }
        Ok(manager)
    }

    pub async fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.values)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// Changes `key`, parsing `raw` according to the key's current type.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<SettingValue> {
        let current = self
            .values
            .get_mut(key)
            .ok_or_else(|| LibraryError::UnknownSetting {
                key: key.to_string(),
            })?;
        let value = current
            .parse_like(raw)
            .ok_or_else(|| LibraryError::InvalidSetting {
                key: key.to_string(),
                value: raw.to_string(),
            })?;
        *current = value.clone();
        Ok(value)
    }

    /// All keys containing `filter` (all keys without a filter), sorted.
    pub fn search(&self, filter: Option<&str>) -> Vec<(&str, &SettingValue)> {
        self.values
            .iter()
            .filter(|(key, _)| filter.is_none_or(|f| key.contains(f)))
            .map(|(key, value)| (key.as_str(), value))
            .collect()
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(SettingValue::Bool(true)))
    }

    pub fn int(&self, key: &str) -> i64 {
        match self.values.get(key) {
            Some(SettingValue::Int(i)) => *i,
            _ => 0,
        }
    }

    pub fn text(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(SettingValue::Text(s)) => s,
            _ => "",
        }
    }
}
