use crate::error::CoreResult;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const GACHA_LINK_KEY: &str = "gacha_link";

/// 扁平的 JSON 键值存储，只用来记住上次使用的抽卡链接
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }

    pub fn last_gacha_link(&self) -> CoreResult<Option<String>> {
        self.get(GACHA_LINK_KEY)
    }

    pub fn remember_gacha_link(&self, link: &str) -> CoreResult<()> {
        self.set(GACHA_LINK_KEY, link)
    }

    fn read_all(&self) -> CoreResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.last_gacha_link().unwrap(), None);
    }

    #[test]
    fn set_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));
        store.set("theme", "dark").unwrap();
        store.remember_gacha_link("https://example.com/api/getGachaLog?authkey=a").unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(
            store.last_gacha_link().unwrap().as_deref(),
            Some("https://example.com/api/getGachaLog?authkey=a")
        );
    }
}
