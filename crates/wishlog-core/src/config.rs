use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoreConfig {
    pub fetch: FetchConfig,
    pub export: ExportConfig,
    pub settings: SettingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub page_size: u32,
    /// 每页请求之间的最小间隔
    pub page_delay_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            page_delay_ms: 200,
            timeout_secs: 15,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub path: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("settings.json"),
        }
    }
}

impl CoreConfig {
    /// 读取 JSON 配置；文件不存在时返回默认值
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file missing, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: CoreConfig = serde_json::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.fetch.page_size == 0 {
            return Err(CoreError::Config("fetch.page_size must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = CoreConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg.fetch.page_size, 20);
        assert_eq!(cfg.fetch.page_delay(), Duration::from_millis(200));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wishlog.json");
        std::fs::write(&path, r#"{"fetch":{"page_delay_ms":500},"export":{"output_dir":"out"}}"#)
            .unwrap();
        let cfg = CoreConfig::load(&path).unwrap();
        assert_eq!(cfg.fetch.page_delay_ms, 500);
        assert_eq!(cfg.fetch.page_size, 20);
        assert_eq!(cfg.export.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.settings.path, PathBuf::from("settings.json"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wishlog.json");
        std::fs::write(&path, r#"{"fetch":{"page_size":0}}"#).unwrap();
        assert!(matches!(CoreConfig::load(&path), Err(CoreError::Config(_))));
    }
}
