//! UIGF 导出
//!
//! 所有卡池的记录合并为一个列表，缺失 id 的记录分配一个与真实 id 不相交的合成 id，
//! 最终按数值 id 升序排列。

use crate::error::CoreResult;
use crate::gacha::model::GachaLogEntry;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const EXPORT_LANG: &str = "zh-cn";
pub const EXPORT_APP: &str = "wishlog";
pub const EXPORT_APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const UIGF_VERSION: &str = "v2.3";

/// 合成 id 的起点，真实 id 更大时改为从最大真实 id 之后开始
pub const SYNTHETIC_ID_BASE: u64 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportInfo {
    pub uid: String,
    pub lang: String,
    pub export_time: String,
    pub export_app: String,
    pub export_app_version: String,
    pub uigf_version: String,
    pub export_timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub uigf_gacha_type: String,
    pub gacha_type: String,
    pub item_id: String,
    pub count: String,
    pub time: String,
    pub name: String,
    pub item_type: String,
    pub rank_type: String,
    pub id: String,
    pub uid: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub info: ExportInfo,
    pub list: Vec<ExportRecord>,
}

/// 单次导出内使用的递增 id 分配器
struct SyntheticIds {
    next: u64,
}

impl SyntheticIds {
    fn seeded_after(max_real: Option<u64>) -> Self {
        let next = match max_real {
            Some(max) if max >= SYNTHETIC_ID_BASE => max.saturating_add(1),
            _ => SYNTHETIC_ID_BASE,
        };
        Self { next }
    }

    fn assign(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

pub fn export(entries: &[(String, GachaLogEntry)]) -> ExportDocument {
    export_at(entries, Local::now())
}

pub fn export_at(entries: &[(String, GachaLogEntry)], now: DateTime<Local>) -> ExportDocument {
    let uid = entries
        .first()
        .map(|(_, entry)| entry.uid.clone())
        .unwrap_or_default();

    let info = ExportInfo {
        uid: uid.clone(),
        lang: EXPORT_LANG.to_string(),
        export_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        export_app: EXPORT_APP.to_string(),
        export_app_version: EXPORT_APP_VERSION.to_string(),
        uigf_version: UIGF_VERSION.to_string(),
        export_timestamp: now.timestamp(),
    };

    let max_real = entries.iter().filter_map(|(_, e)| e.record_id()).max();
    let mut ids = SyntheticIds::seeded_after(max_real);

    let mut keyed: Vec<(u64, ExportRecord)> = entries
        .iter()
        .map(|(pool_type_id, entry)| {
            let (key, id) = match entry.record_id() {
                Some(real) => (real, entry.id.trim().to_string()),
                None => {
                    let synthetic = ids.assign();
                    (synthetic, synthetic.to_string())
                }
            };
            (key, to_record(pool_type_id, entry, id, &uid))
        })
        .collect();
    keyed.sort_by_key(|(key, _)| *key);

    ExportDocument {
        info,
        list: keyed.into_iter().map(|(_, record)| record).collect(),
    }
}

fn to_record(pool_type_id: &str, entry: &GachaLogEntry, id: String, uid: &str) -> ExportRecord {
    let gacha_type = if entry.gacha_type.is_empty() {
        pool_type_id.to_string()
    } else {
        entry.gacha_type.clone()
    };
    ExportRecord {
        uigf_gacha_type: pool_type_id.to_string(),
        gacha_type,
        item_id: entry.item_id.clone(),
        count: entry.count.clone(),
        time: entry.time.clone(),
        name: entry.name.clone(),
        item_type: entry.item_type.clone(),
        rank_type: entry.rank_type.clone(),
        id,
        uid: uid.to_string(),
        lang: EXPORT_LANG.to_string(),
    }
}

pub fn export_file_name(uid: &str) -> String {
    if uid.is_empty() {
        "uigf.json".to_string()
    } else {
        format!("{uid}_uigf.json")
    }
}

/// 写入 `{dir}/{uid}_uigf.json`，目录不存在时创建
pub async fn write_export(doc: &ExportDocument, dir: &Path) -> CoreResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(&doc.info.uid));
    let data = serde_json::to_vec_pretty(doc)?;
    tokio::fs::write(&path, data).await?;
    info!(path = %path.display(), records = doc.list.len(), "uigf export written");
    Ok(path)
}
