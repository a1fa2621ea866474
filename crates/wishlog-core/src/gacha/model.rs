use serde::{Deserialize, Serialize};

/// 五星在 `rank_type` 中的取值
pub const RARE_TIER: u8 = 5;

/// 一次抽卡记录，字段名与接口返回保持一致，值全部是字符串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GachaLogEntry {
    pub uid: String,
    pub gacha_type: String,
    pub item_id: String,
    pub count: String,
    pub time: String,
    pub name: String,
    pub lang: String,
    pub item_type: String,
    pub rank_type: String,
    pub id: String,
}

impl GachaLogEntry {
    /// 无法解析的 `rank_type` 视为 0
    pub fn rarity(&self) -> u8 {
        self.rank_type.trim().parse().unwrap_or(0)
    }

    pub fn is_rare(&self) -> bool {
        self.rarity() == RARE_TIER
    }

    pub fn record_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GachaLogResponse {
    #[serde(default)]
    pub retcode: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<GachaLogPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GachaLogPage {
    #[serde(default)]
    pub list: Option<Vec<GachaLogEntry>>,
}

impl GachaLogResponse {
    /// 取出本页记录，`data` 或 `list` 缺失都当作空页
    pub fn into_entries(self) -> Vec<GachaLogEntry> {
        self.data.and_then(|d| d.list).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FiveStarRecord {
    pub name: String,
    pub pity_used: u32,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStatistic {
    pub pool_type_id: String,
    pub pool_name: String,
    pub total_count: usize,
    pub five_star_count: usize,
    pub current_pity: u32,
    /// 最近一次五星在前
    pub five_star_records: Vec<FiveStarRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_vendor_shape() {
        let body = r#"{
            "retcode": 0,
            "message": "OK",
            "data": {
                "page": "1",
                "size": "20",
                "list": [{
                    "uid": "100000001",
                    "gacha_type": "400",
                    "item_id": "",
                    "count": "1",
                    "time": "2024-03-01 12:00:00",
                    "name": "Keqing",
                    "lang": "zh-cn",
                    "item_type": "角色",
                    "rank_type": "5",
                    "id": "1709265600000000001"
                }]
            }
        }"#;
        let resp: GachaLogResponse = serde_json::from_str(body).unwrap();
        let entries = resp.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rarity(), 5);
        assert!(entries[0].is_rare());
        assert_eq!(entries[0].record_id(), Some(1_709_265_600_000_000_001));
    }

    #[test]
    fn null_data_is_an_empty_page() {
        let resp: GachaLogResponse =
            serde_json::from_str(r#"{"retcode":-101,"message":"authkey timeout","data":null}"#)
                .unwrap();
        assert_eq!(resp.retcode, -101);
        assert!(resp.into_entries().is_empty());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let entry: GachaLogEntry = serde_json::from_str(r#"{"name":"Amber"}"#).unwrap();
        assert_eq!(entry.id, "");
        assert_eq!(entry.rarity(), 0);
        assert_eq!(entry.record_id(), None);
    }
}
