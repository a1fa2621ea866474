use crate::gacha::model::{FiveStarRecord, GachaLogEntry, PoolStatistic};
use crate::gacha::pool::pool_name;

/// 计算单个卡池的保底统计，`entries` 必须按时间从旧到新
pub fn analyze(pool_type_id: &str, entries: &[GachaLogEntry]) -> PoolStatistic {
    let mut pity: u32 = 0;
    let mut records = Vec::new();

    for entry in entries {
        pity += 1;
        if entry.is_rare() {
            records.push(FiveStarRecord {
                name: entry.name.clone(),
                pity_used: pity,
                time: entry.time.clone(),
            });
            pity = 0;
        }
    }

    let five_star_count = records.len();
    records.reverse();

    PoolStatistic {
        pool_type_id: pool_type_id.to_string(),
        pool_name: pool_name(pool_type_id).to_string(),
        total_count: entries.len(),
        five_star_count,
        current_pity: pity,
        five_star_records: records,
    }
}
