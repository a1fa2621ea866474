/// 已知卡池代码及显示名，顺序即默认查询顺序
pub const KNOWN_POOLS: &[(&str, &str)] = &[
    ("301", "角色活动祈愿"),
    ("302", "武器活动祈愿"),
    ("200", "常驻祈愿"),
    ("100", "新手祈愿"),
    ("500", "集录祈愿"),
];

/// 未知代码原样返回
pub fn pool_name(pool_type_id: &str) -> &str {
    KNOWN_POOLS
        .iter()
        .find(|(code, _)| *code == pool_type_id)
        .map(|(_, name)| *name)
        .unwrap_or(pool_type_id)
}

pub fn default_pool_ids() -> Vec<String> {
    KNOWN_POOLS.iter().map(|(code, _)| code.to_string()).collect()
}
