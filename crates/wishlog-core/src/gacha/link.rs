use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// 翻页时保留的鉴权与区域参数，其余参数每页重建
pub const PRESERVED_PARAMS: &[&str] = &["authkey", "authkey_ver", "sign_type", "region", "lang"];

static LINK_PATTERN: OnceLock<Regex> = OnceLock::new();

fn link_pattern() -> &'static Regex {
    LINK_PATTERN.get_or_init(|| {
        Regex::new(r"https://[A-Za-z0-9.\-]+(?::\d+)?(?:/[^\s?#]*)?/getGachaLog\?[^\s#]+")
            .expect("gacha link pattern")
    })
}

/// 从用户粘贴的文本中提取抽卡记录链接，`#` 之后的片段会被丢弃
pub fn extract_base_url(link: &str) -> CoreResult<Url> {
    let found = link_pattern()
        .find(link.trim())
        .ok_or_else(|| CoreError::LinkFormat("no getGachaLog link found".to_string()))?;
    let url = Url::parse(found.as_str())
        .map_err(|e| CoreError::LinkFormat(format!("invalid url: {e}")))?;
    if !url.query_pairs().any(|(key, value)| key == "authkey" && !value.is_empty()) {
        return Err(CoreError::LinkFormat("authkey is missing".to_string()));
    }
    Ok(url)
}

/// 构造单页请求地址：保留参数按原顺序在前，分页参数在后
pub fn build_page_url(
    base: &Url,
    pool_type_id: &str,
    page: u32,
    size: u32,
    end_id: &str,
) -> Url {
    let mut url = base.clone();
    url.set_fragment(None);
    let preserved: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| PRESERVED_PARAMS.iter().any(|name| **name == **key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in &preserved {
            query.append_pair(key, value);
        }
        query
            .append_pair("gacha_type", pool_type_id)
            .append_pair("page", &page.to_string())
            .append_pair("size", &size.to_string())
            .append_pair("end_id", end_id);
    }
    url
}
