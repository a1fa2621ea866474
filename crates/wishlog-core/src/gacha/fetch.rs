use crate::config::FetchConfig;
use crate::error::CoreError;
use crate::gacha::link::build_page_url;
use crate::gacha::model::GachaLogEntry;
use crate::gacha::transport::GachaTransport;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// 单个卡池的抓取结果
///
/// `entries` 始终有效；`truncated` 非空时表示中途出错，`entries` 只是已经拿到的部分
#[derive(Debug)]
pub struct FetchOutcome {
    pub pool_type_id: String,
    /// 按 id 从旧到新
    pub entries: Vec<GachaLogEntry>,
    pub requests: u32,
    pub truncated: Option<CoreError>,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        self.truncated.is_none()
    }
}

pub struct GachaFetcher<T> {
    transport: T,
    page_size: u32,
    page_delay: Duration,
}

impl<T: GachaTransport> GachaFetcher<T> {
    pub fn new(transport: T, cfg: &FetchConfig) -> Self {
        Self {
            transport,
            page_size: cfg.page_size.max(1),
            page_delay: cfg.page_delay(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 逐页拉取直到空页；传输或解析错误会提前结束并记录在 `truncated` 中
    pub async fn fetch(&self, base: &Url, pool_type_id: &str) -> FetchOutcome {
        let mut entries: Vec<GachaLogEntry> = Vec::new();
        let mut end_id = String::from("0");
        let mut page: u32 = 1;
        let mut requests: u32 = 0;
        let mut truncated = None;

        loop {
            let url = build_page_url(base, pool_type_id, page, self.page_size, &end_id);
            requests += 1;
            debug!(pool = pool_type_id, page, end_id = %end_id, "requesting gacha log page");

            let response = match self.transport.get_page(&url).await {
                Ok(response) => response,
                Err(err) => {
                    warn!(pool = pool_type_id, page, error = %err, "gacha log fetch stopped early");
                    truncated = Some(err);
                    break;
                }
            };

            let retcode = response.retcode;
            let message = response.message.clone();
            let items = response.into_entries();
            if items.is_empty() {
                if retcode != 0 {
                    warn!(pool = pool_type_id, page, retcode, api_message = %message, "gacha log api rejected request");
                    truncated = Some(CoreError::Api { retcode, message });
                }
                break;
            }

            let last_id = items.last().map(|e| e.id.clone()).unwrap_or_default();
            entries.extend(items);
            if last_id.is_empty() {
                let err = CoreError::Pagination(format!("page {page} ended with an entry without id"));
                warn!(pool = pool_type_id, page, error = %err, "gacha log fetch stopped early");
                truncated = Some(err);
                break;
            }
            end_id = last_id;
            page += 1;

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        entries.reverse();
        info!(
            pool = pool_type_id,
            count = entries.len(),
            requests,
            complete = truncated.is_none(),
            "gacha log fetched"
        );
        FetchOutcome {
            pool_type_id: pool_type_id.to_string(),
            entries,
            requests,
            truncated,
        }
    }
}
