use crate::config::FetchConfig;
use crate::error::{CoreError, CoreResult};
use crate::gacha::analyze::analyze;
use crate::gacha::export::{export, ExportDocument};
use crate::gacha::fetch::GachaFetcher;
use crate::gacha::link::extract_base_url;
use crate::gacha::model::{GachaLogEntry, PoolStatistic};
use crate::gacha::transport::{GachaTransport, HttpTransport};
use tracing::{info, info_span, Instrument};

#[derive(Debug, Default)]
pub struct GachaReport {
    /// 与查询的卡池顺序一致
    pub statistics: Vec<PoolStatistic>,
    pub entries: Vec<(String, GachaLogEntry)>,
    /// 中途失败的卡池及原因，对应统计只基于部分数据
    pub truncated: Vec<(String, CoreError)>,
}

impl GachaReport {
    pub fn is_complete(&self) -> bool {
        self.truncated.is_empty()
    }

    pub fn uid(&self) -> Option<&str> {
        self.entries
            .first()
            .map(|(_, entry)| entry.uid.as_str())
            .filter(|uid| !uid.is_empty())
    }

    pub fn export(&self) -> ExportDocument {
        export(&self.entries)
    }
}

pub struct GachaService<T> {
    fetcher: GachaFetcher<T>,
}

impl GachaService<HttpTransport> {
    pub fn from_config(cfg: &FetchConfig) -> CoreResult<Self> {
        Ok(Self::new(GachaFetcher::new(HttpTransport::new(cfg)?, cfg)))
    }
}

impl<T: GachaTransport> GachaService<T> {
    pub fn new(fetcher: GachaFetcher<T>) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &GachaFetcher<T> {
        &self.fetcher
    }

    /// 链接格式错误时不发起任何请求；各卡池按顺序依次抓取
    pub async fn analyze_all(&self, link: &str, pools: &[String]) -> CoreResult<GachaReport> {
        let base = extract_base_url(link)?;
        let mut report = GachaReport::default();

        for pool in pools {
            let outcome = self
                .fetcher
                .fetch(&base, pool)
                .instrument(info_span!("pool", pool = %pool))
                .await;
            report.statistics.push(analyze(pool, &outcome.entries));
            report
                .entries
                .extend(outcome.entries.into_iter().map(|entry| (pool.clone(), entry)));
            if let Some(err) = outcome.truncated {
                report.truncated.push((pool.clone(), err));
            }
        }

        info!(
            pools = pools.len(),
            entries = report.entries.len(),
            truncated = report.truncated.len(),
            "gacha analysis finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gacha::testing::{entry, page, ScriptedTransport};

    const LINK: &str =
        "https://hk4e-api.mihoyo.com/event/gacha_info/api/getGachaLog?authkey=K&lang=zh-cn#/log";

    fn service(transport: ScriptedTransport) -> GachaService<ScriptedTransport> {
        let cfg = FetchConfig {
            page_delay_ms: 0,
            ..FetchConfig::default()
        };
        GachaService::new(GachaFetcher::new(transport, &cfg))
    }

    fn pools(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn malformed_link_makes_no_requests() {
        let svc = service(ScriptedTransport::new(vec![]));
        let err = svc
            .analyze_all("not a link", &pools(&["301"]))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::LinkFormat(_)));
        assert!(svc.fetcher().transport().requested().is_empty());
    }

    #[tokio::test]
    async fn pools_are_fetched_in_order() {
        let transport = ScriptedTransport::new(vec![
            Ok(page(vec![entry("6", "3"), entry("5", "5")])),
            Ok(page(vec![])),
            Ok(page(vec![entry("4", "3")])),
            Ok(page(vec![])),
        ]);
        let svc = service(transport);
        let report = svc.analyze_all(LINK, &pools(&["301", "302"])).await.unwrap();

        assert!(report.is_complete());
        assert_eq!(report.statistics.len(), 2);
        assert_eq!(report.statistics[0].pool_type_id, "301");
        assert_eq!(report.statistics[0].current_pity, 1);
        assert_eq!(report.statistics[1].total_count, 1);
        let tagged: Vec<(&str, &str)> = report
            .entries
            .iter()
            .map(|(pool, e)| (pool.as_str(), e.id.as_str()))
            .collect();
        assert_eq!(tagged, vec![("301", "5"), ("301", "6"), ("302", "4")]);
        assert_eq!(report.uid(), Some("100000001"));
    }

    #[tokio::test]
    async fn failing_pool_does_not_abort_the_run() {
        let transport = ScriptedTransport::new(vec![
            Ok(page(vec![entry("9", "3")])),
            Err(CoreError::Network("timeout".to_string())),
            Ok(page(vec![entry("2", "5")])),
            Ok(page(vec![])),
        ]);
        let report = service(transport)
            .analyze_all(LINK, &pools(&["301", "200"]))
            .await
            .unwrap();

        assert_eq!(report.truncated.len(), 1);
        assert_eq!(report.truncated[0].0, "301");
        assert_eq!(report.statistics[0].total_count, 1);
        assert_eq!(report.statistics[1].five_star_count, 1);
        assert_eq!(report.export().list.len(), 2);
    }
}
