use crate::config::FetchConfig;
use crate::error::CoreResult;
use crate::gacha::model::GachaLogResponse;
use async_trait::async_trait;
use url::Url;

/// 单页请求的传输层，测试中用脚本化实现替换
#[async_trait]
pub trait GachaTransport: Send + Sync {
    async fn get_page(&self, url: &Url) -> CoreResult<GachaLogResponse>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(cfg: &FetchConfig) -> CoreResult<Self> {
        let mut builder = reqwest::Client::builder().timeout(cfg.timeout());
        if let Some(agent) = &cfg.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GachaTransport for HttpTransport {
    async fn get_page(&self, url: &Url) -> CoreResult<GachaLogResponse> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
