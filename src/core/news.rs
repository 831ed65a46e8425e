use crate::core::feed::extract_articles;
use crate::core::fallback::fallback_articles;
use crate::core::{Adapter, ApiResponse, CachePolicy, QueryParams};
use crate::utils::error::{ProxyError, Result};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;

pub struct NewsAdapter {
    client: Client,
    endpoint: String,
    user_agent: String,
}

impl NewsAdapter {
    pub fn new(client: Client, endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl Adapter for NewsAdapter {
    type Input = ();
    type Upstream = String;

    fn name(&self) -> &'static str {
        "news"
    }

    fn validate(&self, _query: &QueryParams) -> Result<()> {
        Ok(())
    }

    async fn fetch(&self, _input: ()) -> Result<String> {
        tracing::debug!("Fetching news feed from: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;
        tracing::debug!("News feed response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ProxyError::UpstreamStatus {
                service: "notícias",
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn map(&self, xml: String) -> Result<ApiResponse> {
        let articles = extract_articles(&xml);
        if articles.is_empty() {
            return Err(ProxyError::internal("Nenhuma notícia encontrada no feed."));
        }

        tracing::debug!("Extracted {} articles from news feed", articles.len());
        Ok(ApiResponse::json(200, &articles).with_cache(CachePolicy::Hour))
    }

    /// 任何失敗都改回傳固定的新聞清單，永遠是 200
    fn recover(&self, error: ProxyError) -> ApiResponse {
        tracing::warn!("⚠️ News feed unavailable, serving static fallback: {}", error);
        ApiResponse::json(200, &fallback_articles()).with_cache(CachePolicy::NoCache)
    }
}
