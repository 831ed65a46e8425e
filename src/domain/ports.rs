use crate::domain::model::{ApiResponse, QueryParams};
use crate::utils::error::{ProxyError, Result};
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn postal_endpoint(&self) -> &str;
    fn registry_endpoint(&self) -> &str;
    fn vehicle_endpoint(&self) -> &str;
    fn vehicle_username(&self) -> Option<&str>;
    fn news_endpoint(&self) -> &str;
    fn news_user_agent(&self) -> &str;
}

/// 單一上游服務的轉接器：驗證 -> 呼叫上游 -> 映射回應
#[async_trait]
pub trait Adapter: Send + Sync {
    type Input: Send;
    type Upstream: Send;

    fn name(&self) -> &'static str;

    /// 在任何對外呼叫之前執行
    fn validate(&self, query: &QueryParams) -> Result<Self::Input>;

    async fn fetch(&self, input: Self::Input) -> Result<Self::Upstream>;

    fn map(&self, upstream: Self::Upstream) -> Result<ApiResponse>;

    fn recover(&self, error: ProxyError) -> ApiResponse {
        ApiResponse::message(error.status_code(), error.user_message())
    }
}
