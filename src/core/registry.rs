use crate::core::{Adapter, ApiResponse, CachePolicy, QueryParams};
use crate::utils::error::{ProxyError, Result};
use crate::utils::validation::validate_digit_count;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

pub const INVALID_CNPJ: &str = "CNPJ inválido fornecido.";
pub const CNPJ_NOT_FOUND: &str = "CNPJ não encontrado.";
pub const CNPJ_INTERNAL_ERROR: &str = "Erro interno ao consultar CNPJ.";

pub struct RegistryAdapter {
    client: Client,
    endpoint: String,
}

impl RegistryAdapter {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn lookup_url(&self, cnpj: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), cnpj)
    }
}

/// 傳輸或解碼錯誤的訊息；空字串時改用固定訊息
fn describe_failure(error: reqwest::Error) -> ProxyError {
    let message = error.to_string();
    if message.trim().is_empty() {
        ProxyError::internal(CNPJ_INTERNAL_ERROR)
    } else {
        ProxyError::internal(message)
    }
}

#[async_trait]
impl Adapter for RegistryAdapter {
    type Input = String;
    type Upstream = serde_json::Value;

    fn name(&self) -> &'static str {
        "registry"
    }

    fn validate(&self, query: &QueryParams) -> Result<String> {
        validate_digit_count(query.first("cnpj").unwrap_or_default(), 14, INVALID_CNPJ)
    }

    async fn fetch(&self, cnpj: String) -> Result<serde_json::Value> {
        let url = self.lookup_url(&cnpj);
        tracing::debug!("Making registry lookup request to: {}", url);

        let response = self.client.get(&url).send().await.map_err(describe_failure)?;
        let status = response.status();
        tracing::debug!("Registry API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(ProxyError::not_found(CNPJ_NOT_FOUND));
        }
        if !status.is_success() {
            return Err(ProxyError::UpstreamStatus {
                service: "CNPJ",
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(describe_failure)
    }

    /// 上游 JSON 原樣轉發
    fn map(&self, payload: serde_json::Value) -> Result<ApiResponse> {
        Ok(ApiResponse::json(200, &payload).with_cache(CachePolicy::Day))
    }
}
