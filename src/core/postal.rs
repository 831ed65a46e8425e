use crate::core::{Adapter, Address, ApiResponse, CachePolicy, QueryParams};
use crate::utils::error::{ProxyError, Result};
use crate::utils::validation::validate_digit_count;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const INVALID_CEP: &str = "CEP inválido fornecido.";
pub const CEP_NOT_FOUND: &str = "CEP não encontrado.";

/// ViaCEP 回傳的欄位
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViaCepPayload {
    #[serde(default)]
    pub erro: Option<serde_json::Value>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub localidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub ddd: Option<String>,
}

impl ViaCepPayload {
    /// `erro` 可能是 `true` 或字串 `"true"`
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn into_address(self) -> Address {
        Address {
            street: self.logradouro.unwrap_or_default(),
            neighborhood: self.bairro.unwrap_or_default(),
            city: self.localidade.unwrap_or_default(),
            state: self.uf.unwrap_or_default(),
            cep: self.cep.unwrap_or_default(),
            ddd: self.ddd.unwrap_or_default(),
        }
    }
}

pub struct PostalAdapter {
    client: Client,
    endpoint: String,
}

impl PostalAdapter {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn lookup_url(&self, cep: &str) -> String {
        format!("{}/{}/json/", self.endpoint.trim_end_matches('/'), cep)
    }
}

#[async_trait]
impl Adapter for PostalAdapter {
    type Input = String;
    type Upstream = ViaCepPayload;

    fn name(&self) -> &'static str {
        "postal"
    }

    fn validate(&self, query: &QueryParams) -> Result<String> {
        validate_digit_count(query.first("cep").unwrap_or_default(), 8, INVALID_CEP)
    }

    async fn fetch(&self, cep: String) -> Result<ViaCepPayload> {
        let url = self.lookup_url(&cep);
        tracing::debug!("Making postal lookup request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("Postal API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ProxyError::UpstreamStatus {
                service: "CEP",
                status: response.status().as_u16(),
            });
        }

        let payload: ViaCepPayload = response.json().await?;
        Ok(payload)
    }

    fn map(&self, payload: ViaCepPayload) -> Result<ApiResponse> {
        if payload.is_not_found() {
            return Err(ProxyError::not_found(CEP_NOT_FOUND));
        }

        Ok(ApiResponse::json(200, &payload.into_address()).with_cache(CachePolicy::Day))
    }
}
