use crate::core::{Adapter, ApiResponse, CachePolicy, QueryParams};
use crate::utils::error::{ProxyError, Result};
use crate::utils::validation::{non_empty, validate_min_chars};
use async_trait::async_trait;
use reqwest::Client;

pub const INVALID_PLATE: &str = "Placa inválida fornecida.";
pub const MISSING_USERNAME: &str =
    "Configuração do servidor incompleta: usuário da API de placas ausente.";
pub const MIN_PLATE_CHARS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateLookup {
    pub plate: String,
    pub username: String,
}

pub struct VehicleAdapter {
    client: Client,
    endpoint: String,
    username: Option<String>,
}

impl VehicleAdapter {
    pub fn new(client: Client, endpoint: impl Into<String>, username: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            username,
        }
    }
}

#[async_trait]
impl Adapter for VehicleAdapter {
    type Input = PlateLookup;
    type Upstream = String;

    fn name(&self) -> &'static str {
        "vehicle"
    }

    /// 先檢查伺服器設定，再檢查車牌
    fn validate(&self, query: &QueryParams) -> Result<PlateLookup> {
        let username = non_empty(self.username.as_deref()).ok_or_else(|| ProxyError::Config {
            message: MISSING_USERNAME.to_string(),
        })?;

        let plate = query.first("placa").unwrap_or_default();
        validate_min_chars(plate, MIN_PLATE_CHARS, INVALID_PLATE)?;

        Ok(PlateLookup {
            plate: plate.to_string(),
            username: username.to_string(),
        })
    }

    async fn fetch(&self, lookup: PlateLookup) -> Result<String> {
        tracing::debug!(plate = %lookup.plate, "Making vehicle lookup request to: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("RegistrationNumber", lookup.plate.as_str()),
                ("username", lookup.username.as_str()),
            ])
            .send()
            .await?;
        tracing::debug!("Vehicle API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ProxyError::UpstreamStatus {
                service: "placas",
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// XML 原樣回傳
    fn map(&self, xml: String) -> Result<ApiResponse> {
        Ok(ApiResponse::xml(200, xml).with_cache(CachePolicy::Hour))
    }
}
