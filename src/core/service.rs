use crate::config::UpstreamSettings;
use crate::core::engine::AdapterEngine;
use crate::core::news::NewsAdapter;
use crate::core::postal::PostalAdapter;
use crate::core::registry::RegistryAdapter;
use crate::core::vehicle::VehicleAdapter;
use crate::core::{ApiResponse, QueryParams};
use reqwest::Client;
use std::sync::Arc;

pub const ROUTE_NOT_FOUND: &str = "Rota não encontrada.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Postal,
    Registry,
    Vehicle,
    News,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Postal,
        Endpoint::Registry,
        Endpoint::Vehicle,
        Endpoint::News,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Postal => "/api/cep",
            Endpoint::Registry => "/api/cnpj",
            Endpoint::Vehicle => "/api/placa",
            Endpoint::News => "/api/news",
        }
    }

    /// 比對請求路徑（容許結尾斜線與 API Gateway 的 stage 前綴）
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let exact = |route: &str| Self::ALL.into_iter().find(|endpoint| endpoint.path() == route);

        exact(trimmed).or_else(|| {
            // 最多只去掉一段前綴，例如 /prod/api/cep
            let (_stage, route) = trimmed.strip_prefix('/')?.split_once('/')?;
            exact(format!("/{}", route).as_str())
        })
    }
}

/// 每個上游一個引擎；沒有可變狀態，可以在請求之間共享
pub struct ProxyService {
    postal: AdapterEngine<PostalAdapter>,
    registry: AdapterEngine<RegistryAdapter>,
    vehicle: AdapterEngine<VehicleAdapter>,
    news: AdapterEngine<NewsAdapter>,
}

impl ProxyService {
    pub fn new(settings: &UpstreamSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: &UpstreamSettings) -> Self {
        Self {
            postal: AdapterEngine::new(PostalAdapter::new(
                client.clone(),
                settings.postal_endpoint.clone(),
            )),
            registry: AdapterEngine::new(RegistryAdapter::new(
                client.clone(),
                settings.registry_endpoint.clone(),
            )),
            vehicle: AdapterEngine::new(VehicleAdapter::new(
                client.clone(),
                settings.vehicle_endpoint.clone(),
                settings.vehicle_username.clone(),
            )),
            news: AdapterEngine::new(NewsAdapter::new(
                client,
                settings.news_endpoint.clone(),
                settings.news_user_agent.clone(),
            )),
        }
    }

    pub fn shared(settings: &UpstreamSettings) -> Arc<Self> {
        Arc::new(Self::new(settings))
    }

    pub async fn dispatch(&self, endpoint: Endpoint, query: &QueryParams) -> ApiResponse {
        match endpoint {
            Endpoint::Postal => self.postal.run(query).await,
            Endpoint::Registry => self.registry.run(query).await,
            Endpoint::Vehicle => self.vehicle.run(query).await,
            Endpoint::News => self.news.run(query).await,
        }
    }

    pub async fn dispatch_path(&self, path: &str, query: &QueryParams) -> ApiResponse {
        match Endpoint::from_path(path) {
            Some(endpoint) => self.dispatch(endpoint, query).await,
            None => {
                tracing::info!(path, "No endpoint for path");
                ApiResponse::message(404, ROUTE_NOT_FOUND)
            }
        }
    }
}
