#[cfg(feature = "lambda")]
use crate::config::{
    validate_provider, DEFAULT_BIND_ADDR, DEFAULT_NEWS_ENDPOINT, DEFAULT_NEWS_USER_AGENT,
    DEFAULT_POSTAL_ENDPOINT, DEFAULT_REGISTRY_ENDPOINT, DEFAULT_VEHICLE_ENDPOINT,
};
#[cfg(feature = "lambda")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "lambda")]
use crate::utils::error::Result;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub postal_endpoint: String,
    pub registry_endpoint: String,
    pub vehicle_endpoint: String,
    pub vehicle_username: Option<String>,
    pub news_endpoint: String,
    pub news_user_agent: String,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    /// 所有值都有預設，VEHICLE_API_USERNAME 缺少時不視為啟動錯誤
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            postal_endpoint: env::var("POSTAL_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_POSTAL_ENDPOINT.to_string()),
            registry_endpoint: env::var("REGISTRY_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_REGISTRY_ENDPOINT.to_string()),
            vehicle_endpoint: env::var("VEHICLE_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_VEHICLE_ENDPOINT.to_string()),
            vehicle_username: env::var("VEHICLE_API_USERNAME")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            news_endpoint: env::var("NEWS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_NEWS_ENDPOINT.to_string()),
            news_user_agent: env::var("NEWS_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_NEWS_USER_AGENT.to_string()),
        })
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    // Lambda 不綁定 socket，僅供驗證使用
    fn bind_addr(&self) -> &str {
        DEFAULT_BIND_ADDR
    }

    fn postal_endpoint(&self) -> &str {
        &self.postal_endpoint
    }

    fn registry_endpoint(&self) -> &str {
        &self.registry_endpoint
    }

    fn vehicle_endpoint(&self) -> &str {
        &self.vehicle_endpoint
    }

    fn vehicle_username(&self) -> Option<&str> {
        self.vehicle_username.as_deref()
    }

    fn news_endpoint(&self) -> &str {
        &self.news_endpoint
    }

    fn news_user_agent(&self) -> &str {
        &self.news_user_agent
    }
}

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
