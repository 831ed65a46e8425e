pub mod lambda;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_POSTAL_ENDPOINT: &str = "https://viacep.com.br/ws";
pub const DEFAULT_REGISTRY_ENDPOINT: &str = "https://brasilapi.com.br/api/cnpj/v1";
pub const DEFAULT_VEHICLE_ENDPOINT: &str = "https://www.regcheck.org.uk/api/reg.asmx/CheckBrazil";
pub const DEFAULT_NEWS_ENDPOINT: &str =
    "https://news.google.com/rss/search?q=prote%C3%A7%C3%A3o+veicular&hl=pt-BR&gl=BR&ceid=BR:pt-419";
pub const DEFAULT_NEWS_USER_AGENT: &str = "consulta-proxy/0.1 (+news aggregator)";

/// 啟動時由任一 ConfigProvider 取得的設定快照，之後只讀
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamSettings {
    pub bind_addr: String,
    pub postal_endpoint: String,
    pub registry_endpoint: String,
    pub vehicle_endpoint: String,
    pub vehicle_username: Option<String>,
    pub news_endpoint: String,
    pub news_user_agent: String,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            postal_endpoint: DEFAULT_POSTAL_ENDPOINT.to_string(),
            registry_endpoint: DEFAULT_REGISTRY_ENDPOINT.to_string(),
            vehicle_endpoint: DEFAULT_VEHICLE_ENDPOINT.to_string(),
            vehicle_username: None,
            news_endpoint: DEFAULT_NEWS_ENDPOINT.to_string(),
            news_user_agent: DEFAULT_NEWS_USER_AGENT.to_string(),
        }
    }
}

impl UpstreamSettings {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            bind_addr: config.bind_addr().to_string(),
            postal_endpoint: config.postal_endpoint().to_string(),
            registry_endpoint: config.registry_endpoint().to_string(),
            vehicle_endpoint: config.vehicle_endpoint().to_string(),
            vehicle_username: validation::non_empty(config.vehicle_username()).map(str::to_string),
            news_endpoint: config.news_endpoint().to_string(),
            news_user_agent: config.news_user_agent().to_string(),
        }
    }
}

impl ConfigProvider for UpstreamSettings {
    fn bind_addr(&self) -> &str {
        &self.bind_addr
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

impl Validate for UpstreamSettings {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// 所有設定來源共用的檢查；車牌 API 帳號不在此檢查，缺少時由每次請求回應 500
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_socket_addr("bind_addr", config.bind_addr())?;
    validation::validate_url("postal_endpoint", config.postal_endpoint())?;
    validation::validate_url("registry_endpoint", config.registry_endpoint())?;
    validation::validate_url("vehicle_endpoint", config.vehicle_endpoint())?;
    validation::validate_url("news_endpoint", config.news_endpoint())?;
    validation::validate_non_empty_string("news_user_agent", config.news_user_agent())?;

    if validation::non_empty(config.vehicle_username()).is_none() {
        tracing::warn!("⚠️ VEHICLE_API_USERNAME is not set, /api/placa will answer 500");
    }

    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "consulta-proxy")]
#[command(about = "Lookup proxy for postal code, company registry, vehicle plate and news feed")]
pub struct CliConfig {
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: String,

    #[arg(long, env = "POSTAL_ENDPOINT", default_value = DEFAULT_POSTAL_ENDPOINT)]
    pub postal_endpoint: String,

    #[arg(long, env = "REGISTRY_ENDPOINT", default_value = DEFAULT_REGISTRY_ENDPOINT)]
    pub registry_endpoint: String,

    #[arg(long, env = "VEHICLE_ENDPOINT", default_value = DEFAULT_VEHICLE_ENDPOINT)]
    pub vehicle_endpoint: String,

    #[arg(long, env = "VEHICLE_API_USERNAME", hide_env_values = true)]
    pub vehicle_username: Option<String>,

    #[arg(long, env = "NEWS_ENDPOINT", default_value = DEFAULT_NEWS_ENDPOINT)]
    pub news_endpoint: String,

    #[arg(long, env = "NEWS_USER_AGENT", default_value = DEFAULT_NEWS_USER_AGENT)]
    pub news_user_agent: String,

    /// Path to a TOML configuration file (overrides the flags above)
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn bind_addr(&self) -> &str {
        &self.bind_addr
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

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
