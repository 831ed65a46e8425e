use crate::config::{
    validate_provider, DEFAULT_BIND_ADDR, DEFAULT_NEWS_ENDPOINT, DEFAULT_NEWS_USER_AGENT,
    DEFAULT_POSTAL_ENDPOINT, DEFAULT_REGISTRY_ENDPOINT, DEFAULT_VEHICLE_ENDPOINT,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ProxyError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstreams: UpstreamsConfig,
    #[serde(default)]
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub news: NewsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamsConfig {
    #[serde(default = "default_postal_endpoint")]
    pub postal: String,
    #[serde(default = "default_registry_endpoint")]
    pub registry: String,
    #[serde(default = "default_vehicle_endpoint")]
    pub vehicle: String,
    #[serde(default = "default_news_endpoint")]
    pub news: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_news_user_agent")]
    pub user_agent: String,
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_postal_endpoint() -> String {
    DEFAULT_POSTAL_ENDPOINT.to_string()
}

fn default_registry_endpoint() -> String {
    DEFAULT_REGISTRY_ENDPOINT.to_string()
}

fn default_vehicle_endpoint() -> String {
    DEFAULT_VEHICLE_ENDPOINT.to_string()
}

fn default_news_endpoint() -> String {
    DEFAULT_NEWS_ENDPOINT.to_string()
}

fn default_news_user_agent() -> String {
    DEFAULT_NEWS_USER_AGENT.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            postal: default_postal_endpoint(),
            registry: default_registry_endpoint(),
            vehicle: default_vehicle_endpoint(),
            news: default_news_endpoint(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            user_agent: default_news_user_agent(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProxyError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| ProxyError::ConfigValidation {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        // 未被替換的 ${VEHICLE_API_USERNAME} 等同未設定
        if let Some(username) = &config.vehicle.username {
            if username.trim().is_empty() || username.starts_with("${") {
                config.vehicle.username = None;
            }
        }

        Ok(config)
    }

    /// 替換環境變數 (例如 ${VEHICLE_API_USERNAME})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProxyError::ConfigValidation {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_addr(&self) -> &str {
        &self.server.bind_addr
    }

    fn postal_endpoint(&self) -> &str {
        &self.upstreams.postal
    }

    fn registry_endpoint(&self) -> &str {
        &self.upstreams.registry
    }

    fn vehicle_endpoint(&self) -> &str {
        &self.upstreams.vehicle
    }

    fn vehicle_username(&self) -> Option<&str> {
        self.vehicle.username.as_deref()
    }

    fn news_endpoint(&self) -> &str {
        &self.upstreams.news
    }

    fn news_user_agent(&self) -> &str {
        &self.news.user_agent
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[server]
bind_addr = "0.0.0.0:8080"

[upstreams]
postal = "https://cep.example.com/ws"

[vehicle]
username = "demo"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.postal_endpoint(), "https://cep.example.com/ws");
        assert_eq!(config.registry_endpoint(), DEFAULT_REGISTRY_ENDPOINT);
        assert_eq!(config.vehicle_username(), Some("demo"));
        assert_eq!(config.news_user_agent(), DEFAULT_NEWS_USER_AGENT);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(config.news_endpoint(), DEFAULT_NEWS_ENDPOINT);
        assert_eq!(config.vehicle_username(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CONSULTA_TEST_REGISTRY", "https://registry.test.com");

        let toml_content = r#"
[upstreams]
registry = "${CONSULTA_TEST_REGISTRY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.registry_endpoint(), "https://registry.test.com");

        std::env::remove_var("CONSULTA_TEST_REGISTRY");
    }

    #[test]
    fn test_unresolved_username_counts_as_missing() {
        let toml_content = r#"
[vehicle]
username = "${CONSULTA_TEST_UNSET_USERNAME}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.vehicle_username(), None);
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[upstreams]
news = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[news]
user_agent = "file-test/1.0"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.news_user_agent(), "file-test/1.0");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TomlConfig::from_file("/nonexistent/consulta-proxy.toml");
        assert!(matches!(result, Err(ProxyError::Io(_))));
    }
}
