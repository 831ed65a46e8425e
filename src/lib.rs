pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "cli")]
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::LambdaConfig;

pub use config::{toml_config::TomlConfig, UpstreamSettings};
pub use crate::core::{
    engine::AdapterEngine,
    service::{Endpoint, ProxyService},
};
pub use domain::model::{ApiResponse, QueryParams};
pub use utils::error::{ProxyError, Result};
