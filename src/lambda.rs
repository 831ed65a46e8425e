#[cfg(feature = "lambda")]
use consulta_proxy::core::service::ProxyService;
#[cfg(feature = "lambda")]
use consulta_proxy::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use consulta_proxy::{ApiResponse, LambdaConfig, QueryParams, UpstreamSettings};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use std::collections::HashMap;
#[cfg(feature = "lambda")]
use std::sync::Arc;

/// API Gateway (REST 或 HTTP API) 事件中用到的欄位
#[cfg(feature = "lambda")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub raw_path: Option<String>,
    pub path: Option<String>,
    pub raw_query_string: Option<String>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

#[cfg(feature = "lambda")]
impl Request {
    fn path(&self) -> &str {
        self.raw_path
            .as_deref()
            .or(self.path.as_deref())
            .unwrap_or("/")
    }

    /// 原始查詢字串優先，保留重複參數的順序
    fn query(&self) -> QueryParams {
        if let Some(raw) = self.raw_query_string.as_deref().filter(|q| !q.is_empty()) {
            return QueryParams::parse(raw);
        }
        if let Some(multi) = &self.multi_value_query_string_parameters {
            return multi
                .iter()
                .flat_map(|(key, values)| values.iter().map(move |v| (key.clone(), v.clone())))
                .collect();
        }
        self.query_string_parameters
            .clone()
            .unwrap_or_default()
            .into_iter()
            .collect()
    }
}

#[cfg(feature = "lambda")]
impl From<ApiResponse> for Response {
    fn from(response: ApiResponse) -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            response.body.content_type().to_string(),
        );
        if let Some(cache) = response.cache {
            headers.insert("Cache-Control".to_string(), cache.header_value().to_string());
        }

        Self {
            status_code: response.status,
            headers,
            body: response.body.into_string(),
            is_base64_encoded: false,
        }
    }
}

#[cfg(feature = "lambda")]
async fn function_handler(
    service: Arc<ProxyService>,
    event: LambdaEvent<Request>,
) -> Result<Response, Error> {
    let path = event.payload.path().to_string();
    tracing::info!(path = %path, "Handling lookup invocation");

    let response = service
        .dispatch_path(&path, &event.payload.query())
        .await;

    Ok(Response::from(response))
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    lambda_config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let settings = UpstreamSettings::from_provider(&lambda_config);
    let service = ProxyService::shared(&settings);

    run(service_fn(move |event: LambdaEvent<Request>| {
        function_handler(Arc::clone(&service), event)
    }))
    .await
}
