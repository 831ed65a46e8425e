use serde::{Deserialize, Serialize};

/// 請求的查詢參數，保留原始順序（重複的 key 以第一個為準）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析 `a=1&b=2` 格式的查詢字串（含百分比解碼）
    pub fn parse(query: &str) -> Self {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// 取得第一個符合名稱的值
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// 下游 CDN / 瀏覽器的快取提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Day,
    Hour,
    NoCache,
}

impl CachePolicy {
    pub fn header_value(self) -> &'static str {
        match self {
            CachePolicy::Day => "s-maxage=86400, stale-while-revalidate",
            CachePolicy::Hour => "s-maxage=3600, stale-while-revalidate",
            CachePolicy::NoCache => "no-cache",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Xml(String),
}

impl ResponseBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            ResponseBody::Json(_) => "application/json",
            ResponseBody::Xml(_) => "application/xml; charset=utf-8",
        }
    }

    pub fn into_string(self) -> String {
        match self {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Xml(text) => text,
        }
    }
}

/// 與執行環境無關的回應，由 axum 或 Lambda 層轉換成實際的 HTTP 回應
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub cache: Option<CachePolicy>,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        let body = serde_json::to_value(payload).unwrap_or_else(|e| {
            serde_json::json!({ "message": format!("Falha ao serializar resposta: {}", e) })
        });
        Self {
            status,
            cache: None,
            body: ResponseBody::Json(body),
        }
    }

    pub fn xml(status: u16, text: String) -> Self {
        Self {
            status,
            cache: None,
            body: ResponseBody::Xml(text),
        }
    }

    pub fn message(status: u16, message: impl Into<String>) -> Self {
        Self::json(
            status,
            &ErrorEnvelope {
                message: message.into(),
            },
        )
    }

    pub fn with_cache(mut self, cache: CachePolicy) -> Self {
        self.cache = Some(cache);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
}

/// 對外公開的地址格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub cep: String,
    pub ddd: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    pub description: String,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_first_value_wins() {
        let query = QueryParams::new()
            .with("cnpj", "11222333000181")
            .with("cnpj", "99999999999999");

        assert_eq!(query.first("cnpj"), Some("11222333000181"));
        assert_eq!(query.first("cep"), None);
    }

    #[test]
    fn test_query_params_parse_decodes_values() {
        let query = QueryParams::parse("cep=01310-100&placa=ABC%201234&cep=00000000");

        assert_eq!(query.first("cep"), Some("01310-100"));
        assert_eq!(query.first("placa"), Some("ABC 1234"));
        assert!(QueryParams::parse("").is_empty());
    }

    #[test]
    fn test_cache_policy_header_values() {
        assert_eq!(
            CachePolicy::Day.header_value(),
            "s-maxage=86400, stale-while-revalidate"
        );
        assert_eq!(
            CachePolicy::Hour.header_value(),
            "s-maxage=3600, stale-while-revalidate"
        );
        assert_eq!(CachePolicy::NoCache.header_value(), "no-cache");
    }

    #[test]
    fn test_article_serializes_pub_date_key() {
        let article = Article {
            title: "t".to_string(),
            link: "l".to_string(),
            pub_date: "d".to_string(),
            description: "desc".to_string(),
            source: "s".to_string(),
        };

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["pubDate"], "d");
        assert!(value.get("pub_date").is_none());
    }

    #[test]
    fn test_message_response_shape() {
        let response = ApiResponse::message(400, "CEP inválido fornecido.");

        assert_eq!(response.status, 400);
        assert!(response.cache.is_none());
        assert_eq!(
            response.body,
            ResponseBody::Json(serde_json::json!({ "message": "CEP inválido fornecido." }))
        );
    }
}
