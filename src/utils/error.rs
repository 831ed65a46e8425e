use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Erro ao consultar o serviço de {service} (status {status}).")]
    UpstreamStatus { service: &'static str, status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Config { message: String },

    #[error("{message}")]
    Internal { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidation { field: String, message: String },
}

/// 請求網址可能帶有查詢參數中的憑證，一律移除
impl From<reqwest::Error> for ProxyError {
    fn from(error: reqwest::Error) -> Self {
        ProxyError::Http(error.without_url())
    }
}

/// 對外可見的三種錯誤類別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ClientInput,
    UpstreamNotFound,
    UpstreamOrInternal,
}

impl ProxyError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ProxyError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ProxyError::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ProxyError::Internal {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ProxyError::InvalidInput { .. } => ErrorCategory::ClientInput,
            ProxyError::NotFound { .. } => ErrorCategory::UpstreamNotFound,
            _ => ErrorCategory::UpstreamOrInternal,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::ClientInput => 400,
            ErrorCategory::UpstreamNotFound => 404,
            ErrorCategory::UpstreamOrInternal => 500,
        }
    }

    /// 回傳給呼叫端的訊息 (`{ "message": ... }`)
    pub fn user_message(&self) -> String {
        match self {
            // reqwest 的錯誤訊息已足夠描述，不再加前綴
            ProxyError::Http(e) => e.to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ProxyError::InvalidConfigValue { .. } | ProxyError::ConfigValidation { .. } => {
                "Check the configuration file or command line flags"
            }
            ProxyError::Config { .. } => {
                "Set the missing value through its environment variable or flag"
            }
            ProxyError::Io(_) => "Make sure the file exists and is readable",
            _ => "Check the upstream service availability and retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
