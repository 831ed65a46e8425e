use crate::utils::error::{ProxyError, Result};
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 移除所有非數字字元，例如 `01310-100` -> `01310100`
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 清理後必須剛好是 `expected` 位數字，否則回傳 ClientInput 錯誤
pub fn validate_digit_count(raw: &str, expected: usize, message: &str) -> Result<String> {
    let digits = digits_only(raw);
    if digits.len() != expected {
        return Err(ProxyError::invalid_input(message));
    }
    Ok(digits)
}

pub fn validate_min_chars(raw: &str, min: usize, message: &str) -> Result<()> {
    if raw.chars().count() < min {
        return Err(ProxyError::invalid_input(message));
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ProxyError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ProxyError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ProxyError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse().map_err(|e| ProxyError::InvalidConfigValue {
        field: field_name.to_string(),
        value: addr.to_string(),
        reason: format!("Invalid socket address: {}", e),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProxyError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 空字串視為未設定
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("01310-100"), "01310100");
        assert_eq!(digits_only("11.222.333/0001-81"), "11222333000181");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn test_validate_digit_count() {
        assert_eq!(
            validate_digit_count("01310-100", 8, "bad").unwrap(),
            validate_digit_count("01310100", 8, "bad").unwrap()
        );
        assert!(validate_digit_count("0131010", 8, "bad").is_err());
        assert!(validate_digit_count("013101000", 8, "bad").is_err());
        assert!(validate_digit_count("", 8, "bad").is_err());
    }

    #[test]
    fn test_validate_min_chars_counts_characters() {
        assert!(validate_min_chars("ABC1234", 7, "bad").is_ok());
        assert!(validate_min_chars("ABC123", 7, "bad").is_err());
        // 多位元組字元以一個字元計算
        assert!(validate_min_chars("ÁÉÍ123", 7, "bad").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("postal_endpoint", "https://example.com").is_ok());
        assert!(validate_url("postal_endpoint", "http://example.com").is_ok());
        assert!(validate_url("postal_endpoint", "").is_err());
        assert!(validate_url("postal_endpoint", "invalid-url").is_err());
        assert!(validate_url("postal_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("bind_addr", "127.0.0.1:3000").is_ok());
        assert!(validate_socket_addr("bind_addr", "localhost").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("user")), Some("user"));
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(None), None);
    }
}
