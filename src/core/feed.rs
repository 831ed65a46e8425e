//! Pattern-based extraction of `<item>` blocks from an RSS body.
//!
//! No XML parser is involved; items and their child tags are located with
//! regular expressions and substring search.

use crate::core::Article;
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_ARTICLES: usize = 5;
pub const DEFAULT_SOURCE: &str = "Google News";

fn item_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<item(?:\s[^>]*)?>(.*?)</item>").expect("valid regex"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"))
}

/// 解碼後只移除像標籤的片段，`a < b` 之類的文字保留
fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)</?[A-Za-z][^<>]*>").expect("valid regex"))
}

fn cdata_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)^\s*<!\[CDATA\[(.*)\]\]>\s*$").expect("valid regex"))
}

/// 取出前 `MAX_ARTICLES` 個 item，依文件順序
pub fn extract_articles(xml: &str) -> Vec<Article> {
    item_pattern()
        .captures_iter(xml)
        .take(MAX_ARTICLES)
        .map(|caps| parse_item(&caps[1]))
        .collect()
}

fn parse_item(block: &str) -> Article {
    let field = |name: &str| tag_content(block, name).unwrap_or_default();

    let source = tag_content(block, "source")
        .map(|s| clean_text(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    Article {
        title: clean_text(&field("title")),
        link: field("link").trim().to_string(),
        pub_date: field("pubDate").trim().to_string(),
        description: clean_text(&field("description")),
        source,
    }
}

/// `<name ...>content</name>` 的內容（已去除 CDATA 包裝）
fn tag_content(block: &str, name: &str) -> Option<String> {
    let open = format!("<{}", name);
    let close = format!("</{}>", name);

    let mut search_from = 0;
    while let Some(offset) = block[search_from..].find(&open) {
        let start = search_from + offset;
        let after_name = start + open.len();
        // 避免 <source> 匹配到 <sourceUrl> 之類的標籤
        match block[after_name..].chars().next() {
            Some('>') | Some(' ') | Some('\t') | Some('\n') | Some('\r') => {}
            Some('/') => return Some(String::new()),
            _ => {
                search_from = after_name;
                continue;
            }
        }

        let content_start = after_name + block[after_name..].find('>')? + 1;
        if block[..content_start].ends_with("/>") {
            return Some(String::new());
        }
        let content_end = content_start + block[content_start..].find(&close)?;
        return Some(unwrap_cdata(&block[content_start..content_end]));
    }
    None
}

fn unwrap_cdata(raw: &str) -> String {
    match cdata_pattern().captures(raw) {
        Some(caps) => caps[1].to_string(),
        None => raw.to_string(),
    }
}

pub fn strip_tags(text: &str) -> String {
    tag_pattern().replace_all(text, "").into_owned()
}

/// 只處理固定的幾個實體，`&amp;` 最後處理以免產生新的實體
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// 移除標籤、解碼實體，再移除解碼後才出現的標籤
pub fn clean_text(raw: &str) -> String {
    let decoded = decode_entities(&strip_tags(raw));
    markup_pattern()
        .replace_all(&decoded, "")
        .trim()
        .to_string()
}
