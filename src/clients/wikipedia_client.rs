//! 百科 API 客户端
//!
//! 封装 Wikipedia REST API 的调用：先取摘要，摘要为空时退回整页 HTML。

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

use super::ContentResolver;
use crate::config::Config;
use crate::error::ResolveError;
use crate::models::ContentPayload;

const USER_AGENT: &str = concat!("StudyAssistant/", env!("CARGO_PKG_VERSION"));
const WIKI_PAGE_BASE_URL: &str = "https://en.wikipedia.org/wiki";
/// 整页 HTML 提取的最大字符数
const MAX_PAGE_CHARS: usize = 2000;

static HTML_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());
static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

#[derive(Debug, Deserialize)]
struct PageSummary {
    title: Option<String>,
    extract: Option<String>,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<PageUrls>,
}

#[derive(Debug, Deserialize)]
struct PageUrls {
    page: Option<String>,
}

/// Wikipedia 客户端
pub struct WikipediaClient {
    http: reqwest::Client,
    base_url: String,
}

impl WikipediaClient {
    /// 创建新的百科客户端（超时取自配置）
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_base_url(
            &config.wikipedia_api_base_url,
            Duration::from_secs(config.wikipedia_timeout_secs),
        )
    }

    /// 使用自定义 API 地址创建
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// 摘要为空时读取整页 HTML 并提取纯文本
    async fn fetch_page_text(&self, topic: &str) -> Result<String, ResolveError> {
        let url = format!("{}/page/html/{}", self.base_url, urlencoding::encode(topic));
        debug!("获取整页内容: {}", url);

        let response = self.http.get(&url).header(ACCEPT, "text/html").send().await?;
        check_status(response.status(), topic)?;

        let html = response.text().await?;
        Ok(html_to_text(&html, MAX_PAGE_CHARS))
    }
}

#[async_trait]
impl ContentResolver for WikipediaClient {
    async fn resolve(&self, topic: &str) -> Result<ContentPayload, ResolveError> {
        let encoded = urlencoding::encode(topic);
        let url = format!("{}/page/summary/{}", self.base_url, encoded);
        debug!("查询百科摘要: {}", url);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        check_status(response.status(), topic)?;

        let summary: PageSummary = response.json().await?;
        let fallback_source = format!("{}/{}", WIKI_PAGE_BASE_URL, encoded);

        if let Some(extract) = summary.extract.filter(|e| !e.trim().is_empty()) {
            let source = summary
                .content_urls
                .and_then(|urls| urls.desktop)
                .and_then(|desktop| desktop.page)
                .unwrap_or(fallback_source);

            return Ok(ContentPayload {
                text: extract,
                title: summary.title,
                source_reference: Some(source),
            });
        }

        let text = self.fetch_page_text(topic).await?;
        if text.is_empty() {
            return Err(ResolveError::EmptyContent {
                topic: topic.to_string(),
            });
        }

        Ok(ContentPayload {
            text,
            title: Some(topic.to_string()),
            source_reference: Some(fallback_source),
        })
    }
}

/// 非 2xx 状态映射为对应的错误
fn check_status(status: StatusCode, topic: &str) -> Result<(), ResolveError> {
    if status.is_success() {
        return Ok(());
    }

    Err(match status {
        StatusCode::NOT_FOUND => ResolveError::NotFound {
            topic: topic.to_string(),
        },
        StatusCode::FORBIDDEN => ResolveError::AccessDenied,
        StatusCode::TOO_MANY_REQUESTS => ResolveError::RateLimited,
        other => ResolveError::Upstream {
            status: other.as_u16(),
            reason: other.canonical_reason().unwrap_or("Unknown").to_string(),
        },
    })
}

/// 去掉标签、合并空白，保留前 `max_chars` 个字符
fn html_to_text(html: &str, max_chars: usize) -> String {
    let (Some(tag), Some(ws)) = (HTML_TAG.as_ref(), WHITESPACE.as_ref()) else {
        return String::new();
    };

    let without_tags = tag.replace_all(html, " ");
    let collapsed = ws.replace_all(&without_tags, " ");
    collapsed.trim().chars().take(max_chars).collect()
}
