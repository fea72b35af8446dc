use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::ErrorBody;

/// 应用程序错误类型
///
/// 只有这一层的错误会被映射成 HTTP 响应；
/// `GenerationError` 在生成器内部消化，不会到达这里。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 输入校验失败（400）
    #[error("{message}")]
    Validation { message: String },
    /// 按主题查询时百科中没有对应条目（404）
    #[error("Could not find information about \"{topic}\"")]
    TopicNotFound { topic: String },
    /// 百科查询的其他失败（500）
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// 其他错误（500）
    #[error("{0}")]
    Internal(String),
}

/// 百科内容查询错误
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// 条目不存在
    #[error("Topic \"{topic}\" not found on Wikipedia")]
    NotFound { topic: String },
    /// 条目存在但没有可用正文
    #[error("No content found for \"{topic}\"")]
    EmptyContent { topic: String },
    /// 403
    #[error("Wikipedia API access denied. Please check your User-Agent configuration.")]
    AccessDenied,
    /// 429
    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,
    /// 请求超时
    #[error("Request timeout. Please try again.")]
    Timeout,
    /// 无法建立连接
    #[error("Unable to connect to Wikipedia. Please check your internet connection.")]
    Unreachable,
    /// 其他非 2xx 响应
    #[error("Wikipedia API error: {status} - {reason}")]
    Upstream { status: u16, reason: String },
    /// 其他网络或解码错误
    #[error("Failed to fetch data: {0}")]
    Request(#[source] reqwest::Error),
}

impl ResolveError {
    /// 是否属于"查无此条目"（主题查询路径上映射为 404）
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ResolveError::NotFound { .. } | ResolveError::EmptyContent { .. }
        )
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResolveError::Timeout
        } else if err.is_connect() {
            ResolveError::Unreachable
        } else {
            ResolveError::Request(err)
        }
    }
}

/// 生成策略错误
///
/// 全部可恢复：出现任意一种都会让生成器转向下一个策略。
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// API 调用失败（网络、鉴权、构造请求等）
    #[error("{provider} API error: {source}")]
    ApiCallFailed {
        provider: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回结果为空
    #[error("{provider} returned empty content")]
    EmptyContent { provider: String },
    /// JSON 解析失败
    #[error("failed to parse provider JSON: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
    /// JSON 合法但结构不符合要求
    #[error("malformed provider response: {0}")]
    MalformedShape(String),
}

impl GenerationError {
    /// 创建 API 调用错误
    pub fn api_call_failed(
        provider: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        GenerationError::ApiCallFailed {
            provider: provider.into(),
            source: Box::new(source),
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建输入校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
        }
    }

    /// 创建主题不存在错误
    pub fn topic_not_found(topic: impl Into<String>) -> Self {
        AppError::TopicNotFound {
            topic: topic.into(),
        }
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::TopicNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Resolve(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 响应体中的 `error` 字段
    pub fn label(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "Invalid input",
            AppError::TopicNotFound { .. } => "Topic not found",
            AppError::Resolve(_) | AppError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.label().to_string(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
