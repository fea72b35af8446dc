//! 外部协作方客户端
//!
//! 只负责和外部 HTTP 服务通信，不包含任何生成或编排逻辑。

pub mod gemini_client;
pub mod openai_client;
pub mod wikipedia_client;

use async_trait::async_trait;

use crate::error::{GenerationError, ResolveError};
use crate::models::ContentPayload;

pub use gemini_client::GeminiClient;
pub use openai_client::OpenAiClient;
pub use wikipedia_client::WikipediaClient;

/// 百科内容查询
#[async_trait]
pub trait ContentResolver: Send + Sync {
    /// 查询主题对应的正文片段
    async fn resolve(&self, topic: &str) -> Result<ContentPayload, ResolveError>;
}

/// LLM 聊天接口
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// 提供方名称（日志用）
    fn name(&self) -> &str;

    /// 发送一轮对话，返回去除首尾空白的文本
    async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, GenerationError>;
}
