//! OpenAI 客户端（Provider A）
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型（兼容 OpenAI API 的服务均可）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoff;
use std::time::Duration;
use tracing::{debug, warn};

use super::LlmProvider;
use crate::config::Config;
use crate::error::GenerationError;

const PROVIDER_NAME: &str = "openai";

/// OpenAI 客户端
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiClient {
    /// 创建新的 OpenAI 客户端
    pub fn new(api_key: &str, config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.openai_api_base_url);

        // 只请求一次：失败直接交给下一个策略，不做 SDK 内部重试
        let single_attempt = ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        Self {
            client: Client::with_config(openai_config).with_backoff(single_attempt),
            model_name: config.openai_model_name.clone(),
            temperature: 0.7,
            max_tokens: 1500,
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }

    fn api_error(err: impl std::error::Error + Send + Sync + 'static) -> GenerationError {
        GenerationError::api_call_failed(PROVIDER_NAME, err)
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, GenerationError> {
        debug!("调用 OpenAI API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(Self::api_error)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(Self::api_error)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(Self::api_error)?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|e| {
                warn!("OpenAI API 调用超时 ({:?})", self.timeout);
                Self::api_error(e)
            })?
            .map_err(|e| {
                warn!("OpenAI API 调用失败: {}", e);
                Self::api_error(e)
            })?;

        debug!("OpenAI API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GenerationError::EmptyContent {
                provider: PROVIDER_NAME.to_string(),
            })?;

        Ok(content.trim().to_string())
    }
}
