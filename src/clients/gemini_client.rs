//! Gemini 客户端（Provider B）
//!
//! 直接调用 `generateContent` REST 接口；Gemini 没有独立的系统消息，
//! 系统消息拼接在提示词前面。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::LlmProvider;
use crate::config::Config;
use crate::error::GenerationError;

const PROVIDER_NAME: &str = "gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

/// Gemini 客户端
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    pub fn new(api_key: &str, config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url: config.gemini_api_base_url.trim_end_matches('/').to_string(),
            model_name: config.gemini_model_name.clone(),
        })
    }

    fn transport_error(err: reqwest::Error) -> GenerationError {
        GenerationError::api_call_failed(PROVIDER_NAME, err.without_url())
    }

    fn api_error(message: String) -> GenerationError {
        GenerationError::ApiCallFailed {
            provider: PROVIDER_NAME.to_string(),
            source: message.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, GenerationError> {
        debug!("调用 Gemini API，模型: {}", self.model_name);

        let full_prompt = match system_message {
            Some(sys_msg) => format!("{}\n\n{}", sys_msg, user_message),
            None => user_message.to_string(),
        };

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: full_prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: 0.7,
                max_output_tokens: 2048,
            },
        };

        // 密钥放在请求头里，不进入 URL，错误信息和日志里不会出现
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model_name);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Gemini API 调用失败: {} {}", status, error_text);
            return Err(Self::api_error(format!("{}: {}", status, error_text)));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(Self::transport_error)?;

        debug!("Gemini API 调用成功");

        let text = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| GenerationError::EmptyContent {
                provider: PROVIDER_NAME.to_string(),
            })?;

        Ok(text.trim().to_string())
    }
}
