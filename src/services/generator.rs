//! 学习材料生成 - 业务能力层
//!
//! 按优先级依次尝试各个生成策略：Provider A → Provider B → 本地模拟。
//! 任一外部策略失败（网络、凭证、JSON、结构）都只记日志并转向下一个，
//! 本地模拟永远成功，所以 `generate` 不返回错误。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::{GeminiClient, LlmProvider, OpenAiClient};
use crate::config::Config;
use crate::error::GenerationError;
use crate::models::{Mode, StudyArtifact};
use crate::services::mock_generator::MockGenerator;
use crate::services::prompt::{PromptKind, SYSTEM_MESSAGE};
use crate::services::response_parser::{parse_artifact, ResponseFormat};

/// 一次生成的输入
#[derive(Debug, Clone, Copy)]
pub struct GenerationInput<'a> {
    /// 百科正文，或直接提问时的原始主题
    pub content: &'a str,
    pub mode: Mode,
    pub is_direct_question: bool,
}

/// 生成策略
#[async_trait]
pub trait GenerationStrategy: Send + Sync {
    /// 策略名称（日志用）
    fn name(&self) -> &str;

    async fn generate(&self, input: GenerationInput<'_>) -> Result<StudyArtifact, GenerationError>;
}

/// 基于外部 LLM 的策略
pub struct ProviderStrategy {
    provider: Arc<dyn LlmProvider>,
    format: ResponseFormat,
    seven_ws_enabled: bool,
}

impl ProviderStrategy {
    pub fn new(provider: Arc<dyn LlmProvider>, format: ResponseFormat, seven_ws_enabled: bool) -> Self {
        Self {
            provider,
            format,
            seven_ws_enabled,
        }
    }
}

#[async_trait]
impl GenerationStrategy for ProviderStrategy {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn generate(&self, input: GenerationInput<'_>) -> Result<StudyArtifact, GenerationError> {
        let kind = PromptKind::select(input.mode, input.is_direct_question, self.seven_ws_enabled);
        let prompt = kind.render(input.content);
        debug!("[{}] 使用模板 {:?}，提示词 {} 字符", self.name(), kind, prompt.chars().count());

        let raw = self.provider.send_to_llm(&prompt, Some(SYSTEM_MESSAGE)).await?;
        parse_artifact(&raw, self.format, input.mode, kind.expected_summary_len())
    }
}

/// 策略链，末尾固定为本地模拟
pub struct ResponseGenerator {
    strategies: Vec<Box<dyn GenerationStrategy>>,
    fallback: MockGenerator,
}

impl ResponseGenerator {
    /// 指定外部策略（按顺序尝试），末尾总是本地模拟
    pub fn new(strategies: Vec<Box<dyn GenerationStrategy>>) -> Self {
        Self {
            strategies,
            fallback: MockGenerator::new(),
        }
    }

    /// 按配置的凭证组装策略链
    ///
    /// 凭证只在启动时读取一次；未配置的提供方不参与链条
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut strategies: Vec<Box<dyn GenerationStrategy>> = Vec::new();

        if let Some(api_key) = &config.openai_api_key {
            let provider = OpenAiClient::new(api_key, config);
            strategies.push(Box::new(ProviderStrategy::new(
                Arc::new(provider),
                ResponseFormat::FencedJson,
                config.seven_ws_prompt,
            )));
        }

        if let Some(api_key) = &config.gemini_api_key {
            let provider = GeminiClient::new(api_key, config)?;
            strategies.push(Box::new(ProviderStrategy::new(
                Arc::new(provider),
                ResponseFormat::EmbeddedJson,
                config.seven_ws_prompt,
            )));
        }

        if strategies.is_empty() {
            info!("🧪 未配置任何 LLM 凭证，使用本地模拟生成");
        }

        Ok(Self::new(strategies))
    }

    /// 外部策略名称（按顺序）
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// 生成学习材料，第一个成功的策略胜出
    pub async fn generate(&self, input: GenerationInput<'_>) -> StudyArtifact {
        for strategy in &self.strategies {
            match strategy.generate(input).await {
                Ok(artifact) => {
                    info!("✓ [{}] 生成成功", strategy.name());
                    return artifact;
                }
                Err(e) => {
                    warn!("⚠️ [{}] 生成失败，尝试下一个策略: {}", strategy.name(), e);
                }
            }
        }

        debug!("使用本地模拟生成");
        self.fallback
            .build(input.content, input.mode, input.is_direct_question)
    }
}
