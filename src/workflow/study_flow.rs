//! 学习请求处理流程 - 流程层
//!
//! 核心职责：定义"一次请求"的完整处理流程
//!
//! 流程顺序：
//! 1. 校验 topic / mode
//! 2. 分类（问句 / 数学题 vs 主题名）
//! 3. 查询百科（问句路径上失败则退回直接提问）
//! 4. 生成学习材料（策略链）
//! 5. 组装响应

use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::ContentResolver;
use crate::error::{AppError, AppResult};
use crate::models::{StudyQuery, StudyResponse};
use crate::services::{classify, validate_input, GenerationInput, ResponseGenerator};
use crate::utils::truncate_text;

/// 学习请求处理流程
///
/// - 不持有可变状态，请求之间互不影响
/// - 百科查询和生成都通过注入的能力完成
pub struct StudyFlow {
    resolver: Arc<dyn ContentResolver>,
    generator: ResponseGenerator,
}

impl StudyFlow {
    pub fn new(resolver: Arc<dyn ContentResolver>, generator: ResponseGenerator) -> Self {
        Self {
            resolver,
            generator,
        }
    }

    pub async fn handle(&self, query: &StudyQuery) -> AppResult<StudyResponse> {
        let request = validate_input(query)?;
        let topic = request.topic.as_str();
        let mode = request.mode;

        let classification = classify(topic);
        info!(
            "📥 收到请求: \"{}\" (mode={}, 问句={})",
            truncate_text(topic, 60),
            mode,
            classification.is_question_like
        );

        let lenient = classification.is_question_like || mode.is_math();

        let (content, is_direct_question, source) = match self.resolver.resolve(topic).await {
            Ok(payload) => {
                info!(
                    "✓ 百科内容获取成功: {}，长度: {} 字符",
                    payload.title.as_deref().unwrap_or(topic),
                    payload.text.chars().count()
                );
                (payload.text, false, payload.source_reference)
            }
            Err(e) if lenient => {
                info!("百科查询失败，按直接提问处理: {}", e);
                (topic.to_string(), true, None)
            }
            Err(e) if e.is_not_found() => {
                warn!("❌ 未找到主题: {}", topic);
                return Err(AppError::topic_not_found(topic));
            }
            Err(e) => {
                warn!("❌ 百科查询失败: {}", e);
                return Err(e.into());
            }
        };

        let artifact = self
            .generator
            .generate(GenerationInput {
                content: &content,
                mode,
                is_direct_question,
            })
            .await;

        Ok(StudyResponse::new(topic, mode, artifact, source))
    }
}
