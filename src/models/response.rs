use serde::{Deserialize, Serialize};

use super::study::{Mode, StudyArtifact};

/// 未查到百科来源时的 `source` 字段
pub const AI_GENERATED_SOURCE: &str = "AI-generated response";

/// `GET /api/study` 成功响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyResponse {
    pub topic: String,
    pub mode: Mode,
    #[serde(flatten)]
    pub artifact: StudyArtifact,
    pub source: String,
}

impl StudyResponse {
    pub fn new(
        topic: impl Into<String>,
        mode: Mode,
        artifact: StudyArtifact,
        source: Option<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            mode,
            artifact,
            source: source.unwrap_or_else(|| AI_GENERATED_SOURCE.to_string()),
        }
    }
}

/// 错误响应体 `{error, message}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// `GET /health` 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}
