use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 学习模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Math,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Math => "math",
        }
    }

    pub fn is_math(&self) -> bool {
        matches!(self, Mode::Math)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GET /api/study` 的原始查询参数（未校验）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudyQuery {
    pub topic: Option<String>,
    pub mode: Option<String>,
}

/// 校验通过的学习请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyRequest {
    /// 去除首尾空白后的主题，1..=200 个字符
    pub topic: String,
    pub mode: Mode,
}

/// 百科查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPayload {
    pub text: String,
    pub title: Option<String>,
    pub source_reference: Option<String>,
}

/// 单选题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    pub question: String,
    /// 固定 4 个选项
    pub options: [String; 4],
    /// 正确选项下标，取值 0..=3
    pub correct_answer: u8,
}

impl QuizItem {
    pub fn new(question: impl Into<String>, options: [String; 4], correct_answer: u8) -> Self {
        Self {
            question: question.into(),
            options,
            correct_answer: correct_answer.min(3),
        }
    }
}

/// 分步解答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionSteps {
    pub steps: Vec<String>,
}

/// 学习材料：一次请求的最终产物，构造后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyArtifact {
    /// 3 条要点；7W 直接提问模式下为 8 条
    pub summary: Vec<String>,
    pub quiz: [QuizItem; 3],
    pub study_tip: String,
    /// 仅数学模式下可能存在
    pub solution: Option<SolutionSteps>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Math).unwrap(), "\"math\"");
        assert_eq!(Mode::default(), Mode::Normal);
        assert_eq!(Mode::Normal.to_string(), "normal");
    }

    #[test]
    fn test_quiz_item_camel_case() {
        let item = QuizItem::new(
            "What is 2 + 2?",
            ["3".into(), "4".into(), "5".into(), "6".into()],
            1,
        );
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["correctAnswer"], 1);
        assert_eq!(value["options"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_quiz_item_rejects_wrong_option_count() {
        let json = r#"{"question":"q","options":["a","b","c"],"correctAnswer":0}"#;
        assert!(serde_json::from_str::<QuizItem>(json).is_err());
    }

    #[test]
    fn test_quiz_item_new_clamps_index() {
        let item = QuizItem::new("q", Default::default(), 9);
        assert_eq!(item.correct_answer, 3);
    }
}
