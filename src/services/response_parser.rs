//! LLM 响应解析与规范化
//!
//! 把提供方返回的文本变成 `StudyArtifact`。任何解析或结构问题都返回
//! `GenerationError`，由生成器转向下一个策略。

use serde::Deserialize;
use tracing::debug;

use crate::error::GenerationError;
use crate::models::{Mode, QuizItem, SolutionSteps, StudyArtifact};

/// 测验题数量
pub const QUIZ_ITEMS: usize = 3;

/// 提供方响应文本格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// 纯 JSON，可能包在 ``` 代码块里
    FencedJson,
    /// 可能夹杂说明文字，需要先找出第一个完整的 `{...}`
    EmbeddedJson,
}

/// 提供方返回的 JSON 结构（宽松读取，随后校验）
#[derive(Debug, Deserialize)]
struct ProviderPayload {
    summary: Vec<String>,
    quiz: Vec<QuizItem>,
    #[serde(default, rename = "studyTip")]
    study_tip: String,
    #[serde(default)]
    solution: Option<SolutionSteps>,
}

/// 去掉 ```json 和 ``` 标记
pub fn strip_code_fences(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// 找出第一个括号配平的 `{...}` 片段
///
/// 字符串字面量中的括号不计入配平
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// 解析并规范化提供方响应
///
/// - `expected_summary_len`：3，或 7W 模板下的 8
/// - 非数学模式下 `solution` 一律置空
pub fn parse_artifact(
    raw: &str,
    format: ResponseFormat,
    mode: Mode,
    expected_summary_len: usize,
) -> Result<StudyArtifact, GenerationError> {
    let stripped = strip_code_fences(raw);
    let json_text = match format {
        ResponseFormat::FencedJson => stripped.as_str(),
        ResponseFormat::EmbeddedJson => extract_json_object(&stripped).unwrap_or(&stripped),
    };

    debug!("解析 LLM 响应 JSON，长度: {} 字符", json_text.len());

    let payload: ProviderPayload = serde_json::from_str(json_text)?;
    normalize(payload, mode, expected_summary_len)
}

fn normalize(
    payload: ProviderPayload,
    mode: Mode,
    expected_summary_len: usize,
) -> Result<StudyArtifact, GenerationError> {
    if payload.summary.len() != expected_summary_len {
        return Err(GenerationError::MalformedShape(format!(
            "expected {} summary points, got {}",
            expected_summary_len,
            payload.summary.len()
        )));
    }

    if let Some(item) = payload.quiz.iter().find(|item| item.correct_answer > 3) {
        return Err(GenerationError::MalformedShape(format!(
            "correctAnswer {} out of range [0, 3]",
            item.correct_answer
        )));
    }

    let quiz_len = payload.quiz.len();
    let quiz: [QuizItem; QUIZ_ITEMS] = payload.quiz.try_into().map_err(|_| {
        GenerationError::MalformedShape(format!(
            "expected {} quiz items, got {}",
            QUIZ_ITEMS, quiz_len
        ))
    })?;

    let solution = if mode.is_math() {
        payload.solution.filter(|s| !s.steps.is_empty())
    } else {
        None
    };

    Ok(StudyArtifact {
        summary: payload.summary,
        quiz,
        study_tip: payload.study_tip,
        solution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "summary": ["one", "two", "three"],
        "quiz": [
            {"question": "q1", "options": ["a", "b", "c", "d"], "correctAnswer": 0},
            {"question": "q2", "options": ["a", "b", "c", "d"], "correctAnswer": 1},
            {"question": "q3", "options": ["a", "b", "c", "d"], "correctAnswer": 2}
        ],
        "studyTip": "Review often.",
        "solution": {"steps": ["Given", "Step 1", "Answer"]}
    }"#;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_extract_json_object() {
        let text = r#"Sure! Here it is: {"a": {"b": "}"}} and some trailing text {"c": 1}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": {"b": "}"}}"#));
        assert_eq!(extract_json_object("no braces here"), None);
        assert_eq!(extract_json_object("{ unbalanced"), None);
    }

    #[test]
    fn test_parse_fenced_math() {
        let raw = format!("```json\n{}\n```", VALID);
        let artifact = parse_artifact(&raw, ResponseFormat::FencedJson, Mode::Math, 3).unwrap();
        assert_eq!(artifact.summary, vec!["one", "two", "three"]);
        assert_eq!(artifact.quiz[1].correct_answer, 1);
        assert_eq!(artifact.study_tip, "Review often.");
        assert_eq!(artifact.solution.unwrap().steps.len(), 3);
    }

    #[test]
    fn test_solution_dropped_outside_math_mode() {
        let artifact = parse_artifact(VALID, ResponseFormat::FencedJson, Mode::Normal, 3).unwrap();
        assert!(artifact.solution.is_none());
    }

    #[test]
    fn test_missing_solution_is_none_in_math_mode() {
        let raw = VALID.replace(r#""solution": {"steps": ["Given", "Step 1", "Answer"]}"#, r#""x": 1"#);
        let artifact = parse_artifact(&raw, ResponseFormat::FencedJson, Mode::Math, 3).unwrap();
        assert!(artifact.solution.is_none());
    }

    #[test]
    fn test_embedded_json_needs_extraction() {
        let raw = format!("Here is your study material:\n{}\nGood luck!", VALID);
        assert!(parse_artifact(&raw, ResponseFormat::FencedJson, Mode::Normal, 3).is_err());
        assert!(parse_artifact(&raw, ResponseFormat::EmbeddedJson, Mode::Normal, 3).is_ok());
    }

    #[test]
    fn test_malformed_shapes() {
        let two_points = VALID.replace(r#"["one", "two", "three"]"#, r#"["one", "two"]"#);
        assert!(matches!(
            parse_artifact(&two_points, ResponseFormat::FencedJson, Mode::Normal, 3),
            Err(GenerationError::MalformedShape(_))
        ));

        let bad_index = VALID.replace(r#""correctAnswer": 2"#, r#""correctAnswer": 7"#);
        assert!(matches!(
            parse_artifact(&bad_index, ResponseFormat::FencedJson, Mode::Normal, 3),
            Err(GenerationError::MalformedShape(_))
        ));

        let three_options = VALID.replacen(r#"["a", "b", "c", "d"]"#, r#"["a", "b", "c"]"#, 1);
        assert!(matches!(
            parse_artifact(&three_options, ResponseFormat::FencedJson, Mode::Normal, 3),
            Err(GenerationError::JsonParseFailed(_))
        ));

        assert!(matches!(
            parse_artifact("not json", ResponseFormat::FencedJson, Mode::Normal, 3),
            Err(GenerationError::JsonParseFailed(_))
        ));
    }

    #[test]
    fn test_seven_ws_expects_eight_points() {
        assert!(parse_artifact(VALID, ResponseFormat::FencedJson, Mode::Normal, 8).is_err());
    }
}
