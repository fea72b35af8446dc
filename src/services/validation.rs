//! 输入校验
//!
//! 把原始查询参数变成 `StudyRequest`，不合法时返回 400 对应的错误。

use crate::error::{AppError, AppResult};
use crate::models::{Mode, StudyQuery, StudyRequest};

/// 主题最大长度（字符数，去除首尾空白后）
pub const MAX_TOPIC_CHARS: usize = 200;

/// 校验主题和模式
pub fn validate_input(query: &StudyQuery) -> AppResult<StudyRequest> {
    let topic = query
        .topic
        .as_deref()
        .ok_or_else(|| AppError::validation("Topic parameter is required"))?
        .trim();

    if topic.is_empty() {
        return Err(AppError::validation("Topic cannot be empty"));
    }

    if topic.chars().count() > MAX_TOPIC_CHARS {
        return Err(AppError::validation(format!(
            "Topic must be {} characters or less",
            MAX_TOPIC_CHARS
        )));
    }

    let mode = parse_mode(query.mode.as_deref())?;

    Ok(StudyRequest {
        topic: topic.to_string(),
        mode,
    })
}

/// 解析模式参数；缺省或空字符串视为 normal
pub fn parse_mode(mode: Option<&str>) -> AppResult<Mode> {
    match mode {
        None | Some("") => Ok(Mode::Normal),
        Some("normal") => Ok(Mode::Normal),
        Some("math") => Ok(Mode::Math),
        Some(_) => Err(AppError::validation(
            "Mode must be either \"math\" or \"normal\" (or omitted)",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(topic: Option<&str>, mode: Option<&str>) -> StudyQuery {
        StudyQuery {
            topic: topic.map(str::to_string),
            mode: mode.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_topic() {
        let err = validate_input(&query(None, None)).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Topic parameter is required");
    }

    #[test]
    fn test_empty_and_whitespace_topic() {
        for topic in ["", "   ", "\t\n"] {
            let err = validate_input(&query(Some(topic), None)).unwrap_err();
            assert_eq!(err.to_string(), "Topic cannot be empty");
        }
    }

    #[test]
    fn test_topic_length_limit() {
        let ok = "a".repeat(MAX_TOPIC_CHARS);
        assert!(validate_input(&query(Some(&ok), None)).is_ok());

        let padded = format!("   {}   ", ok);
        assert!(validate_input(&query(Some(&padded), None)).is_ok());

        let too_long = "a".repeat(MAX_TOPIC_CHARS + 1);
        let err = validate_input(&query(Some(&too_long), None)).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_topic_is_trimmed() {
        let req = validate_input(&query(Some("  Gravity  "), None)).unwrap();
        assert_eq!(req.topic, "Gravity");
        assert_eq!(req.mode, Mode::Normal);
    }

    #[test]
    fn test_mode_values() {
        assert_eq!(parse_mode(None).unwrap(), Mode::Normal);
        assert_eq!(parse_mode(Some("")).unwrap(), Mode::Normal);
        assert_eq!(parse_mode(Some("normal")).unwrap(), Mode::Normal);
        assert_eq!(parse_mode(Some("math")).unwrap(), Mode::Math);
        assert!(parse_mode(Some("invalid")).is_err());
        assert!(parse_mode(Some("MATH")).is_err());
    }
}
