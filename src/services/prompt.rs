//! 提示词模板
//!
//! 按"输入类型 × 模式"选择模板，两个 LLM 提供方共用同一套模板。

use crate::models::Mode;

/// 系统消息
pub const SYSTEM_MESSAGE: &str =
    "You are an educational assistant. Always respond with valid JSON only, no additional text.";

/// 主题内容写入提示词前的最大字符数
pub const MAX_CONTENT_CHARS: usize = 1000;

/// 普通要点数量
pub const SUMMARY_POINTS: usize = 3;

/// 7W + How 要点数量
pub const SEVEN_WS_POINTS: usize = 8;

const QUIZ_SKELETON: &str = r#"  "quiz": [
    {
      "question": "question1",
      "options": ["option1", "option2", "option3", "option4"],
      "correctAnswer": 0
    },
    {
      "question": "question2",
      "options": ["option1", "option2", "option3", "option4"],
      "correctAnswer": 1
    },
    {
      "question": "question3",
      "options": ["option1", "option2", "option3", "option4"],
      "correctAnswer": 2
    }
  ],"#;

/// 模板种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// 直接提问 / 题目
    DirectQuestion { math: bool },
    /// 直接提问，按 7W + How 展开
    SevenWs,
    /// 数学主题
    MathTopic,
    /// 普通主题
    Topic,
}

impl PromptKind {
    /// 选择模板
    ///
    /// 7W 模板只用于普通模式下的直接提问
    pub fn select(mode: Mode, is_direct_question: bool, seven_ws_enabled: bool) -> Self {
        match (is_direct_question, mode) {
            (true, Mode::Normal) if seven_ws_enabled => PromptKind::SevenWs,
            (true, mode) => PromptKind::DirectQuestion {
                math: mode.is_math(),
            },
            (false, Mode::Math) => PromptKind::MathTopic,
            (false, Mode::Normal) => PromptKind::Topic,
        }
    }

    /// 期望的要点数量
    pub fn expected_summary_len(&self) -> usize {
        match self {
            PromptKind::SevenWs => SEVEN_WS_POINTS,
            _ => SUMMARY_POINTS,
        }
    }

    /// 生成用户消息
    pub fn render(&self, content: &str) -> String {
        match self {
            PromptKind::DirectQuestion { math } => direct_question_prompt(content, *math),
            PromptKind::SevenWs => seven_ws_prompt(content),
            PromptKind::MathTopic => math_topic_prompt(&clip(content)),
            PromptKind::Topic => topic_prompt(&clip(content)),
        }
    }
}

/// 截取前 `MAX_CONTENT_CHARS` 个字符（不加省略号）
fn clip(content: &str) -> String {
    content.chars().take(MAX_CONTENT_CHARS).collect()
}

fn direct_question_prompt(question: &str, math: bool) -> String {
    let solution_item = if math {
        "A detailed step-by-step solution showing how to solve the problem (as an array of strings)"
    } else {
        ""
    };
    let solution_field = if math {
        "\n  \"solution\": { \"steps\": [\"Given: equation\", \"Step 1: operation\", \"Step 2: operation\", \"Final answer\", \"Verification: check\"] },"
    } else {
        ""
    };

    format!(
        r#"You are a helpful study assistant. The user has asked: "{question}"

Please solve this problem or answer this question, then generate educational content:
1. A brief explanation/solution in exactly 3 bullet points
2. Three multiple-choice quiz questions related to this problem with 4 options each and the correct answer index (0-3)
3. {solution_item}
4. A study tip for mastering this type of problem

Format the response as JSON with this structure:
{{
  "summary": ["point1 with solution", "point2", "point3"],
{QUIZ_SKELETON}{solution_field}
  "studyTip": "tip text"
}}"#
    )
}

fn seven_ws_prompt(question: &str) -> String {
    format!(
        r#"You are a helpful study assistant. The user has asked: "{question}"

Please answer this question comprehensively using the 7 W's and How framework:

- WHAT: What is it? (Definition and core concept)
- WHY: Why is it important? (Significance and relevance)
- WHEN: When is it used/relevant? (Time context and applications)
- WHERE: Where is it applied? (Contexts and domains)
- WHO: Who uses/benefits from it? (Target audience and stakeholders)
- WHICH: Which types/categories exist? (Classifications and variations)
- WHOM: Whom does it affect? (Impact and beneficiaries)
- HOW: How does it work? (Process and mechanism)

Then generate:
1. A comprehensive summary covering the 7 W's and How (as an array of 8 points, one for each W/How)
2. Three multiple-choice quiz questions with 4 options each and the correct answer index (0-3)
3. A study tip

Format the response as JSON with this structure:
{{
  "summary": [
    "WHAT: [definition and core concept]",
    "WHY: [importance and significance]",
    "WHEN: [timing, context, and when it's used]",
    "WHERE: [location, domain, and where it's applied]",
    "WHO: [users, stakeholders, and who benefits]",
    "WHICH: [types, categories, and variations]",
    "WHOM: [affected parties and beneficiaries]",
    "HOW: [process, mechanism, and how it works]"
  ],
{QUIZ_SKELETON}
  "studyTip": "tip text"
}}"#
    )
}

fn math_topic_prompt(content: &str) -> String {
    format!(
        r#"Based on the following content about "{content}", generate:
1. A brief summary in exactly 3 bullet points (make them specific to the content)
2. Three multiple-choice quiz questions with 4 options each and the correct answer index (0-3)
3. A detailed step-by-step solution or explanation (as an array of strings)
4. A study tip for mastering this topic

Format the response as JSON with this structure:
{{
  "summary": ["point1", "point2", "point3"],
{QUIZ_SKELETON}
  "solution": {{
    "steps": ["Key concept 1", "Key concept 2", "Application example", "Important note"]
  }},
  "studyTip": "tip text"
}}"#
    )
}

fn topic_prompt(content: &str) -> String {
    format!(
        r#"Based on the following content: "{content}", generate:
1. A brief summary in exactly 3 bullet points
2. Three multiple-choice quiz questions with 4 options each and the correct answer index (0-3)
3. A helpful study tip

Format the response as JSON with this structure:
{{
  "summary": ["point1", "point2", "point3"],
{QUIZ_SKELETON}
  "studyTip": "tip text"
}}"#
    )
}
