//! 本地模拟生成 - 业务能力层
//!
//! 不访问任何外部服务，输入相同则输出相同，且永远不会失败。
//! 所有测验题按构造保证 4 个选项、正确下标在 0..=3。

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{Mode, QuizItem, SolutionSteps, StudyArtifact};
use crate::services::classifier::{format_number, LinearEquation};
use crate::utils::truncate_text;

/// 句子分隔符
static SENTENCE_TERMINATORS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[.!?]+").ok());

/// 句子最短长度（字符）
const MIN_SENTENCE_CHARS: usize = 20;
/// 要点最大长度（字符）
const SUMMARY_MAX_CHARS: usize = 150;
/// 要点补齐用的固定句子
const FILLER_SENTENCE: &str =
    "This topic contains important information that requires careful study and understanding.";

const TOPIC_STUDY_TIP: &str = "Break down complex topics into smaller chunks. Use the Feynman technique: explain the concept in simple terms as if teaching someone else. Review the key points regularly.";
const MATH_STUDY_TIP: &str = "For math topics, focus on understanding the step-by-step process rather than memorizing formulas. Practice solving similar problems to build confidence. Work through examples methodically and understand why each step is necessary.";
const EQUATION_STUDY_TIP: &str = "For linear equations, always isolate the variable by performing inverse operations on both sides. Work step-by-step and check your answer by substituting back into the original equation.";
const PROBLEM_STUDY_TIP: &str = "Break down complex problems into smaller steps. Identify what you know and what you need to find. Look for patterns and apply relevant formulas or concepts.";

/// 主题模式下的参数（普通 / 数学两套）
struct TopicProfile {
    /// 重要词最短长度（不含）
    term_min_len: usize,
    /// 重要词数量上限
    term_cap: usize,
    /// 题干引用句子的长度阈值
    stem_excerpt_chars: usize,
    generic_stems: [&'static str; 3],
    first_fallbacks: [&'static str; 4],
    second_options: [&'static str; 4],
    third_fallbacks: [&'static str; 4],
    study_tip: &'static str,
}

const NORMAL_PROFILE: TopicProfile = TopicProfile {
    term_min_len: 6,
    term_cap: 10,
    stem_excerpt_chars: 80,
    generic_stems: [
        "What is a key concept mentioned in this topic?",
        "Which statement best describes this topic?",
        "What is an important aspect of this topic?",
    ],
    first_fallbacks: [
        "The primary concept",
        "The secondary concept",
        "An important detail",
        "A related topic",
    ],
    second_options: [
        "It is a fundamental concept",
        "It has practical applications",
        "It requires careful study",
        "It involves multiple aspects",
    ],
    third_fallbacks: [
        "Historical context",
        "Modern applications",
        "Theoretical foundation",
        "Practical examples",
    ],
    study_tip: TOPIC_STUDY_TIP,
};

const MATH_PROFILE: TopicProfile = TopicProfile {
    term_min_len: 4,
    term_cap: 15,
    stem_excerpt_chars: 100,
    generic_stems: [
        "What is a fundamental mathematical concept mentioned in this topic?",
        "Which mathematical operation is most relevant to this topic?",
        "What is an important application of the mathematical concepts in this topic?",
    ],
    first_fallbacks: [
        "Core mathematical principle",
        "Key calculation method",
        "Important mathematical formula",
        "Mathematical application",
    ],
    second_options: [
        "Basic arithmetic",
        "Algebraic manipulation",
        "Calculus operations",
        "Statistical analysis",
    ],
    third_fallbacks: ["Problem-solving", "Data analysis", "Modeling", "Optimization"],
    study_tip: MATH_STUDY_TIP,
};

/// 题干引用句子时的前缀（按题目位置）
const STEM_PREFIXES: [&str; 3] = [
    "According to the content,",
    "Based on the information,",
    "The content suggests that",
];

/// 本地模拟生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGenerator;

impl MockGenerator {
    pub fn new() -> Self {
        Self
    }

    /// 生成学习材料
    pub fn build(&self, content: &str, mode: Mode, is_direct_question: bool) -> StudyArtifact {
        if is_direct_question {
            direct_question(content, mode)
        } else {
            match mode {
                Mode::Normal => topic(content, &NORMAL_PROFILE, mode),
                Mode::Math => topic(content, &MATH_PROFILE, mode),
            }
        }
    }
}

// ========== 直接提问 ==========

fn direct_question(question: &str, mode: Mode) -> StudyArtifact {
    match LinearEquation::extract(question).and_then(|eq| eq.solve().map(|x| (eq, x))) {
        Some((equation, x)) => solved_equation(question, &equation, x, mode),
        None => open_problem(question),
    }
}

fn solved_equation(question: &str, eq: &LinearEquation, x: f64, mode: Mode) -> StudyArtifact {
    let value = format_number(x);
    let answer = format!("x = {}", value);

    let summary = vec![
        format!("Question: {}", question),
        format!("Solution: {}", answer),
        format!(
            "Verification: Substitute x = {} back into the equation to confirm",
            value
        ),
    ];

    let quiz = [
        QuizItem::new(
            format!("What is the value of x in the equation {}?", question),
            [
                answer.clone(),
                format!("x = {}", format_number(x + 1.0)),
                format!("x = {}", format_number(x - 1.0)),
                format!("x = {}", format_number(x * 2.0)),
            ],
            0,
        ),
        QuizItem::new(
            "What is the first step to solve this equation?",
            options([
                "Isolate the variable term",
                "Multiply both sides",
                "Add to both sides",
                "Square both sides",
            ]),
            0,
        ),
        principle_question(),
    ];

    let solution = mode.is_math().then(|| SolutionSteps {
        steps: equation_steps(eq, x),
    });

    StudyArtifact {
        summary,
        quiz,
        study_tip: EQUATION_STUDY_TIP.to_string(),
        solution,
    }
}

/// 解方程步骤，最后一行代回原方程验证
fn equation_steps(eq: &LinearEquation, x: f64) -> Vec<String> {
    let (a, b, c) = (eq.coefficient, eq.constant, eq.rhs);
    let isolated = eq.isolated_rhs();

    vec![
        format!("Given equation: {}x + {} = {}", a, b, c),
        format!("Step 1: Subtract {} from both sides", b),
        format!("{}x = {} - {}", a, c, b),
        format!("{}x = {}", a, isolated),
        format!("Step 2: Divide both sides by {}", a),
        format!("x = {} ÷ {}", isolated, a),
        format!("x = {}", format_number(x)),
        format!(
            "Verification: {}({}) + {} = {} + {} = {} ✓",
            a,
            format_number(x),
            b,
            format_number(a as f64 * x),
            b,
            c
        ),
    ]
}

fn open_problem(question: &str) -> StudyArtifact {
    StudyArtifact {
        summary: vec![
            format!("Question: {}", question),
            "This appears to be a question or problem that requires analysis.".to_string(),
            "Please provide more context or rephrase the question for better assistance."
                .to_string(),
        ],
        quiz: [
            QuizItem::new(
                "What type of problem is this?",
                options(["Mathematical", "Logical", "Analytical", "Conceptual"]),
                0,
            ),
            QuizItem::new(
                "How should you approach this problem?",
                options(["Break it down", "Guess randomly", "Skip it", "Give up"]),
                0,
            ),
            principle_question(),
        ],
        study_tip: PROBLEM_STUDY_TIP.to_string(),
        solution: None,
    }
}

fn principle_question() -> QuizItem {
    QuizItem::new(
        "What mathematical principle is being applied?",
        options([
            "Algebraic manipulation",
            "Geometric reasoning",
            "Statistical analysis",
            "Calculus",
        ]),
        0,
    )
}

// ========== 主题内容 ==========

fn topic(content: &str, profile: &TopicProfile, mode: Mode) -> StudyArtifact {
    let sentences = split_sentences(content);
    let summary = build_summary(content, &sentences);
    let terms = important_terms(content, profile.term_min_len, profile.term_cap);

    let quiz = [
        QuizItem::new(
            quiz_stem(&sentences, 0, profile),
            term_options(&terms, 0, profile.first_fallbacks),
            0,
        ),
        QuizItem::new(
            quiz_stem(&sentences, 1, profile),
            options(profile.second_options),
            1,
        ),
        QuizItem::new(
            quiz_stem(&sentences, 2, profile),
            term_options(&terms, 4, profile.third_fallbacks),
            2,
        ),
    ];

    let solution = mode.is_math().then(|| SolutionSteps {
        steps: vec![
            format!("Key Concept: {}", summary[0]),
            format!("Application: {}", summary[1]),
            "Practice: Work through multiple examples to build proficiency".to_string(),
            "Verification: Always check your work and understand each step".to_string(),
        ],
    });

    StudyArtifact {
        summary,
        quiz,
        study_tip: profile.study_tip.to_string(),
        solution,
    }
}

/// 按句末标点切分，丢弃不足 20 个字符的片段
pub fn split_sentences(content: &str) -> Vec<String> {
    let Some(re) = SENTENCE_TERMINATORS.as_ref() else {
        return Vec::new();
    };

    re.split(content)
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

/// 恰好 3 条要点
///
/// 句子不够时按位置补齐：第 1 条取正文 0..150，第 2 条取 150..300，
/// 第 3 条（或切片为空时）用固定句子
pub fn build_summary(content: &str, sentences: &[String]) -> Vec<String> {
    (0..3)
        .map(|i| match sentences.get(i) {
            Some(sentence) => truncate_text(sentence, SUMMARY_MAX_CHARS),
            None => {
                let slice = match i {
                    0 => char_slice(content, 0, SUMMARY_MAX_CHARS),
                    1 => char_slice(content, SUMMARY_MAX_CHARS, SUMMARY_MAX_CHARS * 2),
                    _ => String::new(),
                };
                let slice = slice.trim();
                if slice.is_empty() {
                    FILLER_SENTENCE.to_string()
                } else {
                    slice.to_string()
                }
            }
        })
        .collect()
}

/// 按字符截取 `[start, end)`，越界自动收窄
fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// 重要词：长度大于 `min_len`、大写字母开头，按首次出现排序去重，最多 `cap` 个
///
/// 按空白切出的原始片段判断，附带的标点保留（`Newton,` 算 7 个字符）
pub fn important_terms(content: &str, min_len: usize, cap: usize) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for token in content.split_whitespace() {
        let qualifies = token.chars().count() > min_len
            && token.chars().next().is_some_and(|c| c.is_ascii_uppercase());

        if qualifies && !terms.iter().any(|t| t == token) {
            terms.push(token.to_string());
            if terms.len() == cap {
                break;
            }
        }
    }

    terms
}

fn quiz_stem(sentences: &[String], slot: usize, profile: &TopicProfile) -> String {
    match sentences.get(slot) {
        Some(sentence) if sentence.chars().count() > profile.stem_excerpt_chars => format!(
            "{} {}?",
            STEM_PREFIXES[slot],
            truncate_text(sentence, profile.stem_excerpt_chars)
        ),
        _ => profile.generic_stems[slot].to_string(),
    }
}

/// 从 `terms[offset..offset + 4]` 取选项，缺的位置用固定选项
fn term_options(terms: &[String], offset: usize, fallbacks: [&str; 4]) -> [String; 4] {
    std::array::from_fn(|i| {
        terms
            .get(offset + i)
            .cloned()
            .unwrap_or_else(|| fallbacks[i].to_string())
    })
}

fn options(items: [&str; 4]) -> [String; 4] {
    items.map(str::to_string)
}
