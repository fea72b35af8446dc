//! 输入分类
//!
//! 纯函数：判断输入是"直接提问/数学题"还是"主题名"，
//! 以及从题目中提取形如 `3x + 5 = 20` 的一元一次方程。

use regex::Regex;
use std::sync::LazyLock;

/// 问句特征：包含 `?` / `=`，或以疑问/祈使词开头
static QUESTION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)[?=]|^(what|how|why|when|where|who|solve|calculate|find)").ok()
});

/// `<整数> x + <整数> = <整数>`
static LINEAR_EQUATION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(?P<coefficient>\d+)\s*x\s*\+\s*(?P<constant>\d+)\s*=\s*(?P<rhs>\d+)").ok()
});

/// 分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_question_like: bool,
}

/// 对主题文本分类
pub fn classify(topic: &str) -> Classification {
    Classification {
        is_question_like: is_question_like(topic),
    }
}

/// 是否是问句或数学题
pub fn is_question_like(topic: &str) -> bool {
    QUESTION_PATTERN
        .as_ref()
        .map(|re| re.is_match(topic))
        .unwrap_or(false)
}

/// 一元一次方程 `coefficient·x + constant = rhs`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearEquation {
    pub coefficient: i64,
    pub constant: i64,
    pub rhs: i64,
}

impl LinearEquation {
    /// 在文本中查找第一个方程
    ///
    /// 数字超出 i64 范围时视为未匹配
    pub fn extract(text: &str) -> Option<Self> {
        let re = LINEAR_EQUATION_PATTERN.as_ref()?;
        let caps = re.captures(text)?;

        Some(Self {
            coefficient: caps.name("coefficient")?.as_str().parse().ok()?,
            constant: caps.name("constant")?.as_str().parse().ok()?,
            rhs: caps.name("rhs")?.as_str().parse().ok()?,
        })
    }

    /// `rhs - constant`
    pub fn isolated_rhs(&self) -> i64 {
        self.rhs.saturating_sub(self.constant)
    }

    /// x = (rhs - constant) / coefficient，浮点除法，不取整
    ///
    /// 系数为 0 时无解
    pub fn solve(&self) -> Option<f64> {
        if self.coefficient == 0 {
            return None;
        }
        Some(self.isolated_rhs() as f64 / self.coefficient as f64)
    }
}

/// 浮点数格式化，整数值保留 ".0"（5 → "5.0"，2.5 → "2.5"）
///
/// 始终输出普通十进制，不用科学计数法
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}.0", value)
    } else {
        format!("{}", value)
    }
}
