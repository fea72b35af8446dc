/// 程序配置
///
/// 所有字段在进程启动时从环境变量读取一次，随后以参数形式传入各层，
/// 不存在全局的 provider 选择状态。
#[derive(Clone, Debug)]
pub struct Config {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 直接提问（普通模式）是否使用 7W + How 提示词
    pub seven_ws_prompt: bool,
    // --- OpenAI 配置（Provider A）---
    pub openai_api_key: Option<String>,
    pub openai_api_base_url: String,
    pub openai_model_name: String,
    // --- Gemini 配置（Provider B）---
    pub gemini_api_key: Option<String>,
    pub gemini_api_base_url: String,
    pub gemini_model_name: String,
    /// Gemini 请求超时（秒）
    pub llm_timeout_secs: u64,
    // --- 百科 API 配置 ---
    pub wikipedia_api_base_url: String,
    pub wikipedia_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            verbose_logging: false,
            seven_ws_prompt: false,
            openai_api_key: None,
            openai_api_base_url: "https://api.openai.com/v1".to_string(),
            openai_model_name: "gpt-3.5-turbo".to_string(),
            gemini_api_key: None,
            gemini_api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            gemini_model_name: "gemini-1.5-flash".to_string(),
            llm_timeout_secs: 30,
            wikipedia_api_base_url: "https://en.wikipedia.org/api/rest_v1".to_string(),
            wikipedia_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(default.host),
            port: std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.port),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            seven_ws_prompt: std::env::var("SEVEN_WS_PROMPT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.seven_ws_prompt),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_api_base_url: std::env::var("OPENAI_API_BASE_URL").unwrap_or(default.openai_api_base_url),
            openai_model_name: std::env::var("OPENAI_MODEL_NAME").unwrap_or(default.openai_model_name),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_api_base_url: std::env::var("GEMINI_API_BASE_URL").unwrap_or(default.gemini_api_base_url),
            gemini_model_name: std::env::var("GEMINI_MODEL_NAME").unwrap_or(default.gemini_model_name),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_timeout_secs),
            wikipedia_api_base_url: std::env::var("WIKIPEDIA_API_BASE_URL").unwrap_or(default.wikipedia_api_base_url),
            wikipedia_timeout_secs: std::env::var("WIKIPEDIA_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.wikipedia_timeout_secs),
        }
    }

    /// 监听地址 `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 当前启用的 LLM 提供方名称（按优先级排列）
    pub fn active_providers(&self) -> Vec<&'static str> {
        let mut providers = Vec::new();
        if self.openai_api_key.is_some() {
            providers.push("openai");
        }
        if self.gemini_api_key.is_some() {
            providers.push("gemini");
        }
        providers
    }
}

/// 读取环境变量，空字符串视为未设置
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_providers() {
        let config = Config::default();
        assert!(config.active_providers().is_empty());
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.wikipedia_timeout_secs, 10);
    }

    #[test]
    fn test_active_providers_order() {
        let config = Config {
            openai_api_key: Some("sk-test".to_string()),
            gemini_api_key: Some("gm-test".to_string()),
            ..Default::default()
        };
        assert_eq!(config.active_providers(), vec!["openai", "gemini"]);

        let config = Config {
            gemini_api_key: Some("gm-test".to_string()),
            ..Default::default()
        };
        assert_eq!(config.active_providers(), vec!["gemini"]);
    }
}
