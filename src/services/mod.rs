//! 业务能力层（Services）
//!
//! 每个模块只描述一种能力，不关心请求从哪里来：
//! - `validation` - 查询参数校验
//! - `classifier` - 问题 / 方程识别
//! - `prompt` - 提示词模板
//! - `response_parser` - LLM 响应解析与规范化
//! - `mock_generator` - 本地确定性生成
//! - `generator` - 策略链（Provider A → Provider B → 本地模拟）

pub mod classifier;
pub mod generator;
pub mod mock_generator;
pub mod prompt;
pub mod response_parser;
pub mod validation;

pub use classifier::{classify, Classification};
pub use generator::{GenerationInput, GenerationStrategy, ProviderStrategy, ResponseGenerator};
pub use mock_generator::MockGenerator;
pub use validation::validate_input;
