//! # Study Assistant
//!
//! 一个根据主题生成学习材料（要点、测验、学习建议、解题步骤）的 HTTP 服务
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 外部协作方（Clients）
//! - `clients/` - 只负责和外部 HTTP 服务通信
//! - `WikipediaClient` - 百科摘要 / 整页内容
//! - `OpenAiClient` - Provider A
//! - `GeminiClient` - Provider B
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心请求从哪里来
//! - `validation` / `classifier` - 输入校验与分类
//! - `ResponseGenerator` - 策略链（Provider A → Provider B → 本地模拟）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次请求"的完整处理流程
//! - `StudyFlow` - 校验 → 分类 → 查询百科 → 生成 → 响应
//!
//! ### ④ 接口层（API）
//! - `api/` - axum 路由，错误映射为 `{error, message}`
//! - `App` - 组装各层并提供服务
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult, GenerationError, ResolveError};
pub use models::{Mode, StudyArtifact, StudyQuery, StudyResponse};
pub use services::ResponseGenerator;
pub use workflow::StudyFlow;
