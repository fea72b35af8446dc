use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::api;
use crate::clients::WikipediaClient;
use crate::config::Config;
use crate::services::ResponseGenerator;
use crate::utils::logging;
use crate::workflow::StudyFlow;

/// 应用主结构
pub struct App {
    config: Config,
    router: Router,
}

impl App {
    /// 初始化应用：按配置组装百科客户端和生成策略链
    pub fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let resolver = WikipediaClient::new(&config)?;
        let generator = ResponseGenerator::from_config(&config)?;
        let flow = StudyFlow::new(Arc::new(resolver), generator);

        Ok(Self {
            router: api::router(Arc::new(flow)),
            config,
        })
    }

    /// 路由（测试中可直接调用）
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// 绑定端口并持续提供服务
    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!("✓ 服务已就绪: http://{}", addr);

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
