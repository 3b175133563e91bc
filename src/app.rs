use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::RemoteClient;
use crate::models::load_account_directory;
use crate::orchestrator::FanOutOrchestrator;
use crate::server;
use crate::services::{AttendanceSubmitter, SessionAcquirer};
use crate::utils::logging::log_startup;
use crate::workflow::AccountPipeline;

/// 应用主结构
pub struct App {
    config: Config,
    orchestrator: FanOutOrchestrator,
}

impl App {
    /// 初始化应用：加载账号表，创建远程客户端
    pub async fn initialize(config: Config) -> Result<Self> {
        let directory = load_account_directory(Path::new(&config.accounts_file))
            .await
            .with_context(|| format!("无法加载账号文件: {}", config.accounts_file))?;

        let client = RemoteClient::new(&config)?;
        let pipeline = AccountPipeline::new(
            SessionAcquirer::new(client.clone(), &config),
            AttendanceSubmitter::new(client, &config),
        );
        let orchestrator = FanOutOrchestrator::new(Arc::new(directory), pipeline);

        log_startup(&config, orchestrator.directory());

        Ok(Self {
            config,
            orchestrator,
        })
    }

    /// 监听配置的地址并提供服务，直到进程退出
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .map_err(|source| AppError::BindFailed {
                addr: self.config.bind_addr.clone(),
                source,
            })?;

        self.serve(listener).await
    }

    /// 在已绑定的监听器上提供服务
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        info!("✓ 开始监听 {}", listener.local_addr()?);
        axum::serve(listener, server::router(self.orchestrator))
            .await
            .context("HTTP 服务异常退出")?;
        Ok(())
    }
}
