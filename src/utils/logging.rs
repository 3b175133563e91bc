//! 日志工具模块
//!
//! 提供日志初始化和格式化输出的辅助函数

use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::AccountDirectory;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 info，开启详细日志时为 debug。可重复调用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 单次请求的处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, directory: &AccountDirectory) {
    info!("{}", "=".repeat(60));
    info!("🚀 考勤中继启动");
    info!("🌐 监听地址: {}", config.bind_addr);
    info!("🔗 远程服务: {}", config.remote_base_url);
    info!("👥 账号数量: {}", directory.len());
    info!("🏷️ 分组: {}", directory.groups().join(", "));
    info!("{}", "=".repeat(60));
}

/// 记录请求开始
pub fn log_request_start(group: &str, matched: usize) {
    if matched == 0 {
        info!("⚠️ 分组 {} 没有匹配的账号", group);
    } else {
        info!("📦 分组 {}: 开始处理 {} 个账号", group, matched);
    }
}

/// 记录请求完成统计
pub fn log_request_complete(group: &str, stats: &RequestStats, elapsed: Duration) {
    info!("{}", "─".repeat(60));
    info!(
        "✓ 分组 {} 完成: 成功 {}/{}，失败 {}，耗时 {:.2}s",
        group,
        stats.success,
        stats.total,
        stats.failed,
        elapsed.as_secs_f64()
    );
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
