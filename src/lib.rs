//! # Attendance Relay
//!
//! 扫描一次考勤二维码，为分组内的所有账号并发签到，并逐行流式返回结果
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 客户端），只暴露能力
//! - `RemoteClient` - 唯一的 reqwest::Client 持有者，提供 post_json() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个账号
//! - `SessionAcquirer` - 登录换取会话
//! - `AttendanceSubmitter` - 用会话提交二维码
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个账号"的完整处理流程
//! - `AccountPipeline` - 登录 → 提交 → 结果，失败隔离的边界
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/fan_out` - 按分组选账号，每个账号一个任务
//! - `orchestrator/result_streamer` - 按完成顺序逐行写出
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod server;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, RelayError};
pub use models::{AccountDirectory, AccountRecord, AttendanceOutcome, SessionHandle, SuccessMarker};
pub use orchestrator::{FanOutOrchestrator, ResultStreamer};
pub use workflow::AccountPipeline;
