//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! fan_out::FanOutOrchestrator (处理一个分组的 Vec<AccountRecord>)
//!     ↓  每个账号一个任务
//! workflow::AccountPipeline (处理单个账号)
//!     ↓
//! services (能力层：登录 / 提交)
//!     ↓
//! infrastructure (基础设施：RemoteClient)
//!
//! 结果通道 → result_streamer::ResultStreamer → HTTP 响应体
//! ```
//!
//! ## 设计原则
//!
//! 1. **失败隔离**：错误在 AccountPipeline 内部变成结果，编排层只负责调度
//! 2. **完成即输出**：结果按完成顺序写出，不等最慢的账号
//! 3. **单写者**：只有 ResultStreamer 写响应体

pub mod fan_out;
pub mod result_streamer;

pub use fan_out::FanOutOrchestrator;
pub use result_streamer::{parse_line, ResultStreamer};
