//! 单账号流程 - 流程层
//!
//! 核心职责：定义"一个账号"的完整处理流程
//!
//! 流程顺序：
//! 1. 登录（SessionAcquirer）
//! 2. 提交二维码（AttendanceSubmitter）
//! 3. 生成结果（AttendanceOutcome）
//!
//! 这里是失败隔离的边界：任何错误都在这里变成该账号的结果，不会继续向上传播。

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::RelayError;
use crate::models::{AccountRecord, AttendanceOutcome};
use crate::services::{AttendanceSubmitter, SessionAcquirer};

/// 流程状态
///
/// `Idle → Authenticating → (Authenticated → Submitting → Completed) | Completed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Authenticating,
    Authenticated,
    Submitting,
    Completed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "Idle",
            PipelineState::Authenticating => "Authenticating",
            PipelineState::Authenticated => "Authenticated",
            PipelineState::Submitting => "Submitting",
            PipelineState::Completed => "Completed",
        };
        f.write_str(name)
    }
}

/// 单账号流程
///
/// - 不持有任何账号状态，可在多个任务之间 clone
/// - 每次 `run` 都重新登录，会话用完即丢弃
#[derive(Clone)]
pub struct AccountPipeline {
    acquirer: SessionAcquirer,
    submitter: AttendanceSubmitter,
}

impl AccountPipeline {
    pub fn new(acquirer: SessionAcquirer, submitter: AttendanceSubmitter) -> Self {
        Self {
            acquirer,
            submitter,
        }
    }

    /// 为单个账号签到，永远返回恰好一个结果
    pub async fn run(&self, account: &AccountRecord, scanned_code: &str) -> AttendanceOutcome {
        let mut tracker = StateTracker::new(&account.display_name);

        let outcome = match self.attempt(account, scanned_code, &mut tracker).await {
            Ok(code) => {
                info!("[{}] ✅ {}", account.display_name, code);
                AttendanceOutcome::new(&account.display_name, code, true)
            }
            Err(RelayError::AttendanceRejected { code }) => {
                info!("[{}] ❌ {}", account.display_name, code);
                AttendanceOutcome::new(&account.display_name, code, false)
            }
            Err(e) => {
                warn!("[{}] ⚠️ {} ({})", account.display_name, e, e.kind());
                AttendanceOutcome::error(&account.display_name, e)
            }
        };

        tracker.advance(PipelineState::Completed);
        outcome
    }

    async fn attempt(
        &self,
        account: &AccountRecord,
        scanned_code: &str,
        tracker: &mut StateTracker<'_>,
    ) -> Result<String, RelayError> {
        tracker.advance(PipelineState::Authenticating);
        let session = self
            .acquirer
            .acquire_session(&account.identity, &account.secret)
            .await?;
        tracker.advance(PipelineState::Authenticated);

        tracker.advance(PipelineState::Submitting);
        self.submitter.submit(&session, scanned_code).await
    }
}

/// 记录状态迁移，只向前走
struct StateTracker<'a> {
    name: &'a str,
    state: PipelineState,
}

impl<'a> StateTracker<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            state: PipelineState::Idle,
        }
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(next as u8 > self.state as u8, "{} → {}", self.state, next);
        debug!("[{}] {} → {}", self.name, self.state, next);
        self.state = next;
    }
}
