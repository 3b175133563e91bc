//! 并发分发器 - 编排层
//!
//! ## 职责
//!
//! 1. **选择账号**：从 AccountDirectory 取出属于指定分组的账号
//! 2. **并发执行**：每个账号一个 tokio 任务，全部同时启动，不限并发
//! 3. **即时转发**：任务完成后立即把结果推入通道，按完成顺序输出
//! 4. **等待全部**：所有任务结束后关闭通道，响应随之结束
//!
//! 不做超时控制，也不会因为某个账号先完成而取消其他账号。

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::models::{AccountDirectory, AttendanceOutcome};
use crate::utils::logging::{log_request_complete, log_request_start, RequestStats};
use crate::workflow::AccountPipeline;

/// 并发分发器
#[derive(Clone)]
pub struct FanOutOrchestrator {
    directory: Arc<AccountDirectory>,
    pipeline: AccountPipeline,
}

impl FanOutOrchestrator {
    pub fn new(directory: Arc<AccountDirectory>, pipeline: AccountPipeline) -> Self {
        Self {
            directory,
            pipeline,
        }
    }

    pub fn directory(&self) -> &AccountDirectory {
        &self.directory
    }

    /// 为分组内的每个账号签到
    ///
    /// 返回的通道按完成顺序产出结果，每个匹配账号恰好一个；
    /// 所有任务结束后通道关闭。没有匹配账号时通道立即关闭。
    ///
    /// 必须在 tokio 运行时中调用。
    pub fn handle(&self, group: &str, scanned_code: &str) -> mpsc::Receiver<AttendanceOutcome> {
        let accounts = self.directory.accounts_in_group(group);
        let total = accounts.len();
        // 每个账号最多发送一次，容量足够时发送永远不会等待
        let (tx, rx) = mpsc::channel(total.max(1));

        log_request_start(group, total);

        if accounts.is_empty() {
            return rx;
        }

        let pipeline = self.pipeline.clone();
        let scanned_code = scanned_code.to_string();
        let group = group.to_string();

        tokio::spawn(async move {
            let started = Instant::now();
            let mut handles = Vec::with_capacity(total);

            for account in accounts {
                let pipeline = pipeline.clone();
                let scanned_code = scanned_code.clone();
                let tx = tx.clone();
                let name = account.display_name.clone();

                let handle = tokio::spawn(async move {
                    let outcome = pipeline.run(&account, &scanned_code).await;
                    let success = outcome.success;
                    if tx.send(outcome).await.is_err() {
                        // 客户端已断开，继续完成其余账号
                        debug!("[{}] 客户端已断开，结果未发送", account.display_name);
                    }
                    success
                });
                handles.push((name, handle));
            }

            let mut stats = RequestStats {
                total,
                ..Default::default()
            };

            for (name, handle) in handles {
                match handle.await {
                    Ok(true) => stats.success += 1,
                    Ok(false) => stats.failed += 1,
                    Err(e) => {
                        error!("[{}] 任务执行失败: {}", name, e);
                        stats.failed += 1;
                        let outcome = AttendanceOutcome::error(name, format!("任务执行失败: {}", e));
                        let _ = tx.send(outcome).await;
                    }
                }
            }

            log_request_complete(&group, &stats, started.elapsed());
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::infrastructure::RemoteClient;
    use crate::models::AccountRecord;
    use crate::services::{AttendanceSubmitter, SessionAcquirer};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn account(identity: &str, name: &str, groups: &[&str]) -> AccountRecord {
        AccountRecord {
            identity: identity.to_string(),
            secret: "pw".to_string(),
            display_name: name.to_string(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn orchestrator_for(server: &MockServer, accounts: Vec<AccountRecord>) -> FanOutOrchestrator {
        let config = Config {
            remote_base_url: server.uri(),
            ..Config::default()
        };
        let client = RemoteClient::new(&config).unwrap();
        let pipeline = AccountPipeline::new(
            SessionAcquirer::new(client.clone(), &config),
            AttendanceSubmitter::new(client, &config),
        );
        FanOutOrchestrator::new(Arc::new(AccountDirectory::new(accounts)), pipeline)
    }

    async fn mount_login(server: &MockServer, identity: &str, stu_id: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path("/login/validate"))
            .and(body_partial_json(json!({ "Email": identity })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "output": { "data": { "logindetails": { "Student": [{ "StuID": stu_id }] } } }
                    }))
                    .insert_header("set-cookie", format!("connect.sid=tok-{stu_id}; Path=/"))
                    .set_delay(delay),
            )
            .mount(server)
            .await;
    }

    async fn mount_submit(server: &MockServer, stu_id: &str, code: &str) {
        Mock::given(method("POST"))
            .and(path("/api/Attendance/record-online-attendance"))
            .and(body_partial_json(json!({ "StuID": stu_id })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "output": { "data": { "code": code } } })),
            )
            .mount(server)
            .await;
    }

    async fn collect(mut rx: mpsc::Receiver<AttendanceOutcome>) -> Vec<AttendanceOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    #[tokio::test]
    async fn test_unknown_group_closes_immediately() {
        let server = MockServer::start().await;
        let orchestrator = orchestrator_for(&server, vec![account("a", "Alice", &["G6"])]);

        let outcomes = collect(orchestrator.handle("Nope", "QR")).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_one_outcome_per_matching_account() {
        let server = MockServer::start().await;
        mount_login(&server, "a", "A", Duration::ZERO).await;
        mount_login(&server, "b", "B", Duration::ZERO).await;
        mount_login(&server, "c", "C", Duration::ZERO).await;
        mount_submit(&server, "A", "SUCCESS").await;
        mount_submit(&server, "B", "SUCCESS").await;
        mount_submit(&server, "C", "ATTENDANCE_NOT_VALID").await;

        let orchestrator = orchestrator_for(
            &server,
            vec![
                account("a", "Alice", &["G6", "AI"]),
                account("b", "Bob", &["G6"]),
                account("x", "Xavier", &["Batch5"]),
                account("c", "Carol", &["G6", "DataScience"]),
            ],
        );

        let mut outcomes = collect(orchestrator.handle("G6", "QR")).await;
        outcomes.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        assert_eq!(
            outcomes,
            vec![
                AttendanceOutcome::new("Alice", "SUCCESS", true),
                AttendanceOutcome::new("Bob", "SUCCESS", true),
                AttendanceOutcome::new("Carol", "ATTENDANCE_NOT_VALID", false),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_does_not_affect_siblings() {
        let server = MockServer::start().await;
        mount_login(&server, "a", "A", Duration::ZERO).await;
        mount_submit(&server, "A", "SUCCESS").await;
        // b 没有登录 mock，wiremock 返回 404 空响应体

        let orchestrator = orchestrator_for(
            &server,
            vec![account("a", "Alice", &["G6"]), account("b", "Bob", &["G6"])],
        );

        let outcomes = collect(orchestrator.handle("G6", "QR")).await;
        assert_eq!(outcomes.len(), 2);

        let bob = outcomes.iter().find(|o| o.display_name == "Bob").unwrap();
        assert!(bob.status.starts_with("Error - "));
        assert!(!bob.success);

        let alice = outcomes.iter().find(|o| o.display_name == "Alice").unwrap();
        assert!(alice.success);
    }

    #[tokio::test]
    async fn test_fast_account_is_not_blocked_by_slow_one() {
        let server = MockServer::start().await;
        mount_login(&server, "slow", "S", Duration::from_millis(1500)).await;
        mount_login(&server, "fast", "F", Duration::ZERO).await;
        mount_submit(&server, "S", "SUCCESS").await;
        mount_submit(&server, "F", "SUCCESS").await;

        // 慢账号排在注册表前面
        let orchestrator = orchestrator_for(
            &server,
            vec![account("slow", "Slow", &["G6"]), account("fast", "Fast", &["G6"])],
        );

        let outcomes = collect(orchestrator.handle("G6", "QR")).await;
        let names: Vec<&str> = outcomes.iter().map(|o| o.display_name.as_str()).collect();
        assert_eq!(names, vec!["Fast", "Slow"]);
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_abort_pipelines() {
        let server = MockServer::start().await;
        mount_login(&server, "a", "A", Duration::from_millis(200)).await;
        Mock::given(method("POST"))
            .and(path("/api/Attendance/record-online-attendance"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "output": { "data": { "code": "SUCCESS" } } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let orchestrator = orchestrator_for(&server, vec![account("a", "Alice", &["G6"])]);
        drop(orchestrator.handle("G6", "QR"));

        // 接收端已丢弃，提交仍然会发生
        tokio::time::sleep(Duration::from_millis(800)).await;
        server.verify().await;
    }
}
