//! 考勤提交服务 - 业务能力层
//!
//! 只负责"用会话提交二维码"能力

use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;
use crate::error::{RelayError, RelayResult};
use crate::infrastructure::RemoteClient;
use crate::models::{SessionHandle, SuccessMarker};

const SUBMIT_REFERER: &str = "/v2/timetable";
const STATUS_CODE_POINTER: &str = "/output/data/code";

/// 考勤提交服务
#[derive(Clone)]
pub struct AttendanceSubmitter {
    client: RemoteClient,
    submit_path: String,
    marker: SuccessMarker,
}

impl AttendanceSubmitter {
    pub fn new(client: RemoteClient, config: &Config) -> Self {
        Self {
            client,
            submit_path: config.submit_path.clone(),
            marker: SuccessMarker::new(config.success_marker.clone()),
        }
    }

    /// 提交二维码，成功时原样返回远程状态码
    ///
    /// 会话只用于这一次提交。状态码不含成功标记时返回
    /// `AttendanceRejected`，其中携带原始状态码。
    pub async fn submit(&self, session: &SessionHandle, scanned_code: &str) -> RelayResult<String> {
        let body = json!({
            "attendanceId": scanned_code,
            "StuID": session.remote_id,
            "offQrCdEnbld": true,
        });
        let cookie = format!("connect.sid={}", session.token);

        let response = self
            .client
            .post_json(&self.submit_path, SUBMIT_REFERER, &body, Some(&cookie))
            .await?;

        debug!("提交响应状态: {}", response.status());

        let text = response
            .text()
            .await
            .map_err(|e| RelayError::from_reqwest(self.submit_path.as_str(), e))?;
        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| RelayError::protocol(self.submit_path.as_str(), e.to_string()))?;

        let code = payload
            .pointer(STATUS_CODE_POINTER)
            .and_then(Value::as_str)
            .ok_or_else(|| RelayError::protocol(self.submit_path.as_str(), "响应中没有 output.data.code"))?;

        if self.marker.is_success(code) {
            Ok(code.to_string())
        } else {
            Err(RelayError::AttendanceRejected {
                code: code.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn submitter_for(server: &MockServer) -> AttendanceSubmitter {
        let config = Config {
            remote_base_url: server.uri(),
            ..Config::default()
        };
        let client = RemoteClient::new(&config).unwrap();
        AttendanceSubmitter::new(client, &config)
    }

    fn status_body(code: &str) -> Value {
        json!({ "output": { "data": { "code": code } } })
    }

    #[tokio::test]
    async fn test_submit_success_returns_code_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/Attendance/record-online-attendance"))
            .and(header("cookie", "connect.sid=tok"))
            .and(body_json(json!({
                "attendanceId": "QR-1",
                "StuID": "STU-1",
                "offQrCdEnbld": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(status_body("Success")))
            .expect(1)
            .mount(&server)
            .await;

        let code = submitter_for(&server)
            .submit(&SessionHandle::new("tok", "STU-1"), "QR-1")
            .await
            .unwrap();
        assert_eq!(code, "Success");
    }

    #[tokio::test]
    async fn test_rejected_code_is_carried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/Attendance/record-online-attendance"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(status_body("ATTENDANCE_NOT_VALID")),
            )
            .mount(&server)
            .await;

        let err = submitter_for(&server)
            .submit(&SessionHandle::new("tok", "STU-1"), "QR-1")
            .await
            .unwrap_err();
        match err {
            RelayError::AttendanceRejected { code } => assert_eq!(code, "ATTENDANCE_NOT_VALID"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_code_is_protocol_violation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/Attendance/record-online-attendance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": {} })))
            .mount(&server)
            .await;

        let err = submitter_for(&server)
            .submit(&SessionHandle::new("tok", "STU-1"), "QR-1")
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::ProtocolViolation { .. }));
    }
}
