//! 登录服务 - 业务能力层
//!
//! 只负责"用账号密码换取会话"能力，不关心提交

use reqwest::header::SET_COOKIE;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;
use crate::error::{RelayError, RelayResult};
use crate::infrastructure::RemoteClient;
use crate::models::SessionHandle;

const LOGIN_REFERER: &str = "/v2/";
const STUDENT_ID_POINTER: &str = "/output/data/logindetails/Student/0/StuID";

/// 登录服务
///
/// 每次调用恰好发出一个登录请求，不重试，不缓存会话。
#[derive(Clone)]
pub struct SessionAcquirer {
    client: RemoteClient,
    login_path: String,
}

impl SessionAcquirer {
    pub fn new(client: RemoteClient, config: &Config) -> Self {
        Self {
            client,
            login_path: config.login_path.clone(),
        }
    }

    /// 登录并返回会话
    ///
    /// # 错误
    /// - `NetworkFailure`: 无法连接或超时
    /// - `ProtocolViolation`: 响应体不是 JSON
    /// - `AuthenticationFailure`: 响应中没有 StuID，或 Set-Cookie 缺失/格式错误
    pub async fn acquire_session(&self, identity: &str, secret: &str) -> RelayResult<SessionHandle> {
        let body = json!({
            "dtype": "M",
            "Email": identity,
            "pwd": secret,
        });

        let response = self
            .client
            .post_json(&self.login_path, LOGIN_REFERER, &body, None)
            .await?;

        debug!("登录响应状态: {}", response.status());

        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .map(|value| value.to_str().map(str::to_string));

        let text = response
            .text()
            .await
            .map_err(|e| RelayError::from_reqwest(self.login_path.as_str(), e))?;
        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| RelayError::protocol(self.login_path.as_str(), e.to_string()))?;

        let remote_id = extract_student_id(&payload).ok_or_else(|| {
            RelayError::AuthenticationFailure("登录响应中没有 StuID".to_string())
        })?;

        let header = match set_cookie {
            Some(Ok(header)) => header,
            Some(Err(_)) => {
                return Err(RelayError::AuthenticationFailure(
                    "Set-Cookie 不是合法的文本".to_string(),
                ))
            }
            None => {
                return Err(RelayError::AuthenticationFailure(
                    "登录响应中没有 Set-Cookie".to_string(),
                ))
            }
        };

        let token = parse_session_cookie(&header).ok_or_else(|| {
            RelayError::AuthenticationFailure("无法从 Set-Cookie 中解析会话".to_string())
        })?;

        Ok(SessionHandle::new(token, remote_id))
    }
}

/// 从 Set-Cookie 中取出会话值
///
/// 按 `;` 分割取第一段，再按 `=` 分割取第二个元素。
/// `connect.sid=abc; Path=/; HttpOnly` → `abc`
pub fn parse_session_cookie(header: &str) -> Option<String> {
    header
        .split(';')
        .next()
        .and_then(|segment| segment.split('=').nth(1))
        .map(str::to_string)
}

/// StuID 可能是字符串也可能是数字
fn extract_student_id(payload: &Value) -> Option<String> {
    match payload.pointer(STUDENT_ID_POINTER)? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
