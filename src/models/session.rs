/// 登录得到的会话
///
/// 只用于一次提交，用完即丢弃，不在账号之间或请求之间共享。
#[derive(Clone, PartialEq, Eq)]
pub struct SessionHandle {
    /// `connect.sid` 的值
    pub token: String,
    /// 远程服务分配给该账号的 StuID
    pub remote_id: String,
}

impl SessionHandle {
    pub fn new(token: impl Into<String>, remote_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            remote_id: remote_id.into(),
        }
    }
}

// 不在日志中输出 token
impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("token", &"<redacted>")
            .field("remote_id", &self.remote_id)
            .finish()
    }
}
