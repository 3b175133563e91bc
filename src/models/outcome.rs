use serde::Serialize;

/// 单个账号的最终结果，每次流程恰好产生一个
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceOutcome {
    pub display_name: String,
    pub status: String,
    pub success: bool,
}

impl AttendanceOutcome {
    pub fn new(display_name: impl Into<String>, status: impl Into<String>, success: bool) -> Self {
        Self {
            display_name: display_name.into(),
            status: status.into(),
            success,
        }
    }

    /// 失败结果，状态文本格式为 `Error - <message>`
    pub fn error(display_name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::new(display_name, format!("Error - {}", message), false)
    }
}

/// 成功标记
///
/// 与前端一致：状态文本中包含标记（忽略大小写）即为成功。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessMarker(String);

impl SuccessMarker {
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_success(&self, status: &str) -> bool {
        status.to_uppercase().contains(&self.0.to_uppercase())
    }
}

impl Default for SuccessMarker {
    fn default() -> Self {
        Self::new("SUCCESS")
    }
}
