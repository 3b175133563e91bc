use serde::{Deserialize, Serialize};

/// `POST /mark_attendance` 的请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    /// 分组标签
    pub category: String,
    /// 扫描得到的二维码内容
    pub qr_code: String,
}
