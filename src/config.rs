use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP 服务监听地址
    pub bind_addr: String,
    // --- 远程考勤服务 ---
    pub remote_base_url: String,
    pub login_path: String,
    pub submit_path: String,
    /// 单次远程请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 账号表 TOML 文件
    pub accounts_file: String,
    /// 成功标记，状态码中包含该字符串（忽略大小写）即视为成功
    pub success_marker: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8787".to_string(),
            remote_base_url: "https://student.bennetterp.camu.in".to_string(),
            login_path: "/login/validate".to_string(),
            submit_path: "/api/Attendance/record-online-attendance".to_string(),
            request_timeout_secs: 30,
            accounts_file: "accounts.toml".to_string(),
            success_marker: "SUCCESS".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            remote_base_url: std::env::var("REMOTE_BASE_URL").unwrap_or(default.remote_base_url),
            login_path: std::env::var("LOGIN_PATH").unwrap_or(default.login_path),
            submit_path: std::env::var("SUBMIT_PATH").unwrap_or(default.submit_path),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            accounts_file: std::env::var("ACCOUNTS_FILE").unwrap_or(default.accounts_file),
            success_marker: std::env::var("SUCCESS_MARKER").ok().filter(|v| !v.is_empty()).unwrap_or(default.success_marker),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
