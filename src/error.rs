use thiserror::Error;

/// 单个账号处理过程中的错误
///
/// 四种错误都会在 `AccountPipeline` 边界被捕获并转换为该账号的结果，
/// 不会向编排层传播，也不会中断其他账号的流程。
#[derive(Debug, Error)]
pub enum RelayError {
    /// 远程登录拒绝了凭据，或者返回的凭据响应无法使用
    #[error("登录失败: {0}")]
    AuthenticationFailure(String),

    /// 远程响应结构与预期不符
    #[error("响应格式错误 ({endpoint}): {detail}")]
    ProtocolViolation { endpoint: String, detail: String },

    /// 无法连接远程服务或请求超时
    #[error("网络请求失败 ({endpoint}): {source}")]
    NetworkFailure {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 远程服务返回了非成功的考勤状态码
    #[error("考勤被拒绝: {code}")]
    AttendanceRejected { code: String },
}

impl RelayError {
    /// 根据 reqwest 错误的类型归类
    ///
    /// 响应体解码失败属于协议错误，其余（连接、超时、传输）都是网络错误。
    pub fn from_reqwest(endpoint: impl Into<String>, err: reqwest::Error) -> Self {
        let endpoint = endpoint.into();
        if err.is_decode() {
            RelayError::ProtocolViolation {
                endpoint,
                detail: err.to_string(),
            }
        } else {
            RelayError::NetworkFailure {
                endpoint,
                source: err,
            }
        }
    }

    pub fn protocol(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        RelayError::ProtocolViolation {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    /// 错误种类的简短名称（仅用于日志）
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::AuthenticationFailure(_) => "AuthenticationFailure",
            RelayError::ProtocolViolation { .. } => "ProtocolViolation",
            RelayError::NetworkFailure { .. } => "NetworkFailure",
            RelayError::AttendanceRejected { .. } => "AttendanceRejected",
        }
    }
}

/// 启动阶段的错误（配置、账号文件、监听端口）
#[derive(Debug, Error)]
pub enum AppError {
    #[error("读取文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("账号 {identity} 没有任何分组")]
    EmptyGroupSet { identity: String },

    #[error("账号 {identity} 重复出现")]
    DuplicateAccount { identity: String },

    #[error("无法监听地址 {addr}: {source}")]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP 客户端初始化失败: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// 单个账号流程的结果类型
pub type RelayResult<T> = Result<T, RelayError>;

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
