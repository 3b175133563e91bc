//! 远程客户端 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端，只暴露"向考勤服务发 POST"的能力

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppResult, RelayError, RelayResult};

/// 远程客户端
///
/// 职责：
/// - 持有 reqwest::Client（内部为 Arc，clone 开销很小）
/// - 附带浏览器风格的请求头
/// - 不认识账号 / 会话
/// - 不解析业务响应
#[derive(Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
}

impl RemoteClient {
    /// 根据配置创建客户端，超时即为单次请求的超时
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            client,
            base_url: config.remote_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 发送 JSON POST 请求
    ///
    /// # 参数
    /// - `path`: 接口路径（如 `/login/validate`）
    /// - `referer_path`: referer 页面路径
    /// - `body`: 请求体
    /// - `cookie`: 可选的 Cookie 请求头
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        referer_path: &str,
        body: &T,
        cookie: Option<&str>,
    ) -> RelayResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let mut request = self
            .client
            .post(&url)
            .header("origin", self.base_url.as_str())
            .header("referer", format!("{}{}", self.base_url, referer_path))
            .json(body);

        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        request
            .send()
            .await
            .map_err(|e| RelayError::from_reqwest(path, e))
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.8"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("clienttzofst", HeaderValue::from_static("330"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
    headers
}
