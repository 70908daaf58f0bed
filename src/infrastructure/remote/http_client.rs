use crate::core::constants::network::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, USER_AGENT,
};
use crate::error::{AppError, AppResult};
use reqwest::{Client, Response};
use std::time::Duration;

/// 网络选项
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout_sec: u64,
    pub request_timeout_sec: u64,
    pub user_agent: String,
    /// 是否使用系统代理设置
    pub use_system_proxy: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout_sec: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_sec: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: USER_AGENT.to_string(),
            use_system_proxy: true,
        }
    }
}

/// HTTP 客户端包装器
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// 使用默认选项创建客户端
    pub fn new() -> AppResult<Self> {
        Self::with_options(&FetchOptions::default())
    }

    pub fn with_options(options: &FetchOptions) -> AppResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(options.connect_timeout_sec))
            .timeout(Duration::from_secs(options.request_timeout_sec))
            .user_agent(options.user_agent.as_str());
        if !options.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self { client })
    }

    /// GET 请求，非 2xx 状态视为错误
    pub async fn get(&self, url: &str) -> AppResult<Response> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::network(format!("server returned {status} for {url}")));
        }
        Ok(response)
    }

    /// 用 HEAD 请求检查 URL 是否存在
    pub async fn exists(&self, url: &str) -> AppResult<bool> {
        let response = self.client.head(url).send().await?;
        tracing::debug!(url, status = %response.status(), "HEAD");
        Ok(response.status().is_success())
    }
}
