//! 客户端配置

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AcsError, Result};

/// ACS 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcsConfig {
    /// API 地址，如 `https://cloud.example.com/client/api`
    pub endpoint: String,

    /// API Key
    pub api_key: String,

    /// Secret Key（用于请求签名）
    pub secret_key: String,

    /// 连接超时（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// 请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// 是否验证 SSL 证书
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,

    /// 异步任务配置
    #[serde(default)]
    pub async_options: AsyncOptions,
}

/// 异步任务配置
///
/// 在构造客户端时传入，之后不可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsyncOptions {
    /// 是否等待异步任务完成；关闭后直接返回带 jobid 的初始响应
    #[serde(default = "default_async_mode")]
    pub async_mode: bool,

    /// 等待任务完成的最长时间（毫秒）
    #[serde(default = "default_job_timeout_ms")]
    pub timeout_ms: u64,

    /// 初始轮询间隔（毫秒），每次轮询后递增同样的量
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// 最大轮询间隔（毫秒）
    #[serde(default = "default_max_poll_interval")]
    pub max_poll_interval: u64,
}

impl Default for AsyncOptions {
    fn default() -> Self {
        Self {
            async_mode: default_async_mode(),
            timeout_ms: default_job_timeout_ms(),
            poll_interval: default_poll_interval(),
            max_poll_interval: default_max_poll_interval(),
        }
    }
}

impl AsyncOptions {
    /// 同步模式：不轮询任务
    pub fn sync() -> Self {
        Self {
            async_mode: false,
            ..Default::default()
        }
    }

    /// 设置等待超时
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval.max(1))
    }

    pub fn max_poll_interval(&self) -> Duration {
        Duration::from_millis(self.max_poll_interval.max(self.poll_interval).max(1))
    }

    /// 第 `attempt` 次轮询（从 0 开始）之后的等待时间
    ///
    /// 线性递增，不超过 `max_poll_interval`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let step = self.poll_interval();
        step.saturating_mul(attempt.saturating_add(1))
            .min(self.max_poll_interval())
    }
}

impl AcsConfig {
    /// 使用默认超时创建配置
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            verify_ssl: default_verify_ssl(),
            async_options: AsyncOptions::default(),
        }
    }

    /// 设置异步任务配置
    pub fn with_async_options(mut self, options: AsyncOptions) -> Self {
        self.async_options = options;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| AcsError::ConfigError(format!("无效的 API 地址 {}: {}", self.endpoint, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AcsError::ConfigError(format!(
                "不支持的协议: {}",
                url.scheme()
            )));
        }
        if self.api_key.is_empty() {
            return Err(AcsError::ConfigError("api_key 不能为空".to_string()));
        }
        if self.secret_key.is_empty() {
            return Err(AcsError::ConfigError("secret_key 不能为空".to_string()));
        }

        Ok(())
    }
}

// 默认值函数
fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    60
}

fn default_verify_ssl() -> bool {
    true
}

fn default_async_mode() -> bool {
    true
}

fn default_job_timeout_ms() -> u64 {
    300_000
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_max_poll_interval() -> u64 {
    15000
}
