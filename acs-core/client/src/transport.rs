//! 传输层
//!
//! [`Transport`] 负责发送已签名的请求并返回原始响应体，
//! 命令调用与任务轮询都只通过这个 trait 访问平台。

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::AcsConfig;
use crate::error::{AcsError, Result};
use crate::job::JobStatus;
use crate::normalize;
use crate::params::{Params, Verb};
use crate::signing;

/// 查询异步任务结果的命令名
pub const QUERY_ASYNC_JOB_RESULT: &str = "queryAsyncJobResult";

/// 传输层 trait
///
/// 实现需要可以在多个并发调用之间共享（只读）
#[async_trait]
pub trait Transport: Send + Sync {
    /// 提交命令，返回原始响应体
    async fn submit(&self, command: &str, params: &Params, verb: Verb) -> Result<Vec<u8>>;

    /// 查询一次任务状态，不做重试
    async fn poll_job_status(&self, job_id: &str) -> Result<JobStatus> {
        let mut params = Params::new();
        params.set("jobid", job_id);

        let body = self.submit(QUERY_ASYNC_JOB_RESULT, &params, Verb::Read).await?;
        JobStatus::from_body(&body)
    }
}

/// 基于 reqwest 的 HTTP 传输实现
pub struct HttpTransport {
    /// API 地址
    endpoint: String,

    /// HTTP 客户端
    http_client: Client,

    api_key: String,

    secret_key: String,
}

impl HttpTransport {
    /// 创建新的 HTTP 传输
    pub fn new(config: &AcsConfig) -> Result<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| AcsError::HttpError(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            http_client,
            api_key: config.api_key.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    /// 获取 API 地址
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, command: &str, params: &Params, verb: Verb) -> Result<Vec<u8>> {
        let signed = signing::signed_params(command, params, &self.api_key, &self.secret_key)?;
        debug!("ACS API 请求: {} {}", verb, command);

        let request = match verb {
            Verb::Read => self
                .http_client
                .get(format!("{}?{}", self.endpoint, signed.encode())),
            Verb::Write => self
                .http_client
                .post(&self.endpoint)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(signed.encode()),
        };

        let response = request
            .send()
            .await
            .map_err(|e| AcsError::HttpError(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AcsError::HttpError(e.to_string()))?;

        if !status.is_success() {
            warn!("API 请求失败: {} - {}", command, status);
            return Err(error_from_body(status.as_u16(), &body));
        }

        Ok(body.to_vec())
    }
}

/// 将失败响应转换为错误，优先使用平台的错误信封
fn error_from_body(status: u16, body: &[u8]) -> AcsError {
    match normalize::decode_envelope(body) {
        Err(err @ AcsError::ApiError(..)) => err,
        _ => AcsError::ApiError(status, String::from_utf8_lossy(body).into_owned()),
    }
}
