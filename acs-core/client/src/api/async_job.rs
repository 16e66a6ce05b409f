//! 异步任务 API
//!
//! 提供异步任务查询功能，包括：
//! - 查询任务结果
//! - 查询任务列表
//! - 等待同步模式下拿到的任务完成

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::client::AcsClient;
use crate::error::Result;
use crate::job::{JobPoller, JobStatus};
use crate::models::{AsyncJobResult, ListAsyncJobsResponse};
use crate::normalize;
use crate::params::{Command, Params, Verb};
use crate::transport::QUERY_ASYNC_JOB_RESULT;

/// `queryAsyncJobResult` 参数
#[derive(Debug, Clone, Default)]
pub struct QueryAsyncJobResultParams {
    pub job_id: String,
}

impl QueryAsyncJobResultParams {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

impl Command for QueryAsyncJobResultParams {
    type Response = AsyncJobResult;
    const NAME: &'static str = QUERY_ASYNC_JOB_RESULT;
    const VERB: Verb = Verb::Read;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("jobid", self.job_id.as_str());
        p
    }
}

/// `listAsyncJobs` 参数
#[derive(Debug, Clone, Default)]
pub struct ListAsyncJobsParams {
    /// 只返回该时间之后开始的任务，格式 `yyyy-MM-dd HH:mm:ss`
    pub start_date: Option<String>,
    pub account: Option<String>,
    pub domain_id: Option<String>,
    pub list_all: Option<bool>,
}

impl ListAsyncJobsParams {
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn with_account(mut self, account: impl Into<String>, domain_id: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self.domain_id = Some(domain_id.into());
        self
    }

    pub fn with_list_all(mut self, list_all: bool) -> Self {
        self.list_all = Some(list_all);
        self
    }
}

impl Command for ListAsyncJobsParams {
    type Response = ListAsyncJobsResponse;
    const NAME: &'static str = "listAsyncJobs";
    const VERB: Verb = Verb::Read;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set_opt("startdate", self.start_date.as_ref())
            .set_opt("account", self.account.as_ref())
            .set_opt("domainid", self.domain_id.as_ref())
            .set_bool("listall", self.list_all);
        p
    }
}

/// 异步任务 API
pub struct AsyncJobApi<'a> {
    client: &'a AcsClient,
}

impl<'a> AsyncJobApi<'a> {
    pub(crate) fn new(client: &'a AcsClient) -> Self {
        Self { client }
    }

    /// 查询任务结果（完整响应）
    pub async fn query_result(&self, params: QueryAsyncJobResultParams) -> Result<AsyncJobResult> {
        info!("查询异步任务结果: {}", params.job_id);
        self.client.execute(&params).await
    }

    /// 查询一次任务状态
    pub async fn status(&self, job_id: &str) -> Result<JobStatus> {
        info!("查询异步任务状态: {}", job_id);
        self.client.transport().poll_job_status(job_id).await
    }

    /// 查询任务列表
    pub async fn list(&self, params: ListAsyncJobsParams) -> Result<ListAsyncJobsResponse> {
        info!("查询异步任务列表");
        self.client.execute(&params).await
    }

    /// 等待任务完成，返回规范化后的结果
    ///
    /// 使用客户端配置的超时与轮询间隔，不受 `async_mode` 影响
    pub async fn wait(&self, job_id: &str, cancel: &CancellationToken) -> Result<Value> {
        let poller = JobPoller::new(self.client.transport(), self.client.options());
        let payload = poller.wait(job_id, cancel).await?;
        Ok(normalize::normalize(normalize::unwrap_envelope(payload)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let params = QueryAsyncJobResultParams::new("J1").to_params();
        assert_eq!(params.get("jobid"), Some("J1"));
        assert_eq!(QueryAsyncJobResultParams::NAME, "queryAsyncJobResult");
        assert_eq!(QueryAsyncJobResultParams::VERB, Verb::Read);
    }
}
