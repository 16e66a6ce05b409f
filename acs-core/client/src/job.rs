//! 异步任务轮询
//!
//! 状态流转：`Submitted → Pending → {Succeeded, Failed}`，进入终态后不再变化。
//! 轮询在调用方的任务中进行，不创建后台任务，任务之间不共享状态。

use serde_json::{Map, Value};
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::AsyncOptions;
use crate::error::{AcsError, Result};
use crate::models::{AsyncJobResult, JobFailure, JobStatusCode};
use crate::normalize;
use crate::transport::Transport;

/// 单次查询得到的任务状态
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    /// 仍在执行
    Pending,
    /// 执行成功，携带结果
    Succeeded(Value),
    /// 执行失败，携带失败信息
    Failed(JobFailure),
}

impl JobStatus {
    /// 从 `queryAsyncJobResult` 响应体解析
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let envelope = normalize::decode_envelope(body)?;
        let result: AsyncJobResult = serde_json::from_value(envelope)?;
        Self::from_result(&result)
    }

    pub fn from_result(result: &AsyncJobResult) -> Result<Self> {
        match result.status_code() {
            Some(JobStatusCode::Pending) => Ok(JobStatus::Pending),
            Some(JobStatusCode::Succeeded) => Ok(JobStatus::Succeeded(
                result
                    .job_result
                    .clone()
                    .unwrap_or_else(|| Value::Object(Map::new())),
            )),
            Some(JobStatusCode::Failed) => Ok(JobStatus::Failed(JobFailure::from_job_result(
                &result.job_result_type,
                result.job_result.as_ref(),
            ))),
            None => Err(AcsError::ParseError(format!(
                "未知的任务状态: {}",
                result.job_status
            ))),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }
}

/// 任务生命周期状态，仅用于记录状态流转
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JobState {
    Submitted,
    Pending,
    Succeeded,
    Failed,
}

impl JobState {
    /// 收到一次查询结果后的状态，终态不再变化
    pub(crate) fn after(self, status: &JobStatus) -> Self {
        match (self, status) {
            (JobState::Succeeded | JobState::Failed, _) => self,
            (_, JobStatus::Pending) => JobState::Pending,
            (_, JobStatus::Succeeded(_)) => JobState::Succeeded,
            (_, JobStatus::Failed(_)) => JobState::Failed,
        }
    }
}

/// 任务轮询器
pub struct JobPoller<'a> {
    transport: &'a dyn Transport,
    options: &'a AsyncOptions,
}

impl<'a> JobPoller<'a> {
    pub fn new(transport: &'a dyn Transport, options: &'a AsyncOptions) -> Self {
        Self { transport, options }
    }

    /// 等待任务进入终态，返回成功结果
    ///
    /// - 任务失败返回 `JobFailed`
    /// - 截止时间前未进入终态返回 `JobTimeout`（不带部分响应）
    /// - `cancel` 触发后立即返回 `Cancelled`
    pub async fn wait(&self, job_id: &str, cancel: &CancellationToken) -> Result<Value> {
        let timeout = self.options.timeout();
        let deadline = Instant::now() + timeout;
        let mut state = JobState::Submitted;
        let mut attempt: u32 = 0;

        info!("等待异步任务: {} (超时 {:?})", job_id, timeout);

        loop {
            let status = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(job_id)),
                status = self.transport.poll_job_status(job_id) => status?,
                _ = sleep_until(deadline) => return Err(timed_out(job_id, timeout)),
            };

            let next = state.after(&status);
            if next != state {
                debug!("任务 {} 状态: {:?} -> {:?}", job_id, state, next);
                state = next;
            }

            match status {
                JobStatus::Succeeded(payload) => return Ok(payload),
                JobStatus::Failed(failure) => {
                    warn!("异步任务 {} 执行失败: {}", job_id, failure);
                    return Err(AcsError::JobFailed {
                        job_id: job_id.to_string(),
                        failure,
                    });
                }
                JobStatus::Pending => {}
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(timed_out(job_id, timeout));
            }

            let delay = self.options.backoff(attempt).min(deadline - now);
            attempt = attempt.saturating_add(1);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(job_id)),
                _ = sleep(delay) => {}
            }
        }
    }
}

fn timed_out(job_id: &str, timeout: std::time::Duration) -> AcsError {
    warn!("等待异步任务 {} 超时", job_id);
    AcsError::JobTimeout {
        job_id: job_id.to_string(),
        timeout,
        partial: None,
    }
}

fn cancelled(job_id: &str) -> AcsError {
    info!("停止等待异步任务: {}", job_id);
    AcsError::Cancelled(format!("等待任务 {} 时被取消", job_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_from_body() {
        let pending = br#"{"queryasyncjobresultresponse":{"jobid":"J1","jobstatus":0}}"#;
        assert_eq!(JobStatus::from_body(pending).unwrap(), JobStatus::Pending);

        let done = br#"{"queryasyncjobresultresponse":{"jobid":"J1","jobstatus":1,"jobresulttype":"object","jobresult":{"virtualmachine":{"id":"vm1"}}}}"#;
        assert_eq!(
            JobStatus::from_body(done).unwrap(),
            JobStatus::Succeeded(json!({ "virtualmachine": { "id": "vm1" } }))
        );

        let failed = br#"{"queryasyncjobresultresponse":{"jobid":"J1","jobstatus":2,"jobresulttype":"object","jobresult":{"errorcode":530,"errortext":"boom"}}}"#;
        match JobStatus::from_body(failed).unwrap() {
            JobStatus::Failed(failure) => {
                assert_eq!(failure.error_code, Some(530));
                assert_eq!(failure.error_text, "boom");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_is_parse_error() {
        let body = br#"{"jobid":"J1","jobstatus":7}"#;
        assert!(matches!(
            JobStatus::from_body(body),
            Err(AcsError::ParseError(_))
        ));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(JobStatus::Succeeded(json!({})).is_terminal());
        assert!(JobStatus::Failed(JobFailure::from_text("x")).is_terminal());
    }

    #[test]
    fn test_state_transitions() {
        let done = JobStatus::Succeeded(json!({}));
        let failed = JobStatus::Failed(JobFailure::from_text("x"));

        let state = JobState::Submitted.after(&JobStatus::Pending);
        assert_eq!(state, JobState::Pending);
        assert_eq!(state.after(&JobStatus::Pending), JobState::Pending);
        assert_eq!(state.after(&done), JobState::Succeeded);
        assert_eq!(JobState::Submitted.after(&failed), JobState::Failed);

        assert_eq!(JobState::Succeeded.after(&JobStatus::Pending), JobState::Succeeded);
        assert_eq!(JobState::Failed.after(&done), JobState::Failed);
    }
}
