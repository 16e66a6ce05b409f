//! 测试用脚本化传输层

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use acs_client::{AcsError, JobStatus, Params, Result, Transport, Verb};
use async_trait::async_trait;

/// 按脚本返回响应的传输层
///
/// - 提交响应按 `id` 参数匹配，没有匹配时按顺序取默认队列
/// - 任务状态按 jobid 排队，只剩最后一个时重复返回
#[derive(Default)]
pub struct ScriptedTransport {
    submit_by_id: Mutex<HashMap<String, String>>,
    submit_queue: Mutex<VecDeque<std::result::Result<String, String>>>,
    job_statuses: Mutex<HashMap<String, VecDeque<JobStatus>>>,
    poll_delay: Option<Duration>,
    pub submits: Mutex<Vec<(String, Params, Verb)>>,
    pub polls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次查询任务状态前等待
    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = Some(delay);
        self
    }

    /// 下一次提交返回的响应体
    pub fn reply(self, body: &str) -> Self {
        self.submit_queue
            .lock()
            .unwrap()
            .push_back(Ok(body.to_string()));
        self
    }

    /// 下一次提交返回传输错误
    pub fn fail(self, message: &str) -> Self {
        self.submit_queue
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    /// `id` 参数为指定值时返回的响应体
    pub fn reply_for_id(self, id: &str, body: &str) -> Self {
        self.submit_by_id
            .lock()
            .unwrap()
            .insert(id.to_string(), body.to_string());
        self
    }

    /// 任务状态序列
    pub fn job(self, job_id: &str, statuses: Vec<JobStatus>) -> Self {
        self.job_statuses
            .lock()
            .unwrap()
            .insert(job_id.to_string(), statuses.into());
        self
    }

    pub fn submit_count(&self) -> usize {
        self.submits.lock().unwrap().len()
    }

    pub fn poll_count(&self) -> usize {
        self.polls.lock().unwrap().len()
    }

    pub fn polls_for(&self, job_id: &str) -> usize {
        self.polls
            .lock()
            .unwrap()
            .iter()
            .filter(|id| id.as_str() == job_id)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn submit(&self, command: &str, params: &Params, verb: Verb) -> Result<Vec<u8>> {
        self.submits
            .lock()
            .unwrap()
            .push((command.to_string(), params.clone(), verb));

        let by_id = params
            .get("id")
            .and_then(|id| self.submit_by_id.lock().unwrap().get(id).cloned());
        if let Some(body) = by_id {
            return Ok(body.into_bytes());
        }

        match self.submit_queue.lock().unwrap().pop_front() {
            Some(Ok(body)) => Ok(body.into_bytes()),
            Some(Err(message)) => Err(AcsError::HttpError(message)),
            None => Err(AcsError::HttpError(format!("没有为 {} 准备响应", command))),
        }
    }

    async fn poll_job_status(&self, job_id: &str) -> Result<JobStatus> {
        if let Some(delay) = self.poll_delay {
            tokio::time::sleep(delay).await;
        }

        self.polls.lock().unwrap().push(job_id.to_string());

        let mut jobs = self.job_statuses.lock().unwrap();
        let queue = jobs
            .get_mut(job_id)
            .ok_or_else(|| AcsError::HttpError(format!("未知任务 {}", job_id)))?;

        if queue.len() > 1 {
            Ok(queue.pop_front().unwrap_or(JobStatus::Pending))
        } else {
            Ok(queue.front().cloned().unwrap_or(JobStatus::Pending))
        }
    }
}

/// 只实现 `submit` 的传输层，任务查询走默认的 `queryAsyncJobResult` 实现
///
/// 响应体按提交顺序返回
#[derive(Default)]
pub struct SubmitOnlyTransport {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, Verb, Option<String>)>>,
}

impl SubmitOnlyTransport {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|body| body.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 记录的调用：命令、请求方式、`jobid` 参数
    pub fn calls(&self) -> Vec<(String, Verb, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for SubmitOnlyTransport {
    async fn submit(&self, command: &str, params: &Params, verb: Verb) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push((
            command.to_string(),
            verb,
            params.get("jobid").map(str::to_string),
        ));

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .map(String::into_bytes)
            .ok_or_else(|| AcsError::HttpError(format!("没有为 {} 准备响应", command)))
    }
}
