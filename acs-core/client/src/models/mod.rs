//! 通用数据模型
//!
//! 各服务专属的参数与响应类型定义在 `api` 下对应文件中，
//! 这里只放跨服务共用的部分。

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 仅包含执行结果的响应（删除类命令）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// 是否成功（平台有时返回字符串，解码前已规范化）
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub displaytext: Option<String>,

    /// 同步模式下异步命令返回的任务 ID
    #[serde(rename = "jobid", default)]
    pub job_id: Option<String>,
}

/// 异步任务状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatusCode {
    /// 执行中 (0)
    Pending,
    /// 执行成功 (1)
    Succeeded,
    /// 执行失败 (2)
    Failed,
}

impl JobStatusCode {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Succeeded),
            2 => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Pending => 0,
            Self::Succeeded => 1,
            Self::Failed => 2,
        }
    }
}

/// `queryAsyncJobResult` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsyncJobResult {
    #[serde(rename = "jobid", default)]
    pub job_id: String,

    /// 0 执行中，1 成功，2 失败
    #[serde(rename = "jobstatus", default)]
    pub job_status: i64,

    #[serde(rename = "jobprocstatus", default)]
    pub job_proc_status: i64,

    #[serde(rename = "jobresultcode", default)]
    pub job_result_code: i64,

    /// `object` 或 `text`
    #[serde(rename = "jobresulttype", default)]
    pub job_result_type: String,

    /// 任务结果，成功时为结果对象，失败时为错误信息
    #[serde(rename = "jobresult", default)]
    pub job_result: Option<Value>,

    #[serde(default)]
    pub cmd: String,

    #[serde(default)]
    pub created: Option<String>,

    #[serde(default)]
    pub completed: Option<String>,

    #[serde(rename = "jobinstancetype", default)]
    pub job_instance_type: Option<String>,

    #[serde(rename = "jobinstanceid", default)]
    pub job_instance_id: Option<String>,

    #[serde(rename = "accountid", default)]
    pub account_id: Option<String>,

    #[serde(rename = "userid", default)]
    pub user_id: Option<String>,
}

impl AsyncJobResult {
    pub fn status_code(&self) -> Option<JobStatusCode> {
        JobStatusCode::from_code(self.job_status)
    }
}

/// `listAsyncJobs` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAsyncJobsResponse {
    #[serde(default)]
    pub count: usize,

    #[serde(rename = "asyncjobs", default)]
    pub async_jobs: Vec<AsyncJobResult>,
}

/// 任务失败信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFailure {
    pub error_code: Option<i64>,
    pub error_text: String,
    /// 平台返回的原始结果
    pub raw: Value,
}

impl JobFailure {
    /// 从任务结果构造失败信息
    ///
    /// 优先使用 `errortext`，其次是文本类型结果，否则保留原始 JSON
    pub fn from_job_result(result_type: &str, result: Option<&Value>) -> Self {
        let raw = result.cloned().unwrap_or(Value::Null);
        let error_code = raw.get("errorcode").and_then(Value::as_i64);

        let error_text = match (&raw, raw.get("errortext").and_then(Value::as_str)) {
            (_, Some(text)) => text.to_string(),
            (Value::String(text), None) => text.clone(),
            (other, None) if result_type == "text" => other.to_string(),
            (other, None) => format!("Undefined error: {}", other),
        };

        Self {
            error_code,
            error_text,
            raw,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            error_code: None,
            error_text: text.to_string(),
            raw: Value::String(text.to_string()),
        }
    }
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_code {
            Some(code) => write!(f, "[{}] {}", code, self.error_text),
            None => write!(f, "{}", self.error_text),
        }
    }
}
