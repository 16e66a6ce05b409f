//! ACS 客户端错误定义

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::JobFailure;

/// ACS 客户端错误类型
#[derive(Error, Debug)]
pub enum AcsError {
    /// 网络/HTTP 传输失败，原样返回给调用方
    #[error("HTTP 错误: {0}")]
    HttpError(String),

    /// 平台返回的错误响应 (errorcode / errortext)
    #[error("API 错误 [{0}]: {1}")]
    ApiError(u16, String),

    #[error("解析错误: {0}")]
    ParseError(String),

    /// 平台明确报告异步任务失败
    #[error("异步任务 {job_id} 执行失败: {failure}")]
    JobFailed { job_id: String, failure: JobFailure },

    /// 等待超时，任务的真实结果未知（服务端可能已经完成）
    #[error("等待异步任务 {job_id} 结果超时 ({timeout:?})")]
    JobTimeout {
        job_id: String,
        timeout: Duration,
        /// 超时前已经解码出的最佳部分响应
        partial: Option<serde_json::Value>,
    },

    #[error("操作已取消: {0}")]
    Cancelled(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("资源不存在: {0}")]
    NotFound(String),

    #[error("名称 {0} 匹配到 {1} 个资源")]
    AmbiguousName(String, usize),
}

impl AcsError {
    /// 是否为等待超时（结果未知）
    pub fn is_timeout(&self) -> bool {
        matches!(self, AcsError::JobTimeout { .. })
    }

    /// 是否为平台报告的任务失败
    pub fn is_job_failure(&self) -> bool {
        matches!(self, AcsError::JobFailed { .. })
    }

    /// 关联的异步任务 ID
    pub fn job_id(&self) -> Option<&str> {
        match self {
            AcsError::JobFailed { job_id, .. } | AcsError::JobTimeout { job_id, .. } => {
                Some(job_id)
            }
            _ => None,
        }
    }

    /// 超时错误附带的部分响应，按目标类型解码
    ///
    /// 非超时错误或没有部分响应时返回 `None`
    pub fn partial_response<T: DeserializeOwned>(&self) -> Option<T> {
        match self {
            AcsError::JobTimeout {
                partial: Some(value),
                ..
            } => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AcsError {
    fn from(e: serde_json::Error) -> Self {
        AcsError::ParseError(e.to_string())
    }
}

/// ACS 客户端结果类型
pub type Result<T> = std::result::Result<T, AcsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Partial {
        jobid: String,
    }

    #[test]
    fn test_timeout_and_failure_are_distinct() {
        let timeout = AcsError::JobTimeout {
            job_id: "J1".to_string(),
            timeout: Duration::from_secs(5),
            partial: None,
        };
        let failed = AcsError::JobFailed {
            job_id: "J1".to_string(),
            failure: JobFailure::from_text("boom"),
        };

        assert!(timeout.is_timeout());
        assert!(!timeout.is_job_failure());
        assert!(failed.is_job_failure());
        assert!(!failed.is_timeout());
        assert_eq!(timeout.job_id(), Some("J1"));
        assert_eq!(failed.job_id(), Some("J1"));
    }

    #[test]
    fn test_partial_response_decodes() {
        let err = AcsError::JobTimeout {
            job_id: "J7".to_string(),
            timeout: Duration::from_secs(1),
            partial: Some(serde_json::json!({ "jobid": "J7" })),
        };
        let partial: Partial = err.partial_response().unwrap();
        assert_eq!(partial.jobid, "J7");

        let other = AcsError::HttpError("down".to_string());
        assert!(other.partial_response::<Partial>().is_none());
    }
}
