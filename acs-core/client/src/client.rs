//! ACS 客户端核心实现
//!
//! 命令调用流程：提交 → （异步模式且响应带 jobid 时）轮询至终态或超时 → 规范化 → 解码。
//! 顺序固定，不会重排或并行。

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{
    AsyncJobApi, NetrisApi, NsxApi, StoragePoolApi, SystemVmApi, VirtualMachineApi,
};
use crate::config::{AcsConfig, AsyncOptions};
use crate::error::{AcsError, Result};
use crate::job::JobPoller;
use crate::normalize;
use crate::params::{Command, Params, Verb};
use crate::transport::{HttpTransport, Transport};

/// ACS 平台客户端
///
/// 可以在多个并发调用之间克隆共享，传输层与配置均为只读
#[derive(Clone)]
pub struct AcsClient {
    /// 传输层
    transport: Arc<dyn Transport>,

    /// 异步任务配置
    options: AsyncOptions,
}

impl AcsClient {
    /// 使用 HTTP 传输创建客户端
    pub fn new(config: AcsConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport), config.async_options))
    }

    /// 使用自定义传输创建客户端
    pub fn with_transport(transport: Arc<dyn Transport>, options: AsyncOptions) -> Self {
        Self { transport, options }
    }

    /// 异步任务配置
    pub fn options(&self) -> &AsyncOptions {
        &self.options
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// 获取虚拟机管理 API
    pub fn virtual_machine(&self) -> VirtualMachineApi<'_> {
        VirtualMachineApi::new(self)
    }

    /// 获取存储池管理 API
    pub fn storage_pool(&self) -> StoragePoolApi<'_> {
        StoragePoolApi::new(self)
    }

    /// 获取系统虚拟机管理 API
    pub fn system_vm(&self) -> SystemVmApi<'_> {
        SystemVmApi::new(self)
    }

    /// 获取 NSX 控制器管理 API
    pub fn nsx(&self) -> NsxApi<'_> {
        NsxApi::new(self)
    }

    /// 获取 Netris 提供者管理 API
    pub fn netris(&self) -> NetrisApi<'_> {
        NetrisApi::new(self)
    }

    /// 获取异步任务 API
    pub fn async_job(&self) -> AsyncJobApi<'_> {
        AsyncJobApi::new(self)
    }

    /// 执行命令
    pub async fn execute<C: Command>(&self, command: &C) -> Result<C::Response> {
        self.execute_with_cancel(command, &CancellationToken::new())
            .await
    }

    /// 执行命令，`cancel` 触发后停止等待并返回 `Cancelled`
    pub async fn execute_with_cancel<C: Command>(
        &self,
        command: &C,
        cancel: &CancellationToken,
    ) -> Result<C::Response> {
        let params = command.to_params();
        let value = self.execute_raw(C::NAME, &params, C::VERB, cancel).await?;
        normalize::decode(value)
    }

    /// 执行未定义类型的命令，返回规范化后的信封
    pub async fn execute_raw(
        &self,
        name: &str,
        params: &Params,
        verb: Verb,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        debug!("提交命令: {} ({} 个参数)", name, params.len());

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(AcsError::Cancelled(format!("提交命令 {} 时被取消", name)));
            }
            body = self.transport.submit(name, params, verb) => body?,
        };

        let envelope = normalize::decode_envelope(&body)?;

        // 只读命令（如 queryAsyncJobResult）中的 jobid 是数据，不是任务句柄
        let job_id = match envelope.get("jobid").and_then(Value::as_str) {
            Some(id) if self.options.async_mode && verb == Verb::Write => id.to_string(),
            _ => return Ok(normalize::normalize(envelope)),
        };
        debug!("命令 {} 已转为异步任务 {}", name, job_id);

        let poller = JobPoller::new(self.transport(), &self.options);
        match poller.wait(&job_id, cancel).await {
            Ok(payload) => Ok(normalize::normalize(normalize::unwrap_envelope(payload))),
            Err(AcsError::JobTimeout {
                job_id, timeout, ..
            }) => Err(AcsError::JobTimeout {
                job_id,
                timeout,
                partial: Some(normalize::normalize(envelope)),
            }),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acs_client_creation() {
        let client = AcsClient::new(AcsConfig::new(
            "http://192.168.1.11:8080/client/api",
            "key",
            "secret",
        ));
        assert!(client.is_ok());
        assert!(client.unwrap().options().async_mode);
    }

    #[test]
    fn test_acs_client_rejects_invalid_config() {
        let client = AcsClient::new(AcsConfig::new("", "key", "secret"));
        assert!(matches!(client, Err(AcsError::ConfigError(_))));
    }
}
