//! ACS 管理 API 客户端
//!
//! 提供与云编排平台管理 API 交互的客户端实现。
//!
//! # 功能
//!
//! - **请求签名**: API Key + HMAC-SHA1 签名
//! - **异步任务**: 状态变更命令返回 jobid 时自动轮询至完成、失败或超时
//! - **响应规范化**: `success` 字符串转布尔、数字 `ostypeid` 转字符串
//! - **虚拟机管理** (`VirtualMachineApi`): 部署、启动、停止、重启、销毁、迁移
//! - **存储池管理** (`StoragePoolApi`): 创建、更新、删除、同步、维护模式
//! - **系统虚拟机管理** (`SystemVmApi`)
//! - **SDN 提供者** (`NsxApi`, `NetrisApi`)
//! - **异步任务** (`AsyncJobApi`)
//!
//! # 示例
//!
//! ```ignore
//! use acs_client::{AcsClient, AcsConfig, AcsError};
//! use acs_client::api::virtual_machine::DestroyVirtualMachineParams;
//!
//! let client = AcsClient::new(AcsConfig::new(
//!     "https://cloud.example.com/client/api",
//!     "api-key",
//!     "secret-key",
//! ))?;
//!
//! match client.virtual_machine().destroy(DestroyVirtualMachineParams::new("vm-1")).await {
//!     Ok(vm) => println!("已销毁: {}", vm.id),
//!     // 超时不代表失败，服务端可能已经完成
//!     Err(e) if e.is_timeout() => println!("结果未知: {}", e),
//!     Err(e) => return Err(e),
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod job;
pub mod lookup;
pub mod models;
pub mod normalize;
pub mod params;
pub mod signing;
pub mod transport;

pub use client::AcsClient;
pub use config::{AcsConfig, AsyncOptions};
pub use error::{AcsError, Result};
pub use job::{JobPoller, JobStatus};
pub use lookup::Named;
pub use params::{Command, Params, Verb};
pub use transport::{HttpTransport, Transport};

// 导出 API 模块
pub use api::{
    async_job::AsyncJobApi,
    netris::NetrisApi,
    nsx::NsxApi,
    storage_pool::StoragePoolApi,
    system_vm::SystemVmApi,
    virtual_machine::VirtualMachineApi,
};

// 导出数据模型
pub use models::{
    AsyncJobResult, JobFailure, JobStatusCode, ListAsyncJobsResponse, SuccessResponse,
};

// 取消令牌
pub use tokio_util::sync::CancellationToken;
