//! ACS 平台 API 模块
//!
//! 每个文件对应一组服务，包含命令参数类型、响应类型与调用方法：
//! - 虚拟机管理 (VirtualMachineApi)
//! - 存储池管理 (StoragePoolApi)
//! - 系统虚拟机管理 (SystemVmApi)
//! - NSX 控制器管理 (NsxApi)
//! - Netris 提供者管理 (NetrisApi)
//! - 异步任务 (AsyncJobApi)

pub mod virtual_machine;
pub mod storage_pool;
pub mod system_vm;
pub mod nsx;
pub mod netris;
pub mod async_job;

pub use virtual_machine::VirtualMachineApi;
pub use storage_pool::StoragePoolApi;
pub use system_vm::SystemVmApi;
pub use nsx::NsxApi;
pub use netris::NetrisApi;
pub use async_job::AsyncJobApi;
