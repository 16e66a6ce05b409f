//! CLI 命令处理模块

pub mod call;
pub mod common; // 公共工具函数
pub mod job;
pub mod output;
pub mod profile;
pub mod sdn; // NSX / Netris
pub mod storage;
pub mod system_vm;
pub mod vm;
