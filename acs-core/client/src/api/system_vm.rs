//! 系统虚拟机管理 API
//!
//! 控制台代理 (consoleproxy) 与二级存储虚拟机 (secondarystoragevm) 的生命周期操作，
//! 除查询外均为异步命令。

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::AcsClient;
use crate::error::Result;
use crate::lookup::{self, Named};
use crate::params::{Command, Params, Verb};

/// 系统虚拟机信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemVm {
    pub id: String,

    pub name: String,

    /// consoleproxy / secondarystoragevm
    #[serde(rename = "systemvmtype")]
    pub system_vm_type: String,

    pub state: String,

    #[serde(rename = "agentstate")]
    pub agent_state: Option<String>,

    #[serde(rename = "zoneid")]
    pub zone_id: String,

    #[serde(rename = "zonename")]
    pub zone_name: String,

    #[serde(rename = "podid")]
    pub pod_id: Option<String>,

    #[serde(rename = "hostid")]
    pub host_id: Option<String>,

    #[serde(rename = "hostname")]
    pub host_name: Option<String>,

    #[serde(rename = "privateip")]
    pub private_ip: Option<String>,

    #[serde(rename = "publicip")]
    pub public_ip: Option<String>,

    #[serde(rename = "linklocalip")]
    pub link_local_ip: Option<String>,

    #[serde(rename = "templateid")]
    pub template_id: Option<String>,

    #[serde(rename = "activeviewersessions")]
    pub active_viewer_sessions: Option<i64>,

    pub created: Option<String>,

    #[serde(rename = "jobid")]
    pub job_id: Option<String>,

    #[serde(rename = "jobstatus")]
    pub job_status: Option<i64>,
}

impl Named for SystemVm {
    const KIND: &'static str = "系统虚拟机";

    fn resource_id(&self) -> &str {
        &self.id
    }

    fn resource_name(&self) -> &str {
        &self.name
    }
}

/// `listSystemVms` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSystemVmsResponse {
    #[serde(default)]
    pub count: usize,

    #[serde(rename = "systemvm", default)]
    pub system_vms: Vec<SystemVm>,
}

/// `startSystemVm` 参数
#[derive(Debug, Clone, Default)]
pub struct StartSystemVmParams {
    pub id: String,
}

impl StartSystemVmParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for StartSystemVmParams {
    type Response = SystemVm;
    const NAME: &'static str = "startSystemVm";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str());
        p
    }
}

/// `stopSystemVm` 参数
#[derive(Debug, Clone, Default)]
pub struct StopSystemVmParams {
    pub id: String,
    pub forced: Option<bool>,
}

impl StopSystemVmParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            forced: None,
        }
    }

    pub fn with_forced(mut self, forced: bool) -> Self {
        self.forced = Some(forced);
        self
    }
}

impl Command for StopSystemVmParams {
    type Response = SystemVm;
    const NAME: &'static str = "stopSystemVm";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str()).set_bool("forced", self.forced);
        p
    }
}

/// `rebootSystemVm` 参数
#[derive(Debug, Clone, Default)]
pub struct RebootSystemVmParams {
    pub id: String,
    pub forced: Option<bool>,
}

impl RebootSystemVmParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            forced: None,
        }
    }

    pub fn with_forced(mut self, forced: bool) -> Self {
        self.forced = Some(forced);
        self
    }
}

impl Command for RebootSystemVmParams {
    type Response = SystemVm;
    const NAME: &'static str = "rebootSystemVm";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str()).set_bool("forced", self.forced);
        p
    }
}

/// `destroySystemVm` 参数
#[derive(Debug, Clone, Default)]
pub struct DestroySystemVmParams {
    pub id: String,
}

impl DestroySystemVmParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for DestroySystemVmParams {
    type Response = SystemVm;
    const NAME: &'static str = "destroySystemVm";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str());
        p
    }
}

/// `migrateSystemVm` 参数
#[derive(Debug, Clone, Default)]
pub struct MigrateSystemVmParams {
    pub virtual_machine_id: String,
    pub host_id: Option<String>,
    pub storage_id: Option<String>,
    pub auto_select: Option<bool>,
}

impl MigrateSystemVmParams {
    pub fn new(virtual_machine_id: impl Into<String>) -> Self {
        Self {
            virtual_machine_id: virtual_machine_id.into(),
            ..Default::default()
        }
    }

    pub fn with_host(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = Some(host_id.into());
        self
    }

    pub fn with_storage(mut self, storage_id: impl Into<String>) -> Self {
        self.storage_id = Some(storage_id.into());
        self
    }

    pub fn with_auto_select(mut self, auto_select: bool) -> Self {
        self.auto_select = Some(auto_select);
        self
    }
}

impl Command for MigrateSystemVmParams {
    type Response = SystemVm;
    const NAME: &'static str = "migrateSystemVm";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("virtualmachineid", self.virtual_machine_id.as_str())
            .set_opt("hostid", self.host_id.as_ref())
            .set_opt("storageid", self.storage_id.as_ref())
            .set_bool("autoselect", self.auto_select);
        p
    }
}

/// `listSystemVms` 参数
#[derive(Debug, Clone, Default)]
pub struct ListSystemVmsParams {
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub system_vm_type: Option<String>,
    pub zone_id: Option<String>,
    pub pod_id: Option<String>,
    pub host_id: Option<String>,
    pub storage_id: Option<String>,
}

impl ListSystemVmsParams {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// consoleproxy / secondarystoragevm
    pub fn with_type(mut self, system_vm_type: impl Into<String>) -> Self {
        self.system_vm_type = Some(system_vm_type.into());
        self
    }

    pub fn with_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    pub fn with_host(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = Some(host_id.into());
        self
    }
}

impl Command for ListSystemVmsParams {
    type Response = ListSystemVmsResponse;
    const NAME: &'static str = "listSystemVms";
    const VERB: Verb = Verb::Read;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set_opt("id", self.id.as_ref())
            .set_opt("name", self.name.as_ref())
            .set_opt("state", self.state.as_ref())
            .set_opt("systemvmtype", self.system_vm_type.as_ref())
            .set_opt("zoneid", self.zone_id.as_ref())
            .set_opt("podid", self.pod_id.as_ref())
            .set_opt("hostid", self.host_id.as_ref())
            .set_opt("storageid", self.storage_id.as_ref());
        p
    }
}

/// 系统虚拟机管理 API
pub struct SystemVmApi<'a> {
    client: &'a AcsClient,
}

impl<'a> SystemVmApi<'a> {
    /// 创建新的系统虚拟机 API 实例
    pub(crate) fn new(client: &'a AcsClient) -> Self {
        Self { client }
    }

    /// 启动系统虚拟机
    pub async fn start(&self, params: StartSystemVmParams) -> Result<SystemVm> {
        info!("启动系统虚拟机: {}", params.id);
        self.client.execute(&params).await
    }

    /// 停止系统虚拟机
    pub async fn stop(&self, params: StopSystemVmParams) -> Result<SystemVm> {
        info!("停止系统虚拟机: {}", params.id);
        self.client.execute(&params).await
    }

    /// 重启系统虚拟机
    pub async fn reboot(&self, params: RebootSystemVmParams) -> Result<SystemVm> {
        info!("重启系统虚拟机: {}", params.id);
        self.client.execute(&params).await
    }

    /// 销毁系统虚拟机，平台会自动重建
    pub async fn destroy(&self, params: DestroySystemVmParams) -> Result<SystemVm> {
        info!("销毁系统虚拟机: {}", params.id);
        self.client.execute(&params).await
    }

    /// 迁移系统虚拟机
    pub async fn migrate(&self, params: MigrateSystemVmParams) -> Result<SystemVm> {
        info!("迁移系统虚拟机: {}", params.virtual_machine_id);
        self.client.execute(&params).await
    }

    /// 查询系统虚拟机列表
    pub async fn list(&self, params: ListSystemVmsParams) -> Result<ListSystemVmsResponse> {
        info!("查询系统虚拟机列表");
        self.client.execute(&params).await
    }

    /// 按名称查找系统虚拟机（名称需完全匹配）
    pub async fn get_by_name(&self, name: &str) -> Result<SystemVm> {
        let resp = self.list(ListSystemVmsParams::default().with_name(name)).await?;
        lookup::select_by_name(resp.system_vms, name)
    }

    /// 按名称查找系统虚拟机 ID
    pub async fn get_id_by_name(&self, name: &str) -> Result<String> {
        Ok(self.get_by_name(name).await?.id)
    }

    /// 按 ID 查找系统虚拟机
    pub async fn get_by_id(&self, id: &str) -> Result<SystemVm> {
        let resp = self.list(ListSystemVmsParams::default().with_id(id)).await?;
        lookup::select_by_id(resp.system_vms, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_params() {
        let params = MigrateSystemVmParams::new("s-1-VM")
            .with_host("host-2")
            .to_params();
        assert_eq!(params.get("virtualmachineid"), Some("s-1-VM"));
        assert_eq!(params.get("hostid"), Some("host-2"));
        assert!(!params.contains("storageid"));
    }

    #[test]
    fn test_list_params_by_type() {
        let params = ListSystemVmsParams::default()
            .with_type("consoleproxy")
            .with_zone("zone-1")
            .to_params();
        assert_eq!(params.get("systemvmtype"), Some("consoleproxy"));
        assert_eq!(params.get("zoneid"), Some("zone-1"));
    }
}
