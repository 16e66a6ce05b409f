//! 虚拟机管理 API
//!
//! 提供虚拟机生命周期管理功能，包括：
//! - 部署、启动、停止、重启、销毁（异步命令）
//! - 迁移到其他主机（异步命令）
//! - 查询与按名称查找

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::AcsClient;
use crate::error::Result;
use crate::lookup::{self, Named};
use crate::params::{Command, Params, Verb};

/// 虚拟机信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualMachine {
    pub id: String,

    pub name: String,

    pub displayname: String,

    /// Running / Stopped / Destroyed / Expunging ...
    pub state: String,

    #[serde(rename = "zoneid")]
    pub zone_id: String,

    #[serde(rename = "zonename")]
    pub zone_name: String,

    #[serde(rename = "hostid")]
    pub host_id: Option<String>,

    #[serde(rename = "hostname")]
    pub host_name: Option<String>,

    #[serde(rename = "templateid")]
    pub template_id: String,

    #[serde(rename = "serviceofferingid")]
    pub service_offering_id: String,

    /// 平台有时返回数字，解码前已转为字符串
    #[serde(rename = "ostypeid")]
    pub os_type_id: String,

    #[serde(rename = "cpunumber")]
    pub cpu_number: i64,

    /// 内存 (MB)
    pub memory: i64,

    pub account: String,

    #[serde(rename = "domainid")]
    pub domain_id: String,

    pub created: Option<String>,

    /// 部分平台版本在销毁结果中附带
    pub success: Option<bool>,

    /// 同步模式下返回的任务 ID
    #[serde(rename = "jobid")]
    pub job_id: Option<String>,

    #[serde(rename = "jobstatus")]
    pub job_status: Option<i64>,
}

impl Named for VirtualMachine {
    const KIND: &'static str = "虚拟机";

    fn resource_id(&self) -> &str {
        &self.id
    }

    fn resource_name(&self) -> &str {
        &self.name
    }
}

/// `listVirtualMachines` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListVirtualMachinesResponse {
    #[serde(default)]
    pub count: usize,

    #[serde(rename = "virtualmachine", default)]
    pub virtual_machines: Vec<VirtualMachine>,
}

/// `deployVirtualMachine` 参数
#[derive(Debug, Clone, Default)]
pub struct DeployVirtualMachineParams {
    pub service_offering_id: String,
    pub template_id: String,
    pub zone_id: String,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub host_id: Option<String>,
    pub network_ids: Vec<String>,
    pub start_vm: Option<bool>,
    pub user_data: Option<String>,
    pub details: BTreeMap<String, String>,
}

impl DeployVirtualMachineParams {
    pub fn new(
        service_offering_id: impl Into<String>,
        template_id: impl Into<String>,
        zone_id: impl Into<String>,
    ) -> Self {
        Self {
            service_offering_id: service_offering_id.into(),
            template_id: template_id.into(),
            zone_id: zone_id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// 指定部署主机
    pub fn with_host(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = Some(host_id.into());
        self
    }

    pub fn with_networks(mut self, network_ids: Vec<String>) -> Self {
        self.network_ids = network_ids;
        self
    }

    /// 部署后是否启动（默认启动）
    pub fn with_start_vm(mut self, start_vm: bool) -> Self {
        self.start_vm = Some(start_vm);
        self
    }

    /// base64 编码后的 user data
    pub fn with_user_data(mut self, user_data: impl Into<String>) -> Self {
        self.user_data = Some(user_data.into());
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl Command for DeployVirtualMachineParams {
    type Response = VirtualMachine;
    const NAME: &'static str = "deployVirtualMachine";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("serviceofferingid", self.service_offering_id.as_str())
            .set("templateid", self.template_id.as_str())
            .set("zoneid", self.zone_id.as_str())
            .set_opt("name", self.name.as_ref())
            .set_opt("displayname", self.display_name.as_ref())
            .set_opt("hostid", self.host_id.as_ref())
            .set_list("networkids", &self.network_ids)
            .set_bool("startvm", self.start_vm)
            .set_opt("userdata", self.user_data.as_ref())
            .set_map_fields("details", &self.details);
        p
    }
}

/// `startVirtualMachine` 参数
#[derive(Debug, Clone, Default)]
pub struct StartVirtualMachineParams {
    pub id: String,
    pub host_id: Option<String>,
    pub cluster_id: Option<String>,
}

impl StartVirtualMachineParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// 指定启动主机（仅管理员）
    pub fn with_host(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = Some(host_id.into());
        self
    }

    pub fn with_cluster(mut self, cluster_id: impl Into<String>) -> Self {
        self.cluster_id = Some(cluster_id.into());
        self
    }
}

impl Command for StartVirtualMachineParams {
    type Response = VirtualMachine;
    const NAME: &'static str = "startVirtualMachine";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str())
            .set_opt("hostid", self.host_id.as_ref())
            .set_opt("clusterid", self.cluster_id.as_ref());
        p
    }
}

/// `stopVirtualMachine` 参数
#[derive(Debug, Clone, Default)]
pub struct StopVirtualMachineParams {
    pub id: String,
    pub forced: Option<bool>,
}

impl StopVirtualMachineParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            forced: None,
        }
    }

    /// 强制关机
    pub fn with_forced(mut self, forced: bool) -> Self {
        self.forced = Some(forced);
        self
    }
}

impl Command for StopVirtualMachineParams {
    type Response = VirtualMachine;
    const NAME: &'static str = "stopVirtualMachine";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str()).set_bool("forced", self.forced);
        p
    }
}

/// `rebootVirtualMachine` 参数
#[derive(Debug, Clone, Default)]
pub struct RebootVirtualMachineParams {
    pub id: String,
    pub forced: Option<bool>,
}

impl RebootVirtualMachineParams {
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

impl Command for RebootVirtualMachineParams {
    type Response = VirtualMachine;
    const NAME: &'static str = "rebootVirtualMachine";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str()).set_bool("forced", self.forced);
        p
    }
}

/// `destroyVirtualMachine` 参数
#[derive(Debug, Clone, Default)]
pub struct DestroyVirtualMachineParams {
    pub id: String,
    pub expunge: Option<bool>,
    pub volume_ids: Vec<String>,
}

impl DestroyVirtualMachineParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// 立即彻底删除
    pub fn with_expunge(mut self, expunge: bool) -> Self {
        self.expunge = Some(expunge);
        self
    }

    /// 同时删除的数据卷
    pub fn with_volumes(mut self, volume_ids: Vec<String>) -> Self {
        self.volume_ids = volume_ids;
        self
    }
}

impl Command for DestroyVirtualMachineParams {
    type Response = VirtualMachine;
    const NAME: &'static str = "destroyVirtualMachine";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str())
            .set_bool("expunge", self.expunge)
            .set_list("volumeids", &self.volume_ids);
        p
    }
}

/// `migrateVirtualMachine` 参数
///
/// `host_id` 与 `storage_id` 至少指定一个
#[derive(Debug, Clone, Default)]
pub struct MigrateVirtualMachineParams {
    pub virtual_machine_id: String,
    pub host_id: Option<String>,
    pub storage_id: Option<String>,
    pub auto_select: Option<bool>,
}

impl MigrateVirtualMachineParams {
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

impl Command for MigrateVirtualMachineParams {
    type Response = VirtualMachine;
    const NAME: &'static str = "migrateVirtualMachine";
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

/// `listVirtualMachines` 参数
#[derive(Debug, Clone, Default)]
pub struct ListVirtualMachinesParams {
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub zone_id: Option<String>,
    pub host_id: Option<String>,
    pub keyword: Option<String>,
    pub list_all: Option<bool>,
}

impl ListVirtualMachinesParams {
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

    pub fn with_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    pub fn with_host(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = Some(host_id.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_list_all(mut self, list_all: bool) -> Self {
        self.list_all = Some(list_all);
        self
    }
}

impl Command for ListVirtualMachinesParams {
    type Response = ListVirtualMachinesResponse;
    const NAME: &'static str = "listVirtualMachines";
    const VERB: Verb = Verb::Read;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set_opt("id", self.id.as_ref())
            .set_opt("name", self.name.as_ref())
            .set_opt("state", self.state.as_ref())
            .set_opt("zoneid", self.zone_id.as_ref())
            .set_opt("hostid", self.host_id.as_ref())
            .set_opt("keyword", self.keyword.as_ref())
            .set_bool("listall", self.list_all);
        p
    }
}

/// 虚拟机管理 API
pub struct VirtualMachineApi<'a> {
    client: &'a AcsClient,
}

impl<'a> VirtualMachineApi<'a> {
    /// 创建新的虚拟机 API 实例
    pub(crate) fn new(client: &'a AcsClient) -> Self {
        Self { client }
    }

    /// 部署虚拟机
    ///
    /// # Example
    /// ```ignore
    /// let params = DeployVirtualMachineParams::new("offering-id", "template-id", "zone-id")
    ///     .with_name("web-01");
    /// let vm = client.virtual_machine().deploy(params).await?;
    /// ```
    pub async fn deploy(&self, params: DeployVirtualMachineParams) -> Result<VirtualMachine> {
        info!("部署虚拟机: {:?}", params.name);
        self.client.execute(&params).await
    }

    /// 启动虚拟机
    pub async fn start(&self, params: StartVirtualMachineParams) -> Result<VirtualMachine> {
        info!("启动虚拟机: {}", params.id);
        self.client.execute(&params).await
    }

    /// 停止虚拟机
    pub async fn stop(&self, params: StopVirtualMachineParams) -> Result<VirtualMachine> {
        info!("停止虚拟机: {}", params.id);
        self.client.execute(&params).await
    }

    /// 重启虚拟机
    pub async fn reboot(&self, params: RebootVirtualMachineParams) -> Result<VirtualMachine> {
        info!("重启虚拟机: {}", params.id);
        self.client.execute(&params).await
    }

    /// 销毁虚拟机
    pub async fn destroy(&self, params: DestroyVirtualMachineParams) -> Result<VirtualMachine> {
        info!("销毁虚拟机: {}", params.id);
        self.client.execute(&params).await
    }

    /// 迁移虚拟机
    pub async fn migrate(&self, params: MigrateVirtualMachineParams) -> Result<VirtualMachine> {
        info!("迁移虚拟机: {}", params.virtual_machine_id);
        self.client.execute(&params).await
    }

    /// 查询虚拟机列表
    pub async fn list(&self, params: ListVirtualMachinesParams) -> Result<ListVirtualMachinesResponse> {
        info!("查询虚拟机列表");
        self.client.execute(&params).await
    }

    /// 按名称查找虚拟机（名称需完全匹配）
    pub async fn get_by_name(&self, name: &str) -> Result<VirtualMachine> {
        let params = ListVirtualMachinesParams::default()
            .with_name(name)
            .with_list_all(true);
        let resp = self.list(params).await?;
        lookup::select_by_name(resp.virtual_machines, name)
    }

    /// 按名称查找虚拟机 ID
    pub async fn get_id_by_name(&self, name: &str) -> Result<String> {
        Ok(self.get_by_name(name).await?.id)
    }

    /// 按 ID 查找虚拟机
    pub async fn get_by_id(&self, id: &str) -> Result<VirtualMachine> {
        let params = ListVirtualMachinesParams::default()
            .with_id(id)
            .with_list_all(true);
        let resp = self.list(params).await?;
        lookup::select_by_id(resp.virtual_machines, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_params() {
        let params = DeployVirtualMachineParams::new("so-1", "tpl-1", "zone-1")
            .with_name("web-01")
            .with_networks(vec!["net-1".to_string(), "net-2".to_string()])
            .with_start_vm(false)
            .with_detail("cpuNumber", "4")
            .to_params();

        assert_eq!(params.get("serviceofferingid"), Some("so-1"));
        assert_eq!(params.get("templateid"), Some("tpl-1"));
        assert_eq!(params.get("zoneid"), Some("zone-1"));
        assert_eq!(params.get("name"), Some("web-01"));
        assert_eq!(params.get("networkids"), Some("net-1,net-2"));
        assert_eq!(params.get("startvm"), Some("false"));
        assert_eq!(params.get("details[0].cpuNumber"), Some("4"));
        assert!(!params.contains("hostid"));
    }

    #[test]
    fn test_destroy_params() {
        let params = DestroyVirtualMachineParams::new("vm-1")
            .with_expunge(true)
            .to_params();
        assert_eq!(params.get("id"), Some("vm-1"));
        assert_eq!(params.get("expunge"), Some("true"));
        assert!(!params.contains("volumeids"));
        assert_eq!(DestroyVirtualMachineParams::VERB, Verb::Write);
    }

    #[test]
    fn test_list_is_read_only() {
        assert_eq!(ListVirtualMachinesParams::VERB, Verb::Read);
        let params = ListVirtualMachinesParams::default().with_state("Running").to_params();
        assert_eq!(params.get("state"), Some("Running"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_deserialize_vm_with_missing_fields() {
        let vm: VirtualMachine =
            serde_json::from_value(serde_json::json!({ "id": "vm-1", "ostypeid": "105" })).unwrap();
        assert_eq!(vm.id, "vm-1");
        assert_eq!(vm.os_type_id, "105");
        assert!(vm.job_id.is_none());
    }
}
