//! 存储池管理 API
//!
//! 提供主存储池管理功能，包括：
//! - 存储池创建、更新、删除
//! - 存储池同步（异步命令）
//! - 维护模式切换（异步命令）
//! - 查询与按名称查找

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::AcsClient;
use crate::error::Result;
use crate::lookup::{self, Named};
use crate::models::SuccessResponse;
use crate::params::{Command, Params, Verb};

/// 存储池信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoragePool {
    pub id: String,

    pub name: String,

    /// 存储类型，如 NetworkFilesystem / RBD / Filesystem
    #[serde(rename = "type")]
    pub pool_type: String,

    /// Up / Maintenance / PrepareForMaintenance / Disabled ...
    pub state: String,

    /// CLUSTER / ZONE / HOST
    pub scope: String,

    #[serde(rename = "zoneid")]
    pub zone_id: String,

    #[serde(rename = "zonename")]
    pub zone_name: String,

    #[serde(rename = "podid")]
    pub pod_id: Option<String>,

    #[serde(rename = "clusterid")]
    pub cluster_id: Option<String>,

    #[serde(rename = "clustername")]
    pub cluster_name: Option<String>,

    #[serde(rename = "ipaddress")]
    pub ip_address: String,

    pub path: String,

    pub hypervisor: Option<String>,

    pub provider: Option<String>,

    pub tags: Option<String>,

    /// 总容量 (字节)
    #[serde(rename = "disksizetotal")]
    pub disk_size_total: i64,

    #[serde(rename = "disksizeallocated")]
    pub disk_size_allocated: i64,

    #[serde(rename = "disksizeused")]
    pub disk_size_used: i64,

    #[serde(rename = "capacityiops")]
    pub capacity_iops: Option<i64>,

    pub created: Option<String>,

    #[serde(rename = "jobid")]
    pub job_id: Option<String>,

    #[serde(rename = "jobstatus")]
    pub job_status: Option<i64>,
}

impl Named for StoragePool {
    const KIND: &'static str = "存储池";

    fn resource_id(&self) -> &str {
        &self.id
    }

    fn resource_name(&self) -> &str {
        &self.name
    }
}

/// `listStoragePools` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListStoragePoolsResponse {
    #[serde(default)]
    pub count: usize,

    #[serde(rename = "storagepool", default)]
    pub storage_pools: Vec<StoragePool>,
}

/// `createStoragePool` 参数
#[derive(Debug, Clone, Default)]
pub struct CreateStoragePoolParams {
    pub name: String,
    pub url: String,
    pub zone_id: String,
    pub cluster_id: Option<String>,
    pub pod_id: Option<String>,
    pub scope: Option<String>,
    pub hypervisor: Option<String>,
    pub provider: Option<String>,
    pub capacity_bytes: Option<i64>,
    pub capacity_iops: Option<i64>,
    pub managed: Option<bool>,
    pub tags: Vec<String>,
    pub details: BTreeMap<String, String>,
}

impl CreateStoragePoolParams {
    /// # Arguments
    /// * `name` - 存储池名称
    /// * `url` - 存储地址，如 `nfs://192.168.1.20/export/primary`
    /// * `zone_id` - 所属区域
    pub fn new(name: impl Into<String>, url: impl Into<String>, zone_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            zone_id: zone_id.into(),
            ..Default::default()
        }
    }

    /// 集群范围存储
    pub fn with_cluster(mut self, pod_id: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        self.pod_id = Some(pod_id.into());
        self.cluster_id = Some(cluster_id.into());
        self
    }

    /// CLUSTER / ZONE
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_hypervisor(mut self, hypervisor: impl Into<String>) -> Self {
        self.hypervisor = Some(hypervisor.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_capacity(mut self, bytes: Option<i64>, iops: Option<i64>) -> Self {
        self.capacity_bytes = bytes;
        self.capacity_iops = iops;
        self
    }

    pub fn with_managed(mut self, managed: bool) -> Self {
        self.managed = Some(managed);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl Command for CreateStoragePoolParams {
    type Response = StoragePool;
    const NAME: &'static str = "createStoragePool";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("name", self.name.as_str())
            .set("url", self.url.as_str())
            .set("zoneid", self.zone_id.as_str())
            .set_opt("clusterid", self.cluster_id.as_ref())
            .set_opt("podid", self.pod_id.as_ref())
            .set_opt("scope", self.scope.as_ref())
            .set_opt("hypervisor", self.hypervisor.as_ref())
            .set_opt("provider", self.provider.as_ref())
            .set_int("capacitybytes", self.capacity_bytes)
            .set_int("capacityiops", self.capacity_iops)
            .set_bool("managed", self.managed)
            .set_list("tags", &self.tags)
            .set_map_fields("details", &self.details);
        p
    }
}

/// `updateStoragePool` 参数
#[derive(Debug, Clone, Default)]
pub struct UpdateStoragePoolParams {
    pub id: String,
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub capacity_bytes: Option<i64>,
    pub capacity_iops: Option<i64>,
    pub tags: Vec<String>,
}

impl UpdateStoragePoolParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_capacity(mut self, bytes: Option<i64>, iops: Option<i64>) -> Self {
        self.capacity_bytes = bytes;
        self.capacity_iops = iops;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

impl Command for UpdateStoragePoolParams {
    type Response = StoragePool;
    const NAME: &'static str = "updateStoragePool";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str())
            .set_opt("name", self.name.as_ref())
            .set_bool("enabled", self.enabled)
            .set_int("capacitybytes", self.capacity_bytes)
            .set_int("capacityiops", self.capacity_iops)
            .set_list("tags", &self.tags);
        p
    }
}

/// `deleteStoragePool` 参数
#[derive(Debug, Clone, Default)]
pub struct DeleteStoragePoolParams {
    pub id: String,
    pub forced: Option<bool>,
}

impl DeleteStoragePoolParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            forced: None,
        }
    }

    /// 存储池上仍有卷时强制删除
    pub fn with_forced(mut self, forced: bool) -> Self {
        self.forced = Some(forced);
        self
    }
}

impl Command for DeleteStoragePoolParams {
    type Response = SuccessResponse;
    const NAME: &'static str = "deleteStoragePool";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str()).set_bool("forced", self.forced);
        p
    }
}

/// `syncStoragePool` 参数
#[derive(Debug, Clone, Default)]
pub struct SyncStoragePoolParams {
    pub id: String,
}

impl SyncStoragePoolParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for SyncStoragePoolParams {
    type Response = StoragePool;
    const NAME: &'static str = "syncStoragePool";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str());
        p
    }
}

/// `enableStorageMaintenance` 参数
#[derive(Debug, Clone, Default)]
pub struct EnableStorageMaintenanceParams {
    pub id: String,
}

impl EnableStorageMaintenanceParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for EnableStorageMaintenanceParams {
    type Response = StoragePool;
    const NAME: &'static str = "enableStorageMaintenance";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str());
        p
    }
}

/// `cancelStorageMaintenance` 参数
#[derive(Debug, Clone, Default)]
pub struct CancelStorageMaintenanceParams {
    pub id: String,
}

impl CancelStorageMaintenanceParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for CancelStorageMaintenanceParams {
    type Response = StoragePool;
    const NAME: &'static str = "cancelStorageMaintenance";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str());
        p
    }
}

/// `listStoragePools` 参数
#[derive(Debug, Clone, Default)]
pub struct ListStoragePoolsParams {
    pub id: Option<String>,
    pub name: Option<String>,
    pub zone_id: Option<String>,
    pub cluster_id: Option<String>,
    pub pod_id: Option<String>,
    pub ip_address: Option<String>,
    pub path: Option<String>,
    pub scope: Option<String>,
    pub status: Option<String>,
    pub keyword: Option<String>,
}

impl ListStoragePoolsParams {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    pub fn with_cluster(mut self, cluster_id: impl Into<String>) -> Self {
        self.cluster_id = Some(cluster_id.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

impl Command for ListStoragePoolsParams {
    type Response = ListStoragePoolsResponse;
    const NAME: &'static str = "listStoragePools";
    const VERB: Verb = Verb::Read;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set_opt("id", self.id.as_ref())
            .set_opt("name", self.name.as_ref())
            .set_opt("zoneid", self.zone_id.as_ref())
            .set_opt("clusterid", self.cluster_id.as_ref())
            .set_opt("podid", self.pod_id.as_ref())
            .set_opt("ipaddress", self.ip_address.as_ref())
            .set_opt("path", self.path.as_ref())
            .set_opt("scope", self.scope.as_ref())
            .set_opt("status", self.status.as_ref())
            .set_opt("keyword", self.keyword.as_ref());
        p
    }
}

/// 存储池管理 API
pub struct StoragePoolApi<'a> {
    client: &'a AcsClient,
}

impl<'a> StoragePoolApi<'a> {
    /// 创建新的存储池 API 实例
    pub(crate) fn new(client: &'a AcsClient) -> Self {
        Self { client }
    }

    // ============================================
    // 存储池管理
    // ============================================

    /// 创建存储池
    pub async fn create(&self, params: CreateStoragePoolParams) -> Result<StoragePool> {
        info!("创建存储池: {} ({})", params.name, params.url);
        self.client.execute(&params).await
    }

    /// 更新存储池
    pub async fn update(&self, params: UpdateStoragePoolParams) -> Result<StoragePool> {
        info!("更新存储池: {}", params.id);
        self.client.execute(&params).await
    }

    /// 删除存储池
    pub async fn delete(&self, params: DeleteStoragePoolParams) -> Result<SuccessResponse> {
        info!("删除存储池: {}", params.id);
        self.client.execute(&params).await
    }

    /// 同步存储池容量与状态
    pub async fn sync(&self, params: SyncStoragePoolParams) -> Result<StoragePool> {
        info!("同步存储池: {}", params.id);
        self.client.execute(&params).await
    }

    // ============================================
    // 维护模式
    // ============================================

    /// 进入维护模式
    pub async fn enable_maintenance(&self, params: EnableStorageMaintenanceParams) -> Result<StoragePool> {
        info!("存储池进入维护模式: {}", params.id);
        self.client.execute(&params).await
    }

    /// 退出维护模式
    pub async fn cancel_maintenance(&self, params: CancelStorageMaintenanceParams) -> Result<StoragePool> {
        info!("存储池退出维护模式: {}", params.id);
        self.client.execute(&params).await
    }

    // ============================================
    // 查询
    // ============================================

    /// 查询存储池列表
    pub async fn list(&self, params: ListStoragePoolsParams) -> Result<ListStoragePoolsResponse> {
        info!("查询存储池列表");
        self.client.execute(&params).await
    }

    /// 按名称查找存储池（名称需完全匹配）
    pub async fn get_by_name(&self, name: &str) -> Result<StoragePool> {
        let resp = self.list(ListStoragePoolsParams::default().with_name(name)).await?;
        lookup::select_by_name(resp.storage_pools, name)
    }

    /// 按名称查找存储池 ID
    pub async fn get_id_by_name(&self, name: &str) -> Result<String> {
        Ok(self.get_by_name(name).await?.id)
    }

    /// 按 ID 查找存储池
    pub async fn get_by_id(&self, id: &str) -> Result<StoragePool> {
        let resp = self.list(ListStoragePoolsParams::default().with_id(id)).await?;
        lookup::select_by_id(resp.storage_pools, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_params() {
        let params = CreateStoragePoolParams::new("pool1", "nfs://10.0.0.5/export", "zone-1")
            .with_cluster("pod-1", "cluster-1")
            .with_scope("CLUSTER")
            .with_tags(vec!["ssd".to_string(), "fast".to_string()])
            .with_capacity(Some(1 << 40), None)
            .to_params();

        assert_eq!(params.get("name"), Some("pool1"));
        assert_eq!(params.get("url"), Some("nfs://10.0.0.5/export"));
        assert_eq!(params.get("podid"), Some("pod-1"));
        assert_eq!(params.get("clusterid"), Some("cluster-1"));
        assert_eq!(params.get("tags"), Some("ssd,fast"));
        assert_eq!(params.get("capacitybytes"), Some("1099511627776"));
        assert!(!params.contains("capacityiops"));
    }

    #[test]
    fn test_delete_params() {
        let params = DeleteStoragePoolParams::new("p1").with_forced(true).to_params();
        assert_eq!(params.get("id"), Some("p1"));
        assert_eq!(params.get("forced"), Some("true"));
    }

    #[test]
    fn test_deserialize_pool() {
        let pool: StoragePool = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "pool1",
            "type": "NetworkFilesystem",
            "disksizetotal": 1024,
        }))
        .unwrap();
        assert_eq!(pool.pool_type, "NetworkFilesystem");
        assert_eq!(pool.disk_size_total, 1024);
        assert_eq!(pool.state, "");
    }
}
