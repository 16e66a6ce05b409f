//! NSX 控制器管理 API

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::AcsClient;
use crate::error::Result;
use crate::lookup::{self, Named};
use crate::models::SuccessResponse;
use crate::params::{Command, Params, Verb};

/// NSX 控制器信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NsxController {
    #[serde(rename = "nsxprovideruuid")]
    pub uuid: String,

    pub name: String,

    pub hostname: String,

    pub port: Option<String>,

    #[serde(rename = "zoneid")]
    pub zone_id: String,

    #[serde(rename = "zonename")]
    pub zone_name: String,

    #[serde(rename = "tier0gateway")]
    pub tier0_gateway: String,

    #[serde(rename = "edgecluster")]
    pub edge_cluster: String,

    #[serde(rename = "transportzone")]
    pub transport_zone: String,
}

impl Named for NsxController {
    const KIND: &'static str = "NSX 控制器";

    fn resource_id(&self) -> &str {
        &self.uuid
    }

    fn resource_name(&self) -> &str {
        &self.name
    }
}

/// `listNsxControllers` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNsxControllersResponse {
    #[serde(default)]
    pub count: usize,

    #[serde(rename = "nsxController", alias = "nsxcontroller", default)]
    pub controllers: Vec<NsxController>,
}

/// `addNsxController` 参数
#[derive(Debug, Clone, Default)]
pub struct AddNsxControllerParams {
    pub name: String,
    pub hostname: String,
    pub username: String,
    pub password: String,
    pub zone_id: String,
    pub tier0_gateway: String,
    pub edge_cluster: String,
    pub transport_zone: String,
    pub port: Option<String>,
}

impl AddNsxControllerParams {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        hostname: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        zone_id: impl Into<String>,
        tier0_gateway: impl Into<String>,
        edge_cluster: impl Into<String>,
        transport_zone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            hostname: hostname.into(),
            username: username.into(),
            password: password.into(),
            zone_id: zone_id.into(),
            tier0_gateway: tier0_gateway.into(),
            edge_cluster: edge_cluster.into(),
            transport_zone: transport_zone.into(),
            port: None,
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }
}

impl Command for AddNsxControllerParams {
    type Response = NsxController;
    const NAME: &'static str = "addNsxController";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("name", self.name.as_str())
            .set("nsxproviderhostname", self.hostname.as_str())
            .set("username", self.username.as_str())
            .set("password", self.password.as_str())
            .set("zoneid", self.zone_id.as_str())
            .set("tier0gateway", self.tier0_gateway.as_str())
            .set("edgecluster", self.edge_cluster.as_str())
            .set("transportzone", self.transport_zone.as_str())
            .set_opt("nsxproviderport", self.port.as_ref());
        p
    }
}

/// `deleteNsxController` 参数
#[derive(Debug, Clone, Default)]
pub struct DeleteNsxControllerParams {
    pub nsx_controller_id: String,
}

impl DeleteNsxControllerParams {
    pub fn new(nsx_controller_id: impl Into<String>) -> Self {
        Self {
            nsx_controller_id: nsx_controller_id.into(),
        }
    }
}

impl Command for DeleteNsxControllerParams {
    type Response = SuccessResponse;
    const NAME: &'static str = "deleteNsxController";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("nsxcontrollerid", self.nsx_controller_id.as_str());
        p
    }
}

/// `listNsxControllers` 参数
#[derive(Debug, Clone, Default)]
pub struct ListNsxControllersParams {
    pub zone_id: Option<String>,
}

impl ListNsxControllersParams {
    pub fn with_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }
}

impl Command for ListNsxControllersParams {
    type Response = ListNsxControllersResponse;
    const NAME: &'static str = "listNsxControllers";
    const VERB: Verb = Verb::Read;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set_opt("zoneid", self.zone_id.as_ref());
        p
    }
}

/// NSX 控制器管理 API
pub struct NsxApi<'a> {
    client: &'a AcsClient,
}

impl<'a> NsxApi<'a> {
    pub(crate) fn new(client: &'a AcsClient) -> Self {
        Self { client }
    }

    /// 添加 NSX 控制器
    pub async fn add_controller(&self, params: AddNsxControllerParams) -> Result<NsxController> {
        info!("添加 NSX 控制器: {} ({})", params.name, params.hostname);
        self.client.execute(&params).await
    }

    /// 删除 NSX 控制器
    pub async fn delete_controller(&self, params: DeleteNsxControllerParams) -> Result<SuccessResponse> {
        info!("删除 NSX 控制器: {}", params.nsx_controller_id);
        self.client.execute(&params).await
    }

    /// 查询 NSX 控制器列表
    pub async fn list_controllers(&self, params: ListNsxControllersParams) -> Result<ListNsxControllersResponse> {
        info!("查询 NSX 控制器列表");
        self.client.execute(&params).await
    }

    /// 按名称查找 NSX 控制器（名称需完全匹配）
    ///
    /// 平台不支持按名称过滤，先查询全部再筛选
    pub async fn get_controller_by_name(&self, name: &str) -> Result<NsxController> {
        let resp = self.list_controllers(ListNsxControllersParams::default()).await?;
        lookup::select_by_name(resp.controllers, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_controller_params() {
        let params = AddNsxControllerParams::new(
            "nsx-1", "10.0.0.10", "admin", "secret", "zone-1", "t0", "edge", "tz",
        )
        .with_port("443")
        .to_params();

        assert_eq!(params.get("nsxproviderhostname"), Some("10.0.0.10"));
        assert_eq!(params.get("nsxproviderport"), Some("443"));
        assert_eq!(params.get("tier0gateway"), Some("t0"));
        assert_eq!(params.len(), 9);
    }

    #[test]
    fn test_list_response_field_names() {
        let resp: ListNsxControllersResponse = serde_json::from_value(serde_json::json!({
            "count": 1,
            "nsxController": [{ "nsxprovideruuid": "u1", "name": "nsx-1" }]
        }))
        .unwrap();
        assert_eq!(resp.controllers.len(), 1);
        assert_eq!(resp.controllers[0].uuid, "u1");
    }
}
