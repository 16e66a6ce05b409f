//! Netris 提供者管理 API

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::AcsClient;
use crate::error::Result;
use crate::lookup::{self, Named};
use crate::models::SuccessResponse;
use crate::params::{Command, Params, Verb};

/// Netris 提供者信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetrisProvider {
    pub uuid: String,

    pub name: String,

    pub url: String,

    #[serde(rename = "zoneid")]
    pub zone_id: String,

    #[serde(rename = "zonename")]
    pub zone_name: String,

    #[serde(rename = "sitename")]
    pub site_name: String,

    #[serde(rename = "tenantname")]
    pub tenant_name: String,

    #[serde(rename = "netristag")]
    pub netris_tag: Option<String>,
}

impl Named for NetrisProvider {
    const KIND: &'static str = "Netris 提供者";

    fn resource_id(&self) -> &str {
        &self.uuid
    }

    fn resource_name(&self) -> &str {
        &self.name
    }
}

/// `listNetrisProviders` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNetrisProvidersResponse {
    #[serde(default)]
    pub count: usize,

    #[serde(rename = "netrisProvider", alias = "netrisprovider", default)]
    pub providers: Vec<NetrisProvider>,
}

/// `addNetrisProvider` 参数
#[derive(Debug, Clone, Default)]
pub struct AddNetrisProviderParams {
    pub name: String,
    pub url: String,
    pub username: String,
    pub password: String,
    pub zone_id: String,
    pub site_name: String,
    pub tenant_name: String,
    pub netris_tag: Option<String>,
}

impl AddNetrisProviderParams {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        zone_id: impl Into<String>,
        site_name: impl Into<String>,
        tenant_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            username: username.into(),
            password: password.into(),
            zone_id: zone_id.into(),
            site_name: site_name.into(),
            tenant_name: tenant_name.into(),
            netris_tag: None,
        }
    }

    pub fn with_tag(mut self, netris_tag: impl Into<String>) -> Self {
        self.netris_tag = Some(netris_tag.into());
        self
    }
}

impl Command for AddNetrisProviderParams {
    type Response = NetrisProvider;
    const NAME: &'static str = "addNetrisProvider";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("name", self.name.as_str())
            .set("url", self.url.as_str())
            .set("username", self.username.as_str())
            .set("password", self.password.as_str())
            .set("zoneid", self.zone_id.as_str())
            .set("sitename", self.site_name.as_str())
            .set("tenantname", self.tenant_name.as_str())
            .set_opt("netristag", self.netris_tag.as_ref());
        p
    }
}

/// `deleteNetrisProvider` 参数
#[derive(Debug, Clone, Default)]
pub struct DeleteNetrisProviderParams {
    pub id: String,
}

impl DeleteNetrisProviderParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for DeleteNetrisProviderParams {
    type Response = SuccessResponse;
    const NAME: &'static str = "deleteNetrisProvider";
    const VERB: Verb = Verb::Write;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set("id", self.id.as_str());
        p
    }
}

/// `listNetrisProviders` 参数
#[derive(Debug, Clone, Default)]
pub struct ListNetrisProvidersParams {
    pub zone_id: Option<String>,
}

impl ListNetrisProvidersParams {
    pub fn with_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }
}

impl Command for ListNetrisProvidersParams {
    type Response = ListNetrisProvidersResponse;
    const NAME: &'static str = "listNetrisProviders";
    const VERB: Verb = Verb::Read;

    fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.set_opt("zoneid", self.zone_id.as_ref());
        p
    }
}

/// Netris 提供者管理 API
pub struct NetrisApi<'a> {
    client: &'a AcsClient,
}

impl<'a> NetrisApi<'a> {
    pub(crate) fn new(client: &'a AcsClient) -> Self {
        Self { client }
    }

    /// 添加 Netris 提供者
    pub async fn add_provider(&self, params: AddNetrisProviderParams) -> Result<NetrisProvider> {
        info!("添加 Netris 提供者: {} ({})", params.name, params.url);
        self.client.execute(&params).await
    }

    /// 删除 Netris 提供者
    pub async fn delete_provider(&self, params: DeleteNetrisProviderParams) -> Result<SuccessResponse> {
        info!("删除 Netris 提供者: {}", params.id);
        self.client.execute(&params).await
    }

    /// 查询 Netris 提供者列表
    pub async fn list_providers(&self, params: ListNetrisProvidersParams) -> Result<ListNetrisProvidersResponse> {
        info!("查询 Netris 提供者列表");
        self.client.execute(&params).await
    }

    /// 按名称查找 Netris 提供者（名称需完全匹配）
    pub async fn get_provider_by_name(&self, name: &str) -> Result<NetrisProvider> {
        let resp = self.list_providers(ListNetrisProvidersParams::default()).await?;
        lookup::select_by_name(resp.providers, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_provider_params() {
        let params = AddNetrisProviderParams::new(
            "netris", "https://netris.local", "admin", "pw", "zone-1", "site-a", "tenant-a",
        )
        .to_params();

        assert_eq!(params.get("sitename"), Some("site-a"));
        assert_eq!(params.get("tenantname"), Some("tenant-a"));
        assert!(!params.contains("netristag"));
    }
}
