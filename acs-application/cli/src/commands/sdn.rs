//! NSX / Netris 提供者命令

use acs_client::api::netris::{DeleteNetrisProviderParams, ListNetrisProvidersParams, NetrisProvider};
use acs_client::api::nsx::{DeleteNsxControllerParams, ListNsxControllersParams, NsxController};
use anyhow::Result;
use colored::Colorize;

use super::common::{cancel_on_ctrl_c, create_client, with_spinner};
use super::output::{or_dash, output_formatted, TableRow};
use crate::{ClientArgs, SdnAction};

impl TableRow for NsxController {
    fn headers() -> Vec<&'static str> {
        vec!["UUID", "名称", "地址", "端口", "区域"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.uuid.clone(),
            self.name.clone(),
            self.hostname.clone(),
            or_dash(self.port.as_deref()),
            self.zone_name.clone(),
        ]
    }
}

impl TableRow for NetrisProvider {
    fn headers() -> Vec<&'static str> {
        vec!["UUID", "名称", "地址", "站点", "区域"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.uuid.clone(),
            self.name.clone(),
            self.url.clone(),
            self.site_name.clone(),
            self.zone_name.clone(),
        ]
    }
}

pub async fn handle_nsx(args: &ClientArgs, action: SdnAction) -> Result<()> {
    let client = create_client(args)?;

    match action {
        SdnAction::List { zone, format } => {
            let mut params = ListNsxControllersParams::default();
            if let Some(zone) = zone {
                params = params.with_zone(zone);
            }
            let resp = client.nsx().list_controllers(params).await?;
            if resp.controllers.is_empty() {
                println!("{}", "没有添加 NSX 控制器".yellow());
                return Ok(());
            }
            output_formatted(&resp.controllers, &format)
        }
        SdnAction::Delete { name } => {
            let controller = client.nsx().get_controller_by_name(&name).await?;
            let cancel = cancel_on_ctrl_c();
            let params = DeleteNsxControllerParams::new(controller.uuid.as_str());
            let resp = with_spinner(
                format!("删除 NSX 控制器 {}", name),
                client.execute_with_cancel(&params, &cancel),
            )
            .await?;
            print_deleted("NSX 控制器", &name, resp.success);
            Ok(())
        }
    }
}

pub async fn handle_netris(args: &ClientArgs, action: SdnAction) -> Result<()> {
    let client = create_client(args)?;

    match action {
        SdnAction::List { zone, format } => {
            let mut params = ListNetrisProvidersParams::default();
            if let Some(zone) = zone {
                params = params.with_zone(zone);
            }
            let resp = client.netris().list_providers(params).await?;
            if resp.providers.is_empty() {
                println!("{}", "没有添加 Netris 提供者".yellow());
                return Ok(());
            }
            output_formatted(&resp.providers, &format)
        }
        SdnAction::Delete { name } => {
            let provider = client.netris().get_provider_by_name(&name).await?;
            let cancel = cancel_on_ctrl_c();
            let params = DeleteNetrisProviderParams::new(provider.uuid.as_str());
            let resp = with_spinner(
                format!("删除 Netris 提供者 {}", name),
                client.execute_with_cancel(&params, &cancel),
            )
            .await?;
            print_deleted("Netris 提供者", &name, resp.success);
            Ok(())
        }
    }
}

fn print_deleted(kind: &str, name: &str, success: bool) {
    if success {
        println!("{} {} {} 已删除", "✓".green().bold(), kind, name.cyan().bold());
    } else {
        println!("{} {} {} 删除失败", "✗".red().bold(), kind, name);
    }
}
