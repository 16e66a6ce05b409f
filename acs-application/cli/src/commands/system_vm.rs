//! 系统虚拟机管理命令

use acs_client::api::system_vm::{
    DestroySystemVmParams, ListSystemVmsParams, RebootSystemVmParams, StartSystemVmParams,
    StopSystemVmParams, SystemVm,
};
use acs_client::{AcsClient, CancellationToken, Command};
use anyhow::Result;
use colored::Colorize;

use super::common::{cancel_on_ctrl_c, create_client, resolve_id, with_spinner};
use super::output::{or_dash, output_formatted, TableRow};
use crate::{ClientArgs, SystemVmAction, Target};

impl TableRow for SystemVm {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "名称", "类型", "状态", "公网 IP"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.system_vm_type.clone(),
            self.state.clone(),
            or_dash(self.public_ip.as_deref()),
        ]
    }
}

pub async fn handle(args: &ClientArgs, action: SystemVmAction) -> Result<()> {
    let client = create_client(args)?;
    let cancel = cancel_on_ctrl_c();

    match action {
        SystemVmAction::List {
            system_vm_type,
            format,
        } => {
            let mut params = ListSystemVmsParams::default();
            if let Some(t) = system_vm_type {
                params = params.with_type(t);
            }
            let resp = client.system_vm().list(params).await?;
            if resp.system_vms.is_empty() {
                println!("{}", "没有找到系统虚拟机".yellow());
                return Ok(());
            }
            output_formatted(&resp.system_vms, &format)
        }
        SystemVmAction::Start { target } => {
            let id = system_vm_id(&client, &target).await?;
            run(&client, &cancel, StartSystemVmParams::new(id)).await
        }
        SystemVmAction::Stop { target, forced } => {
            let id = system_vm_id(&client, &target).await?;
            run(&client, &cancel, StopSystemVmParams::new(id).with_forced(forced)).await
        }
        SystemVmAction::Reboot { target } => {
            let id = system_vm_id(&client, &target).await?;
            run(&client, &cancel, RebootSystemVmParams::new(id)).await
        }
        SystemVmAction::Destroy { target } => {
            let id = system_vm_id(&client, &target).await?;
            run(&client, &cancel, DestroySystemVmParams::new(id)).await
        }
    }
}

async fn system_vm_id(client: &AcsClient, target: &Target) -> Result<String> {
    resolve_id(target, client.system_vm().get_id_by_name(&target.name)).await
}

async fn run<C>(client: &AcsClient, cancel: &CancellationToken, params: C) -> Result<()>
where
    C: Command<Response = SystemVm>,
{
    let vm = with_spinner(
        format!("执行 {}", C::NAME),
        client.execute_with_cancel(&params, cancel),
    )
    .await?;

    match &vm.job_id {
        Some(job_id) => println!("{} 已提交任务 {}", "✓".green().bold(), job_id.cyan().bold()),
        None => println!(
            "{} 系统虚拟机 {} 状态: {}",
            "✓".green().bold(),
            vm.name.cyan().bold(),
            vm.state.yellow()
        ),
    }
    Ok(())
}
