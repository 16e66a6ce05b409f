//! 虚拟机管理命令

use acs_client::api::virtual_machine::{
    DestroyVirtualMachineParams, ListVirtualMachinesParams, MigrateVirtualMachineParams,
    RebootVirtualMachineParams, StartVirtualMachineParams, StopVirtualMachineParams,
    VirtualMachine,
};
use acs_client::{AcsClient, CancellationToken, Command};
use anyhow::Result;
use colored::Colorize;

use super::common::{cancel_on_ctrl_c, create_client, resolve_id, with_spinner};
use super::output::{or_dash, output_formatted, TableRow};
use crate::{ClientArgs, Target, VmAction};

impl TableRow for VirtualMachine {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "名称", "状态", "主机", "区域"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.state.clone(),
            or_dash(self.host_name.as_deref()),
            self.zone_name.clone(),
        ]
    }
}

pub async fn handle(args: &ClientArgs, action: VmAction) -> Result<()> {
    let client = create_client(args)?;
    let cancel = cancel_on_ctrl_c();

    match action {
        VmAction::List {
            name,
            state,
            format,
        } => list_vms(&client, name, state, &format).await,
        VmAction::Start { target } => {
            let id = vm_id(&client, &target).await?;
            run(&client, &cancel, StartVirtualMachineParams::new(id)).await
        }
        VmAction::Stop { target, forced } => {
            let id = vm_id(&client, &target).await?;
            let params = StopVirtualMachineParams::new(id).with_forced(forced);
            run(&client, &cancel, params).await
        }
        VmAction::Reboot { target } => {
            let id = vm_id(&client, &target).await?;
            run(&client, &cancel, RebootVirtualMachineParams::new(id)).await
        }
        VmAction::Destroy { target, expunge } => {
            let id = vm_id(&client, &target).await?;
            let params = DestroyVirtualMachineParams::new(id).with_expunge(expunge);
            run(&client, &cancel, params).await
        }
        VmAction::Migrate { target, host } => {
            let id = vm_id(&client, &target).await?;
            let params = match host {
                Some(host) => MigrateVirtualMachineParams::new(id).with_host(host),
                None => MigrateVirtualMachineParams::new(id).with_auto_select(true),
            };
            run(&client, &cancel, params).await
        }
    }
}

async fn vm_id(client: &AcsClient, target: &Target) -> Result<String> {
    resolve_id(target, client.virtual_machine().get_id_by_name(&target.name)).await
}

async fn list_vms(
    client: &AcsClient,
    name: Option<String>,
    state: Option<String>,
    format: &str,
) -> Result<()> {
    let mut params = ListVirtualMachinesParams::default().with_list_all(true);
    if let Some(name) = name {
        params = params.with_keyword(name);
    }
    if let Some(state) = state {
        params = params.with_state(state);
    }

    let resp = client.virtual_machine().list(params).await?;
    if resp.virtual_machines.is_empty() {
        println!("{}", "没有找到虚拟机".yellow());
        return Ok(());
    }

    output_formatted(&resp.virtual_machines, format)
}

/// 执行虚拟机命令并输出结果
async fn run<C>(client: &AcsClient, cancel: &CancellationToken, params: C) -> Result<()>
where
    C: Command<Response = VirtualMachine>,
{
    let vm = with_spinner(
        format!("执行 {}", C::NAME),
        client.execute_with_cancel(&params, cancel),
    )
    .await?;

    print_result(&vm);
    Ok(())
}

fn print_result(vm: &VirtualMachine) {
    // 同步模式下只拿到任务 ID
    if let Some(job_id) = &vm.job_id {
        println!("{} 已提交任务 {}", "✓".green().bold(), job_id.cyan().bold());
        println!("  查看结果: {} acs job wait {}", "$".bright_black(), job_id);
        return;
    }

    println!(
        "{} 虚拟机 {} ({})",
        "✓".green().bold(),
        vm.name.cyan().bold(),
        vm.id
    );
    if !vm.state.is_empty() {
        println!("  状态: {}", vm.state.yellow());
    }
    if let Some(host) = &vm.host_name {
        println!("  主机: {}", host);
    }
}
