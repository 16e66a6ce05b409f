//! 存储池管理命令

use acs_client::api::storage_pool::{
    CancelStorageMaintenanceParams, CreateStoragePoolParams, DeleteStoragePoolParams,
    EnableStorageMaintenanceParams, ListStoragePoolsParams, StoragePool, SyncStoragePoolParams,
};
use acs_client::{AcsClient, CancellationToken, Command};
use anyhow::Result;
use colored::Colorize;

use super::common::{cancel_on_ctrl_c, create_client, resolve_id, with_spinner};
use super::output::{output_formatted, TableRow};
use crate::{ClientArgs, StorageAction, Target};

const GIB: i64 = 1024 * 1024 * 1024;

impl TableRow for StoragePool {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "名称", "类型", "状态", "已用/总量 (GiB)"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.pool_type.clone(),
            self.state.clone(),
            format!(
                "{}/{}",
                self.disk_size_used / GIB,
                self.disk_size_total / GIB
            ),
        ]
    }
}

pub async fn handle(args: &ClientArgs, action: StorageAction) -> Result<()> {
    let client = create_client(args)?;
    let cancel = cancel_on_ctrl_c();

    match action {
        StorageAction::List { zone, format } => {
            let mut params = ListStoragePoolsParams::default();
            if let Some(zone) = zone {
                params = params.with_zone(zone);
            }
            let resp = client.storage_pool().list(params).await?;
            if resp.storage_pools.is_empty() {
                println!("{}", "没有找到存储池".yellow());
                return Ok(());
            }
            output_formatted(&resp.storage_pools, &format)
        }
        StorageAction::Create {
            name,
            url,
            zone,
            scope,
            tags,
        } => {
            let mut params = CreateStoragePoolParams::new(name, url, zone).with_tags(tags);
            if let Some(scope) = scope {
                params = params.with_scope(scope);
            }
            run(&client, &cancel, params).await
        }
        StorageAction::Delete { target, forced } => {
            let id = pool_id(&client, &target).await?;
            let params = DeleteStoragePoolParams::new(id.as_str()).with_forced(forced);
            let resp = with_spinner(
                format!("删除存储池 {}", target.name),
                client.execute_with_cancel(&params, &cancel),
            )
            .await?;

            if resp.success {
                println!("{} 存储池 {} 已删除", "✓".green().bold(), id.cyan().bold());
            } else {
                println!(
                    "{} 存储池 {} 删除失败: {}",
                    "✗".red().bold(),
                    id,
                    resp.displaytext.unwrap_or_default()
                );
            }
            Ok(())
        }
        StorageAction::Sync { target } => {
            let id = pool_id(&client, &target).await?;
            run(&client, &cancel, SyncStoragePoolParams::new(id)).await
        }
        StorageAction::Maintain { target } => {
            let id = pool_id(&client, &target).await?;
            run(&client, &cancel, EnableStorageMaintenanceParams::new(id)).await
        }
        StorageAction::CancelMaintain { target } => {
            let id = pool_id(&client, &target).await?;
            run(&client, &cancel, CancelStorageMaintenanceParams::new(id)).await
        }
    }
}

async fn pool_id(client: &AcsClient, target: &Target) -> Result<String> {
    resolve_id(target, client.storage_pool().get_id_by_name(&target.name)).await
}

async fn run<C>(client: &AcsClient, cancel: &CancellationToken, params: C) -> Result<()>
where
    C: Command<Response = StoragePool>,
{
    let pool = with_spinner(
        format!("执行 {}", C::NAME),
        client.execute_with_cancel(&params, cancel),
    )
    .await?;

    if let Some(job_id) = &pool.job_id {
        println!("{} 已提交任务 {}", "✓".green().bold(), job_id.cyan().bold());
        return Ok(());
    }

    println!(
        "{} 存储池 {} ({})",
        "✓".green().bold(),
        pool.name.cyan().bold(),
        pool.id
    );
    println!("  状态: {}", pool.state.yellow());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_pool_row() {
        let pool = StoragePool {
            id: "p1".to_string(),
            name: "primary".to_string(),
            pool_type: "NetworkFilesystem".to_string(),
            state: "Up".to_string(),
            disk_size_total: 100 * GIB,
            disk_size_used: 25 * GIB,
            ..Default::default()
        };
        assert_eq!(pool.row()[4], "25/100");
        assert_eq!(StoragePool::headers().len(), pool.row().len());
    }
}
