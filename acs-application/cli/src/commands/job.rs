//! 异步任务命令

use acs_client::api::async_job::ListAsyncJobsParams;
use acs_client::{AsyncJobResult, JobStatus, JobStatusCode};
use anyhow::Result;
use colored::Colorize;

use super::common::{cancel_on_ctrl_c, create_client, with_spinner};
use super::output::{or_dash, output_formatted, print_json, TableRow};
use crate::{ClientArgs, JobAction};

impl TableRow for AsyncJobResult {
    fn headers() -> Vec<&'static str> {
        vec!["任务 ID", "命令", "状态", "创建时间"]
    }

    fn row(&self) -> Vec<String> {
        let status = match self.status_code() {
            Some(JobStatusCode::Pending) => "执行中".to_string(),
            Some(JobStatusCode::Succeeded) => "成功".to_string(),
            Some(JobStatusCode::Failed) => "失败".to_string(),
            None => self.job_status.to_string(),
        };
        vec![
            self.job_id.clone(),
            self.cmd.rsplit('.').next().unwrap_or_default().to_string(),
            status,
            or_dash(self.created.as_deref()),
        ]
    }
}

pub async fn handle(args: &ClientArgs, action: JobAction) -> Result<()> {
    let client = create_client(args)?;

    match action {
        JobAction::Status { job_id } => {
            match client.async_job().status(&job_id).await? {
                JobStatus::Pending => println!("任务 {} {}", job_id.cyan(), "执行中".yellow()),
                JobStatus::Succeeded(result) => {
                    println!("任务 {} {}", job_id.cyan(), "成功".green().bold());
                    print_json(&result)?;
                }
                JobStatus::Failed(failure) => {
                    println!(
                        "任务 {} {}: {}",
                        job_id.cyan(),
                        "失败".red().bold(),
                        failure
                    );
                }
            }
            Ok(())
        }
        JobAction::Wait { job_id } => {
            let cancel = cancel_on_ctrl_c();
            let result = with_spinner(
                format!("等待任务 {}", job_id),
                client.async_job().wait(&job_id, &cancel),
            )
            .await?;
            print_json(&result)
        }
        JobAction::List { format } => {
            let resp = client
                .async_job()
                .list(ListAsyncJobsParams::default().with_list_all(true))
                .await?;
            if resp.async_jobs.is_empty() {
                println!("{}", "没有异步任务".yellow());
                return Ok(());
            }
            output_formatted(&resp.async_jobs, &format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_row() {
        let job = AsyncJobResult {
            job_id: "J1".to_string(),
            job_status: 2,
            cmd: "org.apache.cloudstack.api.command.admin.vm.DestroyVMCmdByAdmin".to_string(),
            ..Default::default()
        };
        assert_eq!(job.row(), vec!["J1", "DestroyVMCmdByAdmin", "失败", "-"]);
    }
}
