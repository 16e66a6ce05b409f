//! 公共工具函数模块
//!
//! 提供各命令模块共享的功能，包括：
//! - 按 profile 与命令行选项创建客户端
//! - 等待异步任务时的进度提示
//! - Ctrl-C 取消

use std::future::Future;
use std::time::Duration;

use acs_client::{AcsClient, AcsError, AsyncOptions, CancellationToken};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::CliConfig;
use crate::{ClientArgs, Target};

/// 用命令行选项覆盖 profile 中的异步任务配置
pub fn apply_overrides(options: AsyncOptions, args: &ClientArgs) -> AsyncOptions {
    let mut options = match args.timeout {
        Some(secs) => options.with_timeout(Duration::from_secs(secs)),
        None => options,
    };
    if args.sync {
        options.async_mode = false;
    }
    options
}

/// 按 profile 创建客户端
pub fn create_client(args: &ClientArgs) -> Result<AcsClient> {
    let config = CliConfig::load()?;
    let profile = config.get_profile(args.profile.as_deref())?;

    let options = apply_overrides(profile.async_options.clone(), args);
    let acs_config = profile.clone().with_async_options(options);

    info!("连接平台: {}", acs_config.endpoint);
    AcsClient::new(acs_config).context("创建 ACS 客户端失败")
}

/// Ctrl-C 时触发的取消令牌
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });
    token
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// 执行命令并显示进度，超时与失败给出区分提示
pub async fn with_spinner<T, F>(message: String, fut: F) -> Result<T>
where
    F: Future<Output = acs_client::Result<T>>,
{
    let spinner = spinner(message);
    let result = fut.await;

    match result {
        Ok(value) => {
            spinner.finish_with_message(format!("{} 完成", "✓".green().bold()));
            Ok(value)
        }
        Err(e) => {
            spinner.finish_and_clear();
            report_error(&e);
            Err(e.into())
        }
    }
}

fn report_error(e: &AcsError) {
    match e {
        AcsError::JobTimeout { job_id, timeout, .. } => {
            println!(
                "{} 等待 {:?} 后任务 {} 仍未结束，结果未知",
                "?".yellow().bold(),
                timeout,
                job_id.cyan()
            );
            println!("  继续等待: {} acs job wait {}", "$".bright_black(), job_id);
        }
        AcsError::JobFailed { job_id, failure } => {
            println!(
                "{} 任务 {} 执行失败: {}",
                "✗".red().bold(),
                job_id.cyan(),
                failure.to_string().red()
            );
        }
        AcsError::Cancelled(_) => {
            println!("{} 已停止等待，平台上的任务不受影响", "!".yellow().bold());
        }
        _ => {}
    }
}

/// 按名称或 ID 解析资源 ID
pub async fn resolve_id<F>(target: &Target, lookup: F) -> Result<String>
where
    F: Future<Output = acs_client::Result<String>>,
{
    if target.id {
        return Ok(target.name.clone());
    }
    lookup
        .await
        .with_context(|| format!("查找 {} 失败", target.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(sync: bool, timeout: Option<u64>) -> ClientArgs {
        ClientArgs {
            profile: None,
            sync,
            timeout,
        }
    }

    #[test]
    fn test_apply_overrides() {
        let options = apply_overrides(AsyncOptions::default(), &args(false, None));
        assert_eq!(options, AsyncOptions::default());

        let options = apply_overrides(AsyncOptions::default(), &args(true, Some(30)));
        assert!(!options.async_mode);
        assert_eq!(options.timeout(), Duration::from_secs(30));
        assert_eq!(options.poll_interval, 1000);
    }

    #[tokio::test]
    async fn test_resolve_id_skips_lookup() {
        let target = Target {
            name: "vm-1".to_string(),
            id: true,
        };
        let id = resolve_id(&target, async {
            Err::<String, _>(AcsError::NotFound("unused".to_string()))
        })
        .await
        .unwrap();
        assert_eq!(id, "vm-1");
    }

    #[tokio::test]
    async fn test_resolve_id_reports_lookup_failure() {
        let target = Target {
            name: "web".to_string(),
            id: false,
        };
        let err = resolve_id(&target, async {
            Err::<String, _>(AcsError::AmbiguousName("web".to_string(), 2))
        })
        .await
        .unwrap_err();
        assert!(err.to_string().contains("web"));
    }
}
