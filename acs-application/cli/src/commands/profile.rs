//! profile 管理命令

use acs_client::AcsConfig;
use anyhow::Result;
use colored::Colorize;

use crate::config::CliConfig;
use crate::ProfileAction;

pub fn handle(action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Add {
            name,
            endpoint,
            api_key,
            secret_key,
            insecure,
        } => {
            let mut acs = AcsConfig::new(endpoint, api_key, secret_key);
            acs.verify_ssl = !insecure;
            add_profile(&name, acs)
        }
        ProfileAction::List => list_profiles(),
        ProfileAction::Remove { name } => remove_profile(&name),
        ProfileAction::Use { name } => use_profile(&name),
    }
}

fn add_profile(name: &str, acs: AcsConfig) -> Result<()> {
    let mut config = CliConfig::load()?;
    let endpoint = acs.endpoint.clone();
    config.add_profile(name, acs)?;
    config.save()?;

    println!("{} profile {} 添加成功", "✓".green().bold(), name.cyan().bold());
    println!("  地址: {}", endpoint.yellow());
    Ok(())
}

fn list_profiles() -> Result<()> {
    let config = CliConfig::load()?;

    if config.profiles.is_empty() {
        println!("{}", "没有配置任何 profile".yellow());
        println!("\n使用以下命令添加:");
        println!(
            "  {} acs profile add <NAME> --endpoint <URL> --api-key <KEY> --secret-key <SECRET>",
            "$".bright_black()
        );
        return Ok(());
    }

    println!("{}\n", "profile 列表:".bold());
    for (name, acs) in &config.profiles {
        let marker = if config.default_profile.as_deref() == Some(name.as_str()) {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!("{} {}", marker, name.cyan().bold());
        println!("    地址: {}", acs.endpoint);
        println!(
            "    异步: {}  超时: {:?}",
            if acs.async_options.async_mode { "等待" } else { "不等待" },
            acs.async_options.timeout()
        );
    }
    Ok(())
}

fn remove_profile(name: &str) -> Result<()> {
    let mut config = CliConfig::load()?;
    config.remove_profile(name)?;
    config.save()?;

    println!("{} profile {} 已移除", "✓".green().bold(), name.cyan().bold());
    Ok(())
}

fn use_profile(name: &str) -> Result<()> {
    let mut config = CliConfig::load()?;
    config.set_default_profile(name)?;
    config.save()?;

    println!("{} 默认 profile: {}", "✓".green().bold(), name.cyan().bold());
    Ok(())
}
