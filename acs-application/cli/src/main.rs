//! ACS CLI 应用

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "acs")]
#[command(about = "ACS - 云编排平台管理命令行工具", long_about = None)]
#[command(version)]
struct Cli {
    /// 日志级别
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(flatten)]
    client: ClientArgs,

    #[command(subcommand)]
    command: Commands,
}

/// 连接与异步任务选项
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// 使用的 profile（默认使用配置中的默认 profile）
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// 同步模式：异步命令直接返回 jobid，不等待完成
    #[arg(long, global = true)]
    pub sync: bool,

    /// 等待异步任务的超时时间（秒）
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// 平台连接配置
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// 调用任意 API 命令
    Call {
        /// 命令名称，如 listZones
        command: String,

        /// 参数，格式 key=value
        params: Vec<String>,

        /// 以状态变更命令提交（POST，返回 jobid 时等待任务）
        #[arg(short, long)]
        write: bool,
    },

    /// 虚拟机管理
    Vm {
        #[command(subcommand)]
        action: VmAction,
    },

    /// 存储池管理
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },

    /// 系统虚拟机管理
    #[command(name = "systemvm")]
    SystemVm {
        #[command(subcommand)]
        action: SystemVmAction,
    },

    /// 异步任务
    Job {
        #[command(subcommand)]
        action: JobAction,
    },

    /// NSX 控制器
    Nsx {
        #[command(subcommand)]
        action: SdnAction,
    },

    /// Netris 提供者
    Netris {
        #[command(subcommand)]
        action: SdnAction,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// 添加 profile
    Add {
        /// profile 名称
        name: String,
        /// API 地址
        #[arg(long)]
        endpoint: String,
        /// API Key
        #[arg(long)]
        api_key: String,
        /// Secret Key
        #[arg(long)]
        secret_key: String,
        /// 不验证 SSL 证书
        #[arg(long)]
        insecure: bool,
    },
    /// 列出 profile
    List,
    /// 移除 profile
    Remove { name: String },
    /// 设置默认 profile
    Use { name: String },
}

/// 按名称或 ID 指定资源
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// 资源名称（名称需完全匹配）
    pub name: String,

    /// 将参数作为资源 ID 使用
    #[arg(long)]
    pub id: bool,
}

#[derive(Subcommand)]
pub enum VmAction {
    /// 列出虚拟机
    List {
        /// 按名称过滤
        #[arg(short, long)]
        name: Option<String>,
        /// 按状态过滤
        #[arg(short, long)]
        state: Option<String>,
        /// 输出格式 (table/json)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },
    /// 启动虚拟机
    Start {
        #[command(flatten)]
        target: Target,
    },
    /// 停止虚拟机
    Stop {
        #[command(flatten)]
        target: Target,
        /// 强制停止
        #[arg(long)]
        forced: bool,
    },
    /// 重启虚拟机
    Reboot {
        #[command(flatten)]
        target: Target,
    },
    /// 销毁虚拟机
    Destroy {
        #[command(flatten)]
        target: Target,
        /// 立即彻底删除
        #[arg(long)]
        expunge: bool,
    },
    /// 迁移虚拟机
    Migrate {
        #[command(flatten)]
        target: Target,
        /// 目标主机 ID
        #[arg(long)]
        host: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum StorageAction {
    /// 列出存储池
    List {
        /// 按区域过滤
        #[arg(short, long)]
        zone: Option<String>,
        /// 输出格式 (table/json)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },
    /// 创建存储池
    Create {
        /// 存储池名称
        name: String,
        /// 存储地址，如 nfs://10.0.0.5/export
        #[arg(long)]
        url: String,
        /// 区域 ID
        #[arg(long)]
        zone: String,
        /// 作用域 (cluster/zone)
        #[arg(long)]
        scope: Option<String>,
        /// 标签（逗号分隔）
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// 删除存储池
    Delete {
        #[command(flatten)]
        target: Target,
        /// 强制删除
        #[arg(long)]
        forced: bool,
    },
    /// 同步存储池容量
    Sync {
        #[command(flatten)]
        target: Target,
    },
    /// 进入维护模式
    Maintain {
        #[command(flatten)]
        target: Target,
    },
    /// 退出维护模式
    CancelMaintain {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Subcommand)]
pub enum SystemVmAction {
    /// 列出系统虚拟机
    List {
        /// 类型 (consoleproxy/secondarystoragevm)
        #[arg(long = "type")]
        system_vm_type: Option<String>,
        /// 输出格式 (table/json)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },
    /// 启动系统虚拟机
    Start {
        #[command(flatten)]
        target: Target,
    },
    /// 停止系统虚拟机
    Stop {
        #[command(flatten)]
        target: Target,
        /// 强制停止
        #[arg(long)]
        forced: bool,
    },
    /// 重启系统虚拟机
    Reboot {
        #[command(flatten)]
        target: Target,
    },
    /// 销毁系统虚拟机
    Destroy {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Subcommand)]
pub enum JobAction {
    /// 查询一次任务状态
    Status { job_id: String },
    /// 等待任务完成
    Wait { job_id: String },
    /// 列出异步任务
    List {
        /// 输出格式 (table/json)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum SdnAction {
    /// 列出已添加的提供者
    List {
        /// 按区域过滤
        #[arg(short, long)]
        zone: Option<String>,
        /// 输出格式 (table/json)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },
    /// 删除提供者
    Delete {
        /// 提供者名称
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("ACS CLI 启动");

    let args = cli.client;
    match cli.command {
        Commands::Profile { action } => commands::profile::handle(action)?,
        Commands::Call {
            command,
            params,
            write,
        } => commands::call::handle(&args, &command, &params, write).await?,
        Commands::Vm { action } => commands::vm::handle(&args, action).await?,
        Commands::Storage { action } => commands::storage::handle(&args, action).await?,
        Commands::SystemVm { action } => commands::system_vm::handle(&args, action).await?,
        Commands::Job { action } => commands::job::handle(&args, action).await?,
        Commands::Nsx { action } => commands::sdn::handle_nsx(&args, action).await?,
        Commands::Netris { action } => commands::sdn::handle_netris(&args, action).await?,
    }

    Ok(())
}
