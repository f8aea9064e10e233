// ============================================================================
// LocSync - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 全局配置加载与运行时参数合并
//   - ✅ 命令路由分发
//   - ✅ 外部协作方的构建
//   - ❌ 不应包含同步流程逻辑
//   - ❌ 不应包含数据模型定义
//
// ============================================================================

pub mod download;
pub mod init;
pub mod status;
pub mod upload;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::WorkflowConfig;
use crate::error::SyncError;
use crate::models::config::{Config, RuntimeArgs};
use crate::services::{PoEditorClient, XcodeProjectTool};
use crate::utils::colors::Colors;
use crate::utils::logger::Logger;
use download::{handle_download, DownloadArgs};
use init::{handle_init, InitArgs};
use status::{handle_status, StatusArgs};
use upload::{handle_upload, UploadArgs};

/// LocSync - Xcode localization sync with POEditor
#[derive(Debug, Parser)]
#[command(name = "locsync")]
#[command(about = "Synchronize Xcode project localizations with POEditor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: locsync.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Interface language (zh_cn, en_us)
    #[arg(long, global = true)]
    pub ui_language: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable progress spinners
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export localizations and upload them to POEditor
    Upload(UploadArgs),
    /// Download translations from POEditor and import them
    Download(DownloadArgs),
    /// Show remote languages and missing languages on each side
    Status(StatusArgs),
    /// Initialize configuration file
    Init(InitArgs),
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // init 只写模板，不读取已有配置
    let config = match &cli.command {
        Commands::Init(_) => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };
    Config::install(config)?;

    // Merge runtime args to global config
    Config::merge_runtime_args(build_runtime_args(&cli))?;
    Colors::set_enabled(Config::get_colored());
    Logger::init_tracing(Config::get_verbose());

    match cli.command {
        Commands::Upload(args) => handle_upload(args).await,
        Commands::Download(args) => handle_download(args).await,
        Commands::Status(args) => handle_status(args).await,
        Commands::Init(args) => handle_init(args, cli.config),
    }
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        show_progress: if cli.no_progress { Some(false) } else { None },
        language: cli.ui_language.clone(),
    }
}

/// 一次命令所需的外部协作方与工作流配置
pub(crate) struct Services {
    pub project: XcodeProjectTool,
    pub remote: PoEditorClient,
    pub workflow: WorkflowConfig,
}

/// 校验配置并构建协作方；任何外部调用之前执行
pub(crate) fn build_services() -> Result<Services> {
    let config = Config::snapshot()?;
    let workflow = WorkflowConfig::from_config(&config)?;
    let project = XcodeProjectTool::from_config(&config.project);
    let remote = PoEditorClient::from_config(&config.remote, config.resolved_api_token())?;
    Ok(Services {
        project,
        remote,
        workflow,
    })
}

/// 终止错误交给 main 统一输出，这里只附加命令上下文
pub(crate) fn aborted(context: String, error: SyncError) -> anyhow::Error {
    anyhow::Error::new(error).context(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_aborted_error_mentions_cause_once() {
        let err = aborted(
            "Upload aborted".to_string(),
            SyncError::Remote {
                operation: "projects/upload".to_string(),
                code: "4048".to_string(),
                message: "Language not in project".to_string(),
            },
        );
        let printed = format!("{:#}", err);
        assert!(printed.starts_with("Upload aborted: "));
        assert_eq!(printed.matches("Language not in project").count(), 1);
        assert!(matches!(err.downcast_ref::<SyncError>(), Some(SyncError::Remote { .. })));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_upload_flags() {
        let cli = Cli::try_parse_from([
            "locsync",
            "--no-color",
            "upload",
            "--initial",
            "--delete-other-keys",
            "-l",
            "fr,de",
            "-l",
            "uk",
        ])
        .expect("Should parse");

        assert!(cli.no_color);
        match cli.command {
            Commands::Upload(args) => {
                assert!(args.initial);
                assert!(args.delete_other_keys);
                assert_eq!(args.language, vec!["fr,de", "uk"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["locsync", "download", "-v", "-c", "custom.yml", "--ui-language", "zh_cn"])
            .expect("Should parse");
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yml")));
        assert_eq!(cli.ui_language.as_deref(), Some("zh_cn"));

        let runtime = build_runtime_args(&cli);
        assert_eq!(runtime.verbose, Some(true));
        assert_eq!(runtime.colored, None);
        assert_eq!(runtime.language.as_deref(), Some("zh_cn"));
    }

    #[test]
    fn test_init_force() {
        let cli = Cli::try_parse_from(["locsync", "init", "--force"]).expect("Should parse");
        assert!(matches!(cli.command, Commands::Init(InitArgs { force: true })));
    }
}
