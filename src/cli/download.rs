// ============================================================================
// LocSync - 下载命令处理
// ============================================================================
//
// 文件: src/cli/download.rs
// 职责: 处理 download 命令
// 边界:
//   - ✅ 下载命令参数定义
//   - ✅ 工作流调用与汇总显示
//   - ❌ 不应包含同步流程逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::time::Instant;

use super::{aborted, build_services};
use crate::core::SyncWorkflow;
use crate::models::language::LanguageFilter;
use crate::ui::summary::render_sync_summary;
use crate::utils::logger::Logger;
use crate::t;

/// 下载命令参数
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Only download these languages (repeatable, comma separated)
    #[arg(short, long, value_name = "CODE")]
    pub language: Vec<String>,
}

/// 处理下载命令
pub async fn handle_download(args: DownloadArgs) -> Result<()> {
    let services = build_services()?;
    let filter = LanguageFilter::from_args(&args.language);

    Logger::info(t!("download.start"));
    let started = Instant::now();
    let workflow = SyncWorkflow::new(services.workflow, &services.project, &services.remote);

    match workflow.download(&filter).await {
        Ok(report) => {
            render_sync_summary(&report, Some(started.elapsed()));
            Logger::success(t!("download.completed"));
            Ok(())
        }
        Err(failure) => {
            render_sync_summary(&failure.report, Some(started.elapsed()));
            Err(aborted(t!("download.aborted"), failure.error))
        }
    }
}
