// ============================================================================
// LocSync - 上传命令处理
// ============================================================================
//
// 文件: src/cli/upload.rs
// 职责: 处理 upload 命令
// 边界:
//   - ✅ 上传命令参数定义
//   - ✅ 工作流调用与汇总显示
//   - ❌ 不应包含同步流程逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::time::Instant;

use super::{aborted, build_services};
use crate::core::{SyncWorkflow, UploadRequest};
use crate::models::language::LanguageFilter;
use crate::ui::summary::render_sync_summary;
use crate::utils::logger::Logger;
use crate::t;

/// 上传命令参数
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Delete remote terms that are not in the uploaded file
    #[arg(long)]
    pub delete_other_keys: bool,

    /// First upload: create the target languages on POEditor before uploading
    #[arg(long)]
    pub initial: bool,

    /// Only upload these languages (repeatable, comma separated)
    #[arg(short, long, value_name = "CODE")]
    pub language: Vec<String>,
}

/// 处理上传命令
pub async fn handle_upload(args: UploadArgs) -> Result<()> {
    let services = build_services()?;
    let request = UploadRequest {
        filter: LanguageFilter::from_args(&args.language),
        initial: args.initial,
        delete_other_keys: args.delete_other_keys,
    };

    Logger::info(t!("upload.start"));
    if request.initial {
        Logger::info(t!("upload.initial_mode"));
    }

    let started = Instant::now();
    let workflow = SyncWorkflow::new(services.workflow, &services.project, &services.remote);

    match workflow.upload(&request).await {
        Ok(report) => {
            render_sync_summary(&report, Some(started.elapsed()));
            Logger::success(t!("upload.completed"));
            Ok(())
        }
        Err(failure) => {
            render_sync_summary(&failure.report, Some(started.elapsed()));
            Err(aborted(t!("upload.aborted"), failure.error))
        }
    }
}
