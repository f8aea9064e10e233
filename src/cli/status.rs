// ============================================================================
// LocSync - 状态命令处理
// ============================================================================
//
// 文件: src/cli/status.rs
// 职责: 处理 status 命令
// 边界:
//   - ✅ 状态查询与显示
//   - ❌ 不应修改本地工程或远端项目
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use super::build_services;
use crate::core::SyncWorkflow;
use crate::ui::summary::render_status;
use crate::utils::logger::Logger;
use crate::t;

/// 状态命令参数
#[derive(Debug, Args)]
pub struct StatusArgs {}

pub async fn handle_status(_args: StatusArgs) -> Result<()> {
    let services = build_services()?;
    Logger::info(t!("status.start"));

    let workflow = SyncWorkflow::new(services.workflow, &services.project, &services.remote);
    let status = workflow.status().await?;
    render_status(&status);
    Ok(())
}
