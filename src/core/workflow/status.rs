// ============================================================================
// LocSync - 状态查询
// ============================================================================
//
// 文件: src/core/workflow/status.rs
// 职责: 只读地汇总本地与远端语言状态
// 边界:
//   - ✅ 远端语言列表与源语言推断
//   - ✅ 双向缺失语言
//   - ❌ 不应修改本地工程或远端项目
//
// ============================================================================

use super::SyncWorkflow;
use crate::core::reconciler::{apply_exclusions, compute_missing, detect_source_language, MissingLanguages};
use crate::error::Result;
use crate::models::language::{LanguageSet, RemoteLanguage};
use crate::services::{ProjectTool, RemoteService};

/// 状态查询结果
#[derive(Debug, Clone)]
pub struct StatusReport {
    /// 远端语言（已应用排除规则）
    pub remote: Vec<RemoteLanguage>,
    pub local: LanguageSet,
    /// 显式配置或自动推断的源语言；远端为空时为 None
    pub source_language: Option<String>,
    pub missing: MissingLanguages,
}

impl<'a, P: ProjectTool, R: RemoteService> SyncWorkflow<'a, P, R> {
    pub async fn status(&self) -> Result<StatusReport> {
        let listed = self
            .call_remote(None, "languages/list", || self.remote.list_languages())
            .await?;
        let visible = apply_exclusions(&RemoteLanguage::codes(&listed), &self.config.exclude)?;
        let remote: Vec<RemoteLanguage> = listed
            .into_iter()
            .filter(|language| visible.contains(&language.code))
            .collect();

        let source_language = match &self.config.source_language {
            Some(code) => Some(code.clone()),
            None => detect_source_language(&remote).ok().map(|language| language.code.clone()),
        };

        let local = self.local_languages().await?;
        let missing = compute_missing(&local, &visible);

        Ok(StatusReport {
            remote,
            local,
            source_language,
            missing,
        })
    }
}
