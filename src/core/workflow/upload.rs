// ============================================================================
// LocSync - 上传工作流
// ============================================================================
//
// 文件: src/core/workflow/upload.rs
// 职责: 导出本地化包并上传到远端
// 边界:
//   - ✅ 目标语言选取与导出
//   - ✅ 首次上传时的远端语言创建
//   - ✅ 逐语言上传、跳过与中止
//   - ❌ 不应包含报告渲染
//
// ============================================================================

use std::collections::HashMap;
use std::path::PathBuf;

use super::{abort_at, SyncWorkflow};
use crate::core::rate_limiter::OperationClass;
use crate::core::reconciler::{apply_exclusions, compute_missing, detect_source_language, select_targets};
use crate::error::{Result, SyncError};
use crate::models::language::{LanguageFilter, RemoteLanguage};
use crate::models::outcome::{LanguageOutcome, SyncDirection, SyncReport, WorkflowFailure};
use crate::services::artifact::ArtifactStats;
use crate::services::{AddLanguageStatus, ProjectTool, RemoteService};
use crate::ui::spinner::Spinner;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 一次上传调用的参数
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub filter: LanguageFilter,
    /// 先在远端创建目标语言
    pub initial: bool,
    /// 删除远端多余词条（强制 sync_terms）
    pub delete_other_keys: bool,
}

impl<'a, P: ProjectTool, R: RemoteService> SyncWorkflow<'a, P, R> {
    /// 上传；失败时返回终止错误和已累积的部分报告
    pub async fn upload(&self, request: &UploadRequest) -> std::result::Result<SyncReport, WorkflowFailure> {
        let mut report = SyncReport::new(SyncDirection::Upload);

        match self.run_upload(request, &mut report).await {
            Ok(()) => Ok(report),
            Err(error) => Err(WorkflowFailure::new(error, report)),
        }
    }

    async fn run_upload(&self, request: &UploadRequest, report: &mut SyncReport) -> Result<()> {
        let remote_languages = self
            .call_remote(None, "languages/list", || self.remote.list_languages())
            .await?;
        let remote = apply_exclusions(&RemoteLanguage::codes(&remote_languages), &self.config.exclude)?;
        let local = self.local_languages().await?;

        // 未配置时按远端词条数推断；远端为空（首次上传）时没有源语言
        let source = self.config.source_language.clone().or_else(|| {
            detect_source_language(&remote_languages)
                .ok()
                .map(|language| language.code.clone())
        });
        if let Some(source) = &source {
            Logger::info(tf!("sync.source_language", source));
        }
        report.source_language = source.clone();

        let missing = compute_missing(&local, &remote);
        report.missing_remotely = missing.missing_remotely.to_vec();
        report.missing_locally = missing.missing_locally.to_vec();

        let selection = select_targets(
            SyncDirection::Upload,
            &remote,
            &local,
            source.as_deref(),
            &request.filter,
        )?;
        let targets = selection.targets.to_vec();

        if !request.initial && !missing.missing_remotely.is_empty() {
            Logger::warn(tf!("upload.missing_remotely", missing.missing_remotely));
        }
        if targets.is_empty() {
            Logger::warn(t!("upload.no_targets"));
            return Ok(());
        }
        Logger::info(tf!("upload.targets", selection.targets));

        let workspace = self.scoped_workspace().map_err(|e| {
            report.not_attempted = targets.clone();
            e
        })?;

        let export = {
            let _spinner = Spinner::start(self.config.show_progress, t!("upload.exporting"));
            self.project
                .export_localizations(&self.config.project_path, &targets, workspace.path())
                .await
        };
        if let Err(error) = export {
            report.not_attempted = targets;
            return Err(error);
        }

        let artifacts: HashMap<&str, PathBuf> = targets
            .iter()
            .filter_map(|code| {
                self.project
                    .locate_artifact(workspace.path(), code)
                    .map(|path| (code.as_str(), path))
            })
            .collect();

        if request.initial {
            if let Err(error) = self.add_remote_languages(&targets, report).await {
                report.not_attempted = targets.clone();
                return Err(error);
            }
            let _spinner = Spinner::start(self.config.show_progress, t!("upload.waiting_after_add"));
            self.limiter.wait_full(OperationClass::Upload).await;
        }

        let mut options = self.config.upload.clone();
        if request.delete_other_keys {
            options.sync_terms = true;
        }

        for (index, code) in targets.iter().enumerate() {
            let Some(path) = artifacts.get(code.as_str()) else {
                let reason = SyncError::ArtifactMissing {
                    language: code.clone(),
                    path: workspace.path().to_path_buf(),
                };
                Logger::warn(tf!("sync.skipped", code, reason));
                report.record(LanguageOutcome::skipped(code, reason.to_string()));
                continue;
            };

            let stats = ArtifactStats::inspect(path);
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| format!("{}.xliff", code));

            let content = match tokio::fs::read(path).await {
                Ok(content) => content,
                Err(error) => {
                    let error = SyncError::from(error);
                    abort_at(report, &targets, index, &error);
                    return Err(error);
                }
            };

            let uploaded = self
                .call_remote(Some(OperationClass::Upload), "projects/upload", || {
                    self.remote
                        .upload_translations(code, &file_name, content.clone(), &options)
                })
                .await;

            match uploaded {
                Ok(upload_stats) => {
                    Logger::success(tf!(
                        "upload.language_done",
                        code,
                        upload_stats.terms.added,
                        upload_stats.translations.added,
                        upload_stats.translations.updated
                    ));
                    report.record(
                        LanguageOutcome::succeeded(code)
                            .with_artifact(stats)
                            .with_upload(upload_stats),
                    );
                }
                Err(error) => {
                    Logger::error(tf!("upload.language_failed", code, error));
                    abort_at(report, &targets, index, &error);
                    return Err(error);
                }
            }
        }

        Ok(())
    }

    /// 首次上传：逐个在远端创建目标语言
    async fn add_remote_languages(&self, targets: &[String], report: &mut SyncReport) -> Result<()> {
        for code in targets {
            let status = self
                .call_remote(Some(OperationClass::AddLanguage), "languages/add", || {
                    self.remote.add_language(code)
                })
                .await?;
            match status {
                AddLanguageStatus::Added => {
                    Logger::success(tf!("sync.language_added", code));
                    report.added_remotely.push(code.clone());
                }
                AddLanguageStatus::AlreadyExists => {
                    Logger::info(tf!("sync.language_exists", code));
                }
            }
        }
        Ok(())
    }
}
