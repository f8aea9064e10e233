// ============================================================================
// LocSync - 下载工作流
// ============================================================================
//
// 文件: src/core/workflow/download.rs
// 职责: 从远端下载翻译并导入本地工程
// 边界:
//   - ✅ 源语言确定与目标语言选取
//   - ✅ 新语言的远端创建
//   - ✅ 逐语言下载与导入
//   - ❌ 不应包含报告渲染
//
// ============================================================================

use std::path::PathBuf;

use super::{abort_at, SyncWorkflow};
use crate::core::rate_limiter::OperationClass;
use crate::core::reconciler::{apply_exclusions, compute_missing, detect_source_language, select_targets};
use crate::error::{Result, SyncError};
use crate::models::language::{LanguageFilter, RemoteLanguage};
use crate::models::outcome::{LanguageOutcome, SyncDirection, SyncReport, WorkflowFailure};
use crate::services::artifact::ArtifactStats;
use crate::services::{AddLanguageStatus, DownloadRequest, ProjectTool, RemoteService};
use crate::ui::spinner::Spinner;
use crate::utils::logger::Logger;
use crate::{t, tf};

impl<'a, P: ProjectTool, R: RemoteService> SyncWorkflow<'a, P, R> {
    /// 下载并导入；失败时返回终止错误和已累积的部分报告
    pub async fn download(&self, filter: &LanguageFilter) -> std::result::Result<SyncReport, WorkflowFailure> {
        let mut report = SyncReport::new(SyncDirection::Download);

        match self.run_download(filter, &mut report).await {
            Ok(()) => Ok(report),
            Err(error) => Err(WorkflowFailure::new(error, report)),
        }
    }

    async fn run_download(&self, filter: &LanguageFilter, report: &mut SyncReport) -> Result<()> {
        let remote_languages: Vec<RemoteLanguage> = self
            .call_remote(None, "languages/list", || self.remote.list_languages())
            .await?;
        let remote = apply_exclusions(&RemoteLanguage::codes(&remote_languages), &self.config.exclude)?;

        let source = match &self.config.source_language {
            Some(code) => code.clone(),
            None => detect_source_language(&remote_languages)?.code.clone(),
        };
        Logger::info(tf!("sync.source_language", source));
        report.source_language = Some(source.clone());

        let local = self.local_languages().await?;
        let missing = compute_missing(&local, &remote);
        if !missing.missing_remotely.is_empty() {
            Logger::warn(tf!("download.missing_remotely", missing.missing_remotely));
        }
        if !missing.missing_locally.is_empty() {
            Logger::info(tf!("download.missing_locally", missing.missing_locally));
        }
        report.missing_remotely = missing.missing_remotely.to_vec();
        report.missing_locally = missing.missing_locally.to_vec();

        let selection = select_targets(SyncDirection::Download, &remote, &local, Some(source.as_str()), filter)?;
        let targets = selection.targets.to_vec();
        if targets.is_empty() {
            Logger::warn(t!("download.no_targets"));
            return Ok(());
        }
        Logger::info(tf!("download.targets", selection.targets));

        for code in selection.newly_discovered.iter() {
            let added = self
                .call_remote(Some(OperationClass::AddLanguage), "languages/add", || {
                    self.remote.add_language(code)
                })
                .await;
            match added {
                Ok(AddLanguageStatus::Added) => {
                    Logger::success(tf!("sync.language_added", code));
                    report.added_remotely.push(code.to_string());
                }
                Ok(AddLanguageStatus::AlreadyExists) => {
                    Logger::info(tf!("sync.language_exists", code));
                }
                Err(error) => {
                    report.not_attempted = targets;
                    return Err(error);
                }
            }
        }

        let workspace = self.scoped_workspace().map_err(|e| {
            report.not_attempted = targets.clone();
            e
        })?;

        // 仅按语言过滤时才传参考语言
        let reference = if filter.is_empty() { None } else { Some(source.as_str()) };

        let mut downloaded: Vec<(String, PathBuf)> = Vec::with_capacity(targets.len());
        for (index, code) in targets.iter().enumerate() {
            let dest = workspace
                .path()
                .join(format!("{}.{}", code, self.config.file_type));
            let request = DownloadRequest {
                language: code,
                reference,
                filters: &self.config.download_filters,
                file_type: &self.config.file_type,
            };

            let result = {
                let _spinner = Spinner::start(self.config.show_progress, tf!("download.downloading", code));
                self.call_remote(Some(OperationClass::Download), "projects/export", || {
                    self.remote.download_translations(&request, &dest)
                })
                .await
            };

            if let Err(error) = result {
                Logger::error(tf!("download.language_failed", code, error));
                // 已下载但未导入的语言同样视为未处理
                report
                    .not_attempted
                    .extend(downloaded.into_iter().map(|(code, _)| code));
                abort_at(report, &targets, index, &error);
                return Err(error);
            }
            downloaded.push((code.clone(), dest));
        }

        for (index, (code, artifact)) in downloaded.iter().enumerate() {
            if !artifact.is_file() {
                let reason = SyncError::ArtifactMissing {
                    language: code.clone(),
                    path: artifact.clone(),
                };
                Logger::warn(tf!("sync.skipped", code, reason));
                report.record(LanguageOutcome::skipped(code, reason.to_string()));
                continue;
            }

            let stats = ArtifactStats::inspect(artifact);
            let imported = {
                let _spinner = Spinner::start(self.config.show_progress, tf!("download.importing", code));
                self.project
                    .import_localization(&self.config.project_path, code, artifact)
                    .await
            };

            match imported {
                Ok(()) => {
                    Logger::success(tf!("download.language_done", code));
                    if !local.contains(code) {
                        report.added_locally.push(code.clone());
                    }
                    report.record(LanguageOutcome::succeeded(code).with_artifact(stats));
                }
                Err(error) => {
                    Logger::error(tf!("download.language_failed", code, error));
                    abort_at(report, &targets, index, &error);
                    return Err(error);
                }
            }
        }

        Ok(())
    }
}
