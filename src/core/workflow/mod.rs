// ============================================================================
// LocSync - 同步工作流
// ============================================================================
//
// 文件: src/core/workflow/mod.rs
// 职责: 上传 / 下载流程的公共部分
// 边界:
//   - ✅ 工作流不可变配置构建与校验
//   - ✅ 远端调用的限速与重试包装
//   - ✅ 本地语言集合获取
//   - ✅ 临时工作目录管理
//   - ❌ 不应包含具体的 HTTP / 进程细节
//   - ❌ 不应包含 CLI 参数解析
//
// ============================================================================

mod download;
mod status;
mod upload;

pub use status::StatusReport;
pub use upload::UploadRequest;

use std::future::Future;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::debug;

use super::rate_limiter::{OperationClass, RateLimiter, RateLimits};
use super::reconciler::apply_exclusions;
use super::retry::{with_retry_if, RetryPolicy};
use crate::error::{Result, SyncError};
use crate::models::config::Config;
use crate::models::language::LanguageSet;
use crate::models::outcome::{LanguageOutcome, SyncReport};
use crate::services::{ProjectTool, RemoteService, UploadOptions};
use crate::tf;
use crate::ui::spinner::Spinner;
use crate::utils::constants::TEMP_DIR_PREFIX;

/// 本地语言集合来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalLanguages {
    /// 由工程工具检测
    AutoDetect,
    /// 配置中显式列出
    Explicit(LanguageSet),
}

/// 一次工作流调用的不可变输入
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub project_path: PathBuf,
    pub local_languages: LocalLanguages,
    /// 显式配置的源语言
    pub source_language: Option<String>,
    pub exclude: Vec<String>,
    pub upload: UploadOptions,
    pub download_filters: Vec<String>,
    pub file_type: String,
    pub rate_limits: RateLimits,
    pub retry: RetryPolicy,
    /// 临时目录的父目录，默认系统临时目录
    pub temp_root: Option<PathBuf>,
    pub show_progress: bool,
}

impl WorkflowConfig {
    /// 从全局配置构建；必填项缺失或排除规则无效时在任何外部调用之前失败
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate_for_sync()?;
        apply_exclusions(&LanguageSet::new(), &config.languages.exclude)?;

        let local_languages = if config.languages.auto_detect {
            LocalLanguages::AutoDetect
        } else {
            LocalLanguages::Explicit(config.languages.codes.iter().cloned().collect())
        };

        let source_language = config
            .languages
            .source
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string);

        Ok(Self {
            project_path: PathBuf::from(&config.project.path),
            local_languages,
            source_language,
            exclude: config.languages.exclude.clone(),
            upload: UploadOptions {
                updating: config.upload.updating,
                overwrite: config.upload.overwrite,
                sync_terms: config.upload.sync_terms,
                fuzzy_trigger: config.upload.fuzzy_trigger,
            },
            download_filters: config.download.filters.clone(),
            file_type: config.download.file_type.clone(),
            rate_limits: RateLimits::from(&config.rate_limit),
            retry: RetryPolicy::new(config.remote.retry_count),
            temp_root: None,
            show_progress: config.output.show_progress,
        })
    }
}

/// 同步工作流，每次 upload / download 调用独占一个限速器
pub struct SyncWorkflow<'a, P: ProjectTool, R: RemoteService> {
    config: WorkflowConfig,
    project: &'a P,
    remote: &'a R,
    limiter: RateLimiter,
}

impl<'a, P: ProjectTool, R: RemoteService> SyncWorkflow<'a, P, R> {
    pub fn new(config: WorkflowConfig, project: &'a P, remote: &'a R) -> Self {
        let limiter = RateLimiter::new(config.rate_limits);
        Self {
            config,
            project,
            remote,
            limiter,
        }
    }

    /// 调用远端：每次尝试（含重试）都经过限速等待并在返回后打点
    async fn call_remote<T, F, Fut>(&self, class: Option<OperationClass>, operation: &str, op: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let op = &op;
        // 上传超时后服务端可能已处理，只在连接失败时重发
        let should_retry: fn(&SyncError) -> bool = match class {
            Some(OperationClass::Upload) => SyncError::is_connect_failure,
            _ => SyncError::is_transient,
        };
        with_retry_if(
            &self.config.retry,
            operation,
            move || async move {
                if let Some(class) = class {
                    self.pace(class).await;
                }
                debug!("remote call: {}", operation);
                let result = op().await;
                if let Some(class) = class {
                    self.limiter.mark(class);
                }
                result
            },
            should_retry,
        )
        .await
    }

    /// 限速等待，等待时间较长时显示 Spinner
    async fn pace(&self, class: OperationClass) {
        let remaining = self.limiter.remaining(class);
        if remaining.is_zero() {
            return;
        }
        let spinner = Spinner::start(
            self.config.show_progress,
            tf!("sync.rate_limit_wait", class, remaining.as_secs().max(1)),
        );
        self.limiter.wait_if_needed(class).await;
        spinner.finish();
    }

    /// 本地语言集合（已应用排除规则）
    async fn local_languages(&self) -> Result<LanguageSet> {
        let languages = match &self.config.local_languages {
            LocalLanguages::AutoDetect => self
                .project
                .detect_languages(&self.config.project_path)
                .await?
                .into_iter()
                .collect(),
            LocalLanguages::Explicit(codes) => codes.clone(),
        };
        apply_exclusions(&languages, &self.config.exclude)
    }

    /// 本次调用独占的临时目录，离开作用域即删除
    fn scoped_workspace(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);
        let dir = match &self.config.temp_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        debug!("working directory: {}", dir.path().display());
        Ok(dir)
    }
}

/// 在第 index 个目标处中止：记录失败并把之后的目标记为未处理
fn abort_at(report: &mut SyncReport, targets: &[String], index: usize, error: &SyncError) {
    if let Some(language) = targets.get(index) {
        report.record(LanguageOutcome::failed(language, error.to_string()));
    }
    report
        .not_attempted
        .extend(targets.iter().skip(index + 1).cloned());
}
