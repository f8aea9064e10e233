// ============================================================================
// LocSync - 同步结果数据模型
// ============================================================================
//
// 文件: src/models/outcome.rs
// 职责: 单语言结果与整体同步报告的数据结构定义
// 边界:
//   - ✅ 单语言结果状态定义
//   - ✅ 同步报告与计数统计
//   - ✅ 终止错误与部分报告的组合
//   - ❌ 不应包含报告渲染逻辑
//   - ❌ 不应包含同步流程逻辑
//
// ============================================================================

use serde::Serialize;
use std::fmt;

use crate::error::SyncError;
use crate::services::artifact::ArtifactStats;
use crate::services::UploadStats;

/// 同步方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncDirection {
    Upload,
    Download,
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncDirection::Upload => write!(f, "upload"),
            SyncDirection::Download => write!(f, "download"),
        }
    }
}

/// 单个语言的处理状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum OutcomeStatus {
    Succeeded,
    Skipped(String),
    Failed(String),
}

/// 单个语言的处理结果
#[derive(Debug, Clone, Serialize)]
pub struct LanguageOutcome {
    pub language: String,
    pub status: OutcomeStatus,
    /// 本地翻译文件统计（仅供参考）
    pub artifact: Option<ArtifactStats>,
    /// 远端上传统计
    pub upload: Option<UploadStats>,
}

impl LanguageOutcome {
    pub fn succeeded(language: &str) -> Self {
        Self::with_status(language, OutcomeStatus::Succeeded)
    }

    pub fn skipped(language: &str, reason: impl Into<String>) -> Self {
        Self::with_status(language, OutcomeStatus::Skipped(reason.into()))
    }

    pub fn failed(language: &str, reason: impl Into<String>) -> Self {
        Self::with_status(language, OutcomeStatus::Failed(reason.into()))
    }

    fn with_status(language: &str, status: OutcomeStatus) -> Self {
        Self {
            language: language.to_string(),
            status,
            artifact: None,
            upload: None,
        }
    }

    pub fn with_artifact(mut self, stats: Option<ArtifactStats>) -> Self {
        self.artifact = stats;
        self
    }

    pub fn with_upload(mut self, stats: UploadStats) -> Self {
        self.upload = Some(stats);
        self
    }
}

/// 一次同步的完整报告
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub direction: SyncDirection,
    pub source_language: Option<String>,
    /// 按处理顺序排列的语言结果
    pub outcomes: Vec<LanguageOutcome>,
    /// 因提前终止而未处理的语言
    pub not_attempted: Vec<String>,
    /// 在远端新建的语言
    pub added_remotely: Vec<String>,
    /// 新加入本地项目的语言
    pub added_locally: Vec<String>,
    /// 本地存在但远端缺失的语言
    pub missing_remotely: Vec<String>,
    /// 远端存在但本地缺失的语言
    pub missing_locally: Vec<String>,
}

impl SyncReport {
    pub fn new(direction: SyncDirection) -> Self {
        Self {
            direction,
            source_language: None,
            outcomes: Vec::new(),
            not_attempted: Vec::new(),
            added_remotely: Vec::new(),
            added_locally: Vec::new(),
            missing_remotely: Vec::new(),
            missing_locally: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: LanguageOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Succeeded))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Failed(_)))
    }

    /// 没有失败且没有被中断的语言即视为成功，跳过不影响结果
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.not_attempted.is_empty()
    }

    pub fn outcome(&self, language: &str) -> Option<&LanguageOutcome> {
        self.outcomes.iter().find(|o| o.language == language)
    }

    fn count(&self, predicate: impl Fn(&OutcomeStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.status)).count()
    }
}

/// 终止同步的错误，附带终止前累积的部分报告
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct WorkflowFailure {
    pub error: SyncError,
    pub report: SyncReport,
}

impl WorkflowFailure {
    pub fn new(error: SyncError, report: SyncReport) -> Self {
        Self { error, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut report = SyncReport::new(SyncDirection::Upload);
        report.record(LanguageOutcome::succeeded("fr"));
        report.record(LanguageOutcome::skipped("de", "no artifact"));
        report.record(LanguageOutcome::failed("uk", "rejected"));

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn test_skips_do_not_fail_the_report() {
        let mut report = SyncReport::new(SyncDirection::Download);
        report.record(LanguageOutcome::succeeded("fr"));
        report.record(LanguageOutcome::skipped("de", "no artifact"));
        assert!(report.is_success());
    }

    #[test]
    fn test_not_attempted_fails_the_report() {
        let mut report = SyncReport::new(SyncDirection::Upload);
        report.not_attempted.push("fr".to_string());
        assert!(!report.is_success());
    }

    #[test]
    fn test_outcome_status_serialization() {
        let json = serde_json::to_string(&OutcomeStatus::Skipped("no artifact".to_string()))
            .expect("Should serialize");
        assert_eq!(json, r#"{"status":"skipped","reason":"no artifact"}"#);
    }

    #[test]
    fn test_workflow_failure_displays_inner_error() {
        let failure = WorkflowFailure::new(
            SyncError::NoSourceLanguage,
            SyncReport::new(SyncDirection::Download),
        );
        assert!(failure.to_string().contains("source language"));
    }
}
