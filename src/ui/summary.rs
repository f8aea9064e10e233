// ============================================================================
// LocSync - 同步结果汇总组件
// ============================================================================
//
// 文件: src/ui/summary.rs
// 职责: 同步报告与状态查询的终端展示
// 边界:
//   - ✅ 逐语言结果显示
//   - ✅ 统计信息格式化输出
//   - ✅ 远端语言表格显示
//   - ✅ 国际化文本支持
//   - ❌ 不应包含同步流程逻辑
//   - ❌ 不应包含远端调用
//
// ============================================================================

use std::io::{self, Write};
use std::time::Duration;

use crate::core::StatusReport;
use crate::models::outcome::{LanguageOutcome, OutcomeStatus, SyncDirection, SyncReport};
use crate::utils::colors::Colors;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::{t, tf};

const SEPARATOR: &str = "═══════════════════════════════════════";

// ============================================================================
// 同步汇总显示
// ============================================================================

/// 渲染同步汇总
pub fn render_sync_summary(report: &SyncReport, duration: Option<Duration>) {
    for line in sync_summary_lines(report, duration) {
        Logger::info(line);
    }
    let _ = io::stdout().flush();
}

/// 构建同步汇总的各行文本
pub fn sync_summary_lines(report: &SyncReport, duration: Option<Duration>) -> Vec<String> {
    let title = match report.direction {
        SyncDirection::Upload => t!("summary.upload_title"),
        SyncDirection::Download => t!("summary.download_title"),
    };

    let mut lines = vec![String::new(), Colors::bold(&title), SEPARATOR.to_string()];

    if let Some(source) = &report.source_language {
        lines.push(format!("{} {}", icons::SOURCE, tf!("summary.source_language", source)));
    }

    lines.extend(report.outcomes.iter().map(outcome_line));
    lines.extend(report.not_attempted.iter().map(|language| {
        format!(
            "{} {} {}",
            icons::PENDING,
            language,
            Colors::dim(&t!("summary.not_attempted_reason"))
        )
    }));

    lines.push(SEPARATOR.to_string());
    lines.push(format!("{} {}", icons::SUCCESS, tf!("summary.succeeded", report.succeeded())));
    lines.push(format!("{} {}", icons::SKIP, tf!("summary.skipped", report.skipped())));
    lines.push(format!("{} {}", icons::ERROR, tf!("summary.failed", report.failed())));
    if !report.not_attempted.is_empty() {
        lines.push(format!(
            "{} {}",
            icons::PENDING,
            tf!("summary.not_attempted", report.not_attempted.len())
        ));
    }
    if !report.added_remotely.is_empty() {
        lines.push(format!(
            "{} {}",
            icons::ADDED,
            tf!("summary.added_remotely", report.added_remotely.join(", "))
        ));
    }
    if !report.added_locally.is_empty() {
        lines.push(format!(
            "{} {}",
            icons::ADDED,
            tf!("summary.added_locally", report.added_locally.join(", "))
        ));
    }
    if let Some(duration) = duration {
        lines.push(format!(
            "{} {}",
            icons::TIME,
            tf!("summary.duration", format!("{:.1}", duration.as_secs_f64()))
        ));
    }

    lines
}

fn outcome_line(outcome: &LanguageOutcome) -> String {
    let mut details = Vec::new();
    if let Some(artifact) = &outcome.artifact {
        details.push(tf!("summary.artifact_stats", artifact.terms, artifact.bytes));
    }
    if let Some(upload) = &outcome.upload {
        details.push(tf!(
            "summary.upload_stats",
            upload.terms.added,
            upload.terms.deleted,
            upload.translations.added,
            upload.translations.updated
        ));
    }
    let details = if details.is_empty() {
        String::new()
    } else {
        format!(" {}", Colors::dim(&format!("({})", details.join(", "))))
    };

    match &outcome.status {
        OutcomeStatus::Succeeded => format!(
            "{} {}{}",
            Colors::success(icons::SUCCESS),
            outcome.language,
            details
        ),
        OutcomeStatus::Skipped(reason) => format!(
            "{} {} {}",
            Colors::warn(icons::SKIP),
            outcome.language,
            Colors::dim(reason)
        ),
        OutcomeStatus::Failed(reason) => format!(
            "{} {} {}",
            Colors::error(icons::ERROR),
            outcome.language,
            Colors::error(reason)
        ),
    }
}

// ============================================================================
// 状态显示
// ============================================================================

/// 渲染远端语言表格与缺失提示
pub fn render_status(status: &StatusReport) {
    for line in status_lines(status) {
        Logger::info(line);
    }
    let _ = io::stdout().flush();
}

pub fn status_lines(status: &StatusReport) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        Colors::bold(&t!("status.title")),
        SEPARATOR.to_string(),
    ];

    if status.remote.is_empty() {
        lines.push(t!("status.no_remote_languages"));
    }

    let code_width = status
        .remote
        .iter()
        .map(|language| language.code.chars().count())
        .max()
        .unwrap_or(0);

    for language in &status.remote {
        let icon = if status.source_language.as_deref() == Some(language.code.as_str()) {
            icons::SOURCE
        } else {
            icons::LANGUAGE
        };
        lines.push(format!(
            "{} {:<width$}  {:>6.1}%  {:>6}  {}",
            icon,
            language.code,
            language.percentage,
            language.translations,
            Colors::dim(&language.name),
            width = code_width
        ));
    }

    lines.push(SEPARATOR.to_string());
    match &status.source_language {
        Some(source) => lines.push(format!("{} {}", icons::SOURCE, tf!("summary.source_language", source))),
        None => lines.push(format!("{} {}", icons::WARNING, t!("status.no_source_language"))),
    }
    if !status.missing.missing_remotely.is_empty() {
        lines.push(format!(
            "{} {}",
            icons::WARNING,
            tf!("status.missing_remotely", status.missing.missing_remotely)
        ));
    }
    if !status.missing.missing_locally.is_empty() {
        lines.push(format!(
            "{} {}",
            icons::WARNING,
            tf!("status.missing_locally", status.missing.missing_locally)
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reconciler::MissingLanguages;
    use crate::models::language::RemoteLanguage;
    use crate::services::artifact::ArtifactStats;

    #[test]
    fn test_sync_summary_lists_every_language() {
        let mut report = SyncReport::new(SyncDirection::Upload);
        report.source_language = Some("en".to_string());
        report.record(
            LanguageOutcome::succeeded("fr").with_artifact(Some(ArtifactStats { bytes: 10, terms: 3 })),
        );
        report.record(LanguageOutcome::skipped("de", "no artifact"));
        report.record(LanguageOutcome::failed("uk", "rejected"));
        report.not_attempted = vec!["es".to_string()];

        let text = sync_summary_lines(&report, Some(Duration::from_millis(1500))).join("\n");
        for needle in ["fr", "de", "no artifact", "uk", "rejected", "es", "1.5"] {
            assert!(text.contains(needle), "missing {needle} in:\n{text}");
        }
    }

    #[test]
    fn test_sync_summary_omits_empty_sections() {
        let report = SyncReport::new(SyncDirection::Download);
        let lines = sync_summary_lines(&report, None);
        assert!(!lines.iter().any(|line| line.contains(icons::ADDED)));
        assert!(!lines.iter().any(|line| line.contains(icons::TIME)));
    }

    #[test]
    fn test_status_lines() {
        let status = StatusReport {
            remote: vec![RemoteLanguage {
                name: "English".to_string(),
                code: "en".to_string(),
                translations: 500,
                percentage: 100.0,
                updated: None,
            }],
            local: ["en", "fr"].into_iter().collect(),
            source_language: Some("en".to_string()),
            missing: MissingLanguages {
                missing_remotely: ["fr"].into_iter().collect(),
                missing_locally: Default::default(),
            },
        };

        let text = status_lines(&status).join("\n");
        assert!(text.contains("English"));
        assert!(text.contains("500"));
        assert!(text.contains("fr"));
    }
}
