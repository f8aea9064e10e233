// ============================================================================
// LocSync - Xcode 工程工具
// ============================================================================
//
// 文件: src/services/xcode.rs
// 职责: 通过 xcodebuild / plutil 操作 Xcode 工程的本地化
// 边界:
//   - ✅ 工程语言检测
//   - ✅ 本地化导出 / 导入命令拼装
//   - ✅ 导出目录中的翻译文件查找
//   - ❌ 不应包含远端服务调用
//   - ❌ 不应包含语言对账逻辑
//
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use walkdir::WalkDir;

use super::process::run_command;
use super::ProjectTool;
use crate::error::{Result, SyncError};
use crate::models::config::ProjectConfig;

/// Xcode 用于基础本地化的伪语言
const BASE_REGION: &str = "Base";

/// 基于 xcodebuild 的工程工具
#[derive(Debug, Clone)]
pub struct XcodeProjectTool {
    xcodebuild: String,
    plutil: String,
    timeout: Duration,
}

impl XcodeProjectTool {
    pub fn new(xcodebuild: impl Into<String>, plutil: impl Into<String>, timeout: Duration) -> Self {
        Self {
            xcodebuild: xcodebuild.into(),
            plutil: plutil.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ProjectConfig) -> Self {
        Self::new(
            config.xcodebuild.clone(),
            config.plutil.clone(),
            Duration::from_secs(config.command_timeout),
        )
    }

    fn export_args(project: &Path, languages: &[String], dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-exportLocalizations".into(),
            "-project".into(),
            project.into(),
            "-localizationPath".into(),
            dest.into(),
        ];
        for language in languages {
            args.push("-exportLanguage".into());
            args.push(language.into());
        }
        args
    }

    fn import_args(project: &Path, artifact: &Path) -> Vec<OsString> {
        vec![
            "-importLocalizations".into(),
            "-project".into(),
            project.into(),
            "-localizationPath".into(),
            artifact.into(),
        ]
    }
}

/// 从 plutil 转换出的 pbxproj JSON 中读取 knownRegions
fn parse_known_regions(pbxproj_json: &str) -> Result<Vec<String>> {
    let root: Value = serde_json::from_str(pbxproj_json).map_err(|e| SyncError::ExternalTool {
        tool: "plutil".to_string(),
        code: None,
        output: format!("unexpected project.pbxproj output: {}", e),
    })?;

    let project = root
        .get("objects")
        .and_then(Value::as_object)
        .and_then(|objects| {
            objects
                .values()
                .find(|object| object.get("isa").and_then(Value::as_str) == Some("PBXProject"))
        })
        .ok_or_else(|| SyncError::ExternalTool {
            tool: "plutil".to_string(),
            code: None,
            output: "no PBXProject object in project.pbxproj".to_string(),
        })?;

    let regions = project
        .get("knownRegions")
        .and_then(Value::as_array)
        .map(|regions| {
            regions
                .iter()
                .filter_map(Value::as_str)
                .filter(|region| *region != BASE_REGION)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(regions)
}

#[async_trait]
impl ProjectTool for XcodeProjectTool {
    async fn detect_languages(&self, project: &Path) -> Result<Vec<String>> {
        let pbxproj = project.join("project.pbxproj");
        let args: Vec<OsString> = vec![
            "-convert".into(),
            "json".into(),
            "-o".into(),
            "-".into(),
            pbxproj.into(),
        ];
        let output = run_command(&self.plutil, args, self.timeout).await?;
        let regions = parse_known_regions(&output.stdout)?;
        debug!("known regions: {:?}", regions);
        Ok(regions)
    }

    async fn export_localizations(&self, project: &Path, languages: &[String], dest: &Path) -> Result<()> {
        let args = Self::export_args(project, languages, dest);
        let output = run_command(&self.xcodebuild, args, self.timeout).await?;
        debug!("export finished in {:?}", output.duration);
        Ok(())
    }

    fn locate_artifact(&self, dir: &Path, language: &str) -> Option<PathBuf> {
        let file_name = format!("{}.xliff", language);
        WalkDir::new(dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_type().is_file() && entry.file_name().to_str() == Some(file_name.as_str()))
            .map(|entry| entry.into_path())
    }

    async fn import_localization(&self, project: &Path, language: &str, artifact: &Path) -> Result<()> {
        let args = Self::import_args(project, artifact);
        let output = run_command(&self.xcodebuild, args, self.timeout).await?;
        debug!("imported {} in {:?}", language, output.duration);
        Ok(())
    }
}
