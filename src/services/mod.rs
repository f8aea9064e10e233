// ============================================================================
// LocSync - 外部协作方模块
// ============================================================================
//
// 文件: src/services/mod.rs
// 职责: 本地工程工具与远端翻译服务的接口定义
// 边界:
//   - ✅ ProjectTool / RemoteService trait 定义
//   - ✅ 接口间传递的数据结构
//   - ✅ 子模块导出
//   - ❌ 不应包含同步流程编排
//   - ❌ 不应包含限速逻辑
//
// ============================================================================

pub mod artifact;
pub mod poeditor;
pub mod process;
pub mod xcode;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::config::UpdateMode;
use crate::models::language::RemoteLanguage;

pub use poeditor::PoEditorClient;
pub use xcode::XcodeProjectTool;

/// 本地工程工具（导出 / 导入本地化包）
#[async_trait]
pub trait ProjectTool: Send + Sync {
    /// 检测工程中已有的语言
    async fn detect_languages(&self, project: &Path) -> Result<Vec<String>>;

    /// 将指定语言导出到 dest 目录
    async fn export_localizations(&self, project: &Path, languages: &[String], dest: &Path) -> Result<()>;

    /// 在目录中查找某语言的翻译文件
    fn locate_artifact(&self, dir: &Path, language: &str) -> Option<PathBuf>;

    /// 将翻译文件导入工程
    async fn import_localization(&self, project: &Path, language: &str, artifact: &Path) -> Result<()>;
}

/// 添加语言的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddLanguageStatus {
    Added,
    AlreadyExists,
}

/// 上传选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub updating: UpdateMode,
    pub overwrite: bool,
    pub sync_terms: bool,
    pub fuzzy_trigger: bool,
}

/// 远端返回的上传统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStats {
    #[serde(default)]
    pub terms: TermStats,
    #[serde(default)]
    pub translations: TranslationStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermStats {
    #[serde(default)]
    pub parsed: u64,
    #[serde(default)]
    pub added: u64,
    #[serde(default)]
    pub deleted: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationStats {
    #[serde(default)]
    pub parsed: u64,
    #[serde(default)]
    pub added: u64,
    #[serde(default)]
    pub updated: u64,
}

/// 下载请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest<'a> {
    pub language: &'a str,
    /// 参考语言，仅在按语言过滤时传递
    pub reference: Option<&'a str>,
    pub filters: &'a [String],
    pub file_type: &'a str,
}

/// 远端翻译服务，实例持有认证信息
#[async_trait]
pub trait RemoteService: Send + Sync {
    async fn list_languages(&self) -> Result<Vec<RemoteLanguage>>;

    async fn add_language(&self, language: &str) -> Result<AddLanguageStatus>;

    async fn upload_translations(
        &self,
        language: &str,
        file_name: &str,
        content: Vec<u8>,
        options: &UploadOptions,
    ) -> Result<UploadStats>;

    /// 下载翻译文件并写入 dest
    async fn download_translations(&self, request: &DownloadRequest<'_>, dest: &Path) -> Result<()>;
}
