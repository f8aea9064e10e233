// ============================================================================
// LocSync - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化（YAML / TOML）
//   - ✅ 配置默认值
//   - ✅ 配置文件发现与读写
//   - ✅ 运行时参数合并
//   - ❌ 不应包含同步流程逻辑
//   - ❌ 不应包含 CLI 参数处理
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::SyncError;
use crate::utils::constants::{CONFIG_FILE_NAMES, TOKEN_ENV_VAR};

/// 全局配置管理器
static GLOBAL_CONFIG: std::sync::OnceLock<Arc<RwLock<Config>>> = std::sync::OnceLock::new();

/// LocSync 配置文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 本地工程配置
    #[serde(default)]
    pub project: ProjectConfig,
    /// 远端服务配置
    #[serde(default)]
    pub remote: RemoteConfig,
    /// 语言配置
    #[serde(default)]
    pub languages: LanguagesConfig,
    /// 上传选项
    #[serde(default)]
    pub upload: UploadConfig,
    /// 下载选项
    #[serde(default)]
    pub download: DownloadConfig,
    /// 限速配置
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
    /// 国际化配置
    #[serde(default)]
    pub i18n: I18nConfig,
    /// 配置文件来源（未找到配置文件时为 None）
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

/// 本地工程配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// .xcodeproj 路径
    #[serde(default)]
    pub path: String,
    /// xcodebuild 可执行文件
    #[serde(default = "Config::default_xcodebuild")]
    pub xcodebuild: String,
    /// plutil 可执行文件
    #[serde(default = "Config::default_plutil")]
    pub plutil: String,
    /// 单次外部命令超时（秒）
    #[serde(default = "Config::default_command_timeout")]
    pub command_timeout: u64,
}

/// 远端服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "Config::default_base_url")]
    pub base_url: String,
    /// 单次请求超时（秒）
    #[serde(default = "Config::default_request_timeout")]
    pub request_timeout: u64,
    /// 瞬时网络错误的最大尝试次数（含首次）
    #[serde(default = "Config::default_retry_count")]
    pub retry_count: u32,
}

/// 语言配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesConfig {
    /// 是否从工程中自动检测本地语言
    #[serde(default = "Config::default_auto_detect")]
    pub auto_detect: bool,
    /// 关闭自动检测时使用的本地语言列表
    #[serde(default)]
    pub codes: Vec<String>,
    /// 源语言，未设置时下载方向自动推断
    #[serde(default)]
    pub source: Option<String>,
    /// 排除的语言（glob 模式）
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// 远端导入模式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    Terms,
    #[default]
    TermsTranslations,
    Translations,
}

impl UpdateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMode::Terms => "terms",
            UpdateMode::TermsTranslations => "terms_translations",
            UpdateMode::Translations => "translations",
        }
    }
}

/// 上传选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 覆盖远端已有翻译
    #[serde(default = "Config::default_overwrite")]
    pub overwrite: bool,
    /// 删除远端多余词条
    #[serde(default)]
    pub sync_terms: bool,
    #[serde(default)]
    pub updating: UpdateMode,
    /// 源文本变化时将翻译标记为模糊
    #[serde(default)]
    pub fuzzy_trigger: bool,
}

/// 下载选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// 导出过滤条件（如 translated、proofread）
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default = "Config::default_file_type")]
    pub file_type: String,
}

/// 各类远端调用之间的最小间隔（秒）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "Config::default_add_language_interval")]
    pub add_language: u64,
    #[serde(default = "Config::default_download_interval")]
    pub download: u64,
    #[serde(default = "Config::default_upload_interval")]
    pub upload: u64,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 是否显示进度
    #[serde(default = "Config::default_show_progress")]
    pub show_progress: bool,
    /// 是否详细输出
    #[serde(default)]
    pub verbose: bool,
    /// 是否彩色输出
    #[serde(default = "Config::default_colored")]
    pub colored: bool,
}

/// 国际化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// 界面语言
    #[serde(default = "Config::default_language")]
    pub language: String,
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub show_progress: Option<bool>,
    pub language: Option<String>,
}

/// 配置默认值 trait - 不依赖全局配置初始化
pub trait ConfigDefaults {
    fn default_xcodebuild() -> String {
        "xcodebuild".to_string()
    }

    fn default_plutil() -> String {
        "plutil".to_string()
    }

    fn default_command_timeout() -> u64 {
        600
    }

    fn default_base_url() -> String {
        "https://api.poeditor.com/v2".to_string()
    }

    fn default_request_timeout() -> u64 {
        60
    }

    fn default_retry_count() -> u32 {
        3
    }

    fn default_auto_detect() -> bool {
        true
    }

    fn default_overwrite() -> bool {
        true
    }

    fn default_file_type() -> String {
        "xliff".to_string()
    }

    fn default_add_language_interval() -> u64 {
        2
    }

    fn default_download_interval() -> u64 {
        2
    }

    /// 远端上传配额：约每 20 秒一次
    fn default_upload_interval() -> u64 {
        20
    }

    fn default_show_progress() -> bool {
        true
    }

    fn default_colored() -> bool {
        true
    }

    fn default_language() -> String {
        "en_us".to_string()
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 初始化全局配置（程序启动时调用）
    pub fn initialize(explicit_path: Option<&Path>) -> anyhow::Result<()> {
        Self::install(Self::load(explicit_path)?)
    }

    /// 查找并加载配置；未找到文件时使用默认配置
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, SyncError> {
        match Self::discover(explicit_path) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// 安装全局配置，只能调用一次
    pub fn install(config: Config) -> anyhow::Result<()> {
        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 查找配置文件：显式路径优先，否则在当前目录按约定文件名查找
    pub fn discover(explicit_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit_path {
            return Some(path.to_path_buf());
        }
        CONFIG_FILE_NAMES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists())
    }

    /// 从文件加载配置，按扩展名选择 YAML 或 TOML
    pub fn load_from_path(path: &Path) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config = if is_toml(path) {
            toml::from_str::<Config>(&content).map_err(|e| {
                SyncError::Configuration(format!("invalid {}: {}", path.display(), e))
            })?
        } else {
            Self::from_yaml(&content).map_err(|e| {
                SyncError::Configuration(format!("invalid {}: {}", path.display(), e))
            })?
        };
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // 空文件按默认配置处理
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// 合并运行时参数
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        config.apply_runtime_args(args);
        Ok(())
    }

    fn apply_runtime_args(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(show_progress) = args.show_progress {
            self.output.show_progress = show_progress;
        }
        if let Some(language) = args.language {
            self.i18n.language = language;
        }
    }

    /// 环境变量中的令牌优先于配置文件
    pub fn resolved_api_token(&self) -> String {
        std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .unwrap_or_else(|| self.remote.api_token.clone())
    }

    /// 上传/下载前的必填项校验
    pub fn validate_for_sync(&self) -> Result<(), SyncError> {
        if self.source_path.is_none() {
            return Err(SyncError::Configuration(format!(
                "no configuration file found (looked for {}); run `locsync init` first",
                CONFIG_FILE_NAMES.join(", ")
            )));
        }

        let mut missing = Vec::new();
        if self.project.path.trim().is_empty() {
            missing.push("project.path");
        }
        if self.resolved_api_token().trim().is_empty() {
            missing.push("remote.api_token");
        }
        if self.remote.project_id.trim().is_empty() {
            missing.push("remote.project_id");
        }
        if !self.languages.auto_detect && self.languages.codes.is_empty() {
            missing.push("languages.codes");
        }
        if !missing.is_empty() {
            return Err(SyncError::Configuration(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = if is_toml(config_path) {
            toml::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 生成默认配置模板
    pub fn generate_default_template() -> Self {
        let mut config = Self::default();
        config.project.path = "MyApp.xcodeproj".to_string();
        config.remote.project_id = "000000".to_string();
        config.download.filters = vec!["translated".to_string()];
        config
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        Self::generate_default_template().save_to_file(config_path)
    }

    /// 获取全局配置快照
    pub fn snapshot() -> anyhow::Result<Config> {
        Self::read(|config| config.clone())
    }

    /// 获取界面语言
    pub fn get_language() -> anyhow::Result<String> {
        Self::read(|config| config.i18n.language.clone())
    }

    /// 获取详细输出设置（带默认值）
    pub fn get_verbose() -> bool {
        Self::read(|config| config.output.verbose).unwrap_or(false)
    }

    /// 获取是否彩色输出（带默认值）
    pub fn get_colored() -> bool {
        Self::read(|config| config.output.colored).unwrap_or_else(|_| Self::default_colored())
    }

    /// 获取是否显示进度（带默认值）
    pub fn get_show_progress() -> bool {
        Self::read(|config| config.output.show_progress)
            .unwrap_or_else(|_| Self::default_show_progress())
    }

    fn read<T>(f: impl FnOnce(&Config) -> T) -> anyhow::Result<T> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(f(&config))
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("toml")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            remote: RemoteConfig::default(),
            languages: LanguagesConfig::default(),
            upload: UploadConfig::default(),
            download: DownloadConfig::default(),
            rate_limit: RateLimitConfig::default(),
            output: OutputConfig::default(),
            i18n: I18nConfig::default(),
            source_path: None,
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            xcodebuild: Config::default_xcodebuild(),
            plutil: Config::default_plutil(),
            command_timeout: Config::default_command_timeout(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            project_id: String::new(),
            base_url: Config::default_base_url(),
            request_timeout: Config::default_request_timeout(),
            retry_count: Config::default_retry_count(),
        }
    }
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            auto_detect: Config::default_auto_detect(),
            codes: Vec::new(),
            source: None,
            exclude: Vec::new(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            overwrite: Config::default_overwrite(),
            sync_terms: false,
            updating: UpdateMode::default(),
            fuzzy_trigger: false,
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            file_type: Config::default_file_type(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            add_language: Config::default_add_language_interval(),
            download: Config::default_download_interval(),
            upload: Config::default_upload_interval(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_progress: Config::default_show_progress(),
            verbose: false,
            colored: Config::default_colored(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: Config::default_language(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loaded(yaml: &str) -> Config {
        let mut config = Config::from_yaml(yaml).expect("Should parse");
        config.source_path = Some(PathBuf::from("locsync.yml"));
        config
    }

    #[test]
    fn test_minimal_yaml_fills_defaults() {
        let config = Config::from_yaml(
            r#"
project:
  path: App.xcodeproj
remote:
  api_token: secret
  project_id: "42"
"#,
        )
        .expect("Should parse");

        assert_eq!(config.project.path, "App.xcodeproj");
        assert_eq!(config.project.xcodebuild, "xcodebuild");
        assert_eq!(config.remote.base_url, "https://api.poeditor.com/v2");
        assert_eq!(config.remote.retry_count, 3);
        assert!(config.languages.auto_detect);
        assert!(config.upload.overwrite);
        assert_eq!(config.upload.updating, UpdateMode::TermsTranslations);
        assert_eq!(config.rate_limit.upload, 20);
        assert_eq!(config.rate_limit.add_language, 2);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml("  \n").expect("Should parse");
        assert!(config.project.path.is_empty());
        assert_eq!(config.i18n.language, "en_us");
    }

    #[test]
    fn test_full_yaml() {
        let config = Config::from_yaml(
            r#"
project:
  path: App.xcodeproj
  command_timeout: 120
remote:
  api_token: secret
  project_id: "42"
languages:
  auto_detect: false
  codes: [en, fr, pt-br]
  source: en
  exclude: ["zh-*"]
upload:
  overwrite: false
  sync_terms: true
  updating: translations
download:
  filters: [translated, proofread]
rate_limit:
  upload: 30
"#,
        )
        .expect("Should parse");

        assert_eq!(config.project.command_timeout, 120);
        assert_eq!(config.languages.codes, vec!["en", "fr", "pt-br"]);
        assert_eq!(config.languages.source.as_deref(), Some("en"));
        assert_eq!(config.languages.exclude, vec!["zh-*"]);
        assert!(!config.upload.overwrite);
        assert!(config.upload.sync_terms);
        assert_eq!(config.upload.updating, UpdateMode::Translations);
        assert_eq!(config.download.filters, vec!["translated", "proofread"]);
        assert_eq!(config.rate_limit.upload, 30);
        assert_eq!(config.rate_limit.download, 2);
    }

    #[test]
    fn test_invalid_update_mode_is_rejected() {
        let result = Config::from_yaml("upload:\n  updating: everything\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_requires_config_file() {
        let config = Config::default();
        let err = config.validate_for_sync().unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
        assert!(err.to_string().contains("no configuration file"));
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let config = loaded("project:\n  path: App.xcodeproj\n");
        let err = config.validate_for_sync().unwrap_err().to_string();
        assert!(err.contains("remote.project_id"));
        assert!(!err.contains("project.path"));
    }

    #[test]
    fn test_validate_explicit_languages_need_codes() {
        let config = loaded(
            r#"
project: {path: App.xcodeproj}
remote: {api_token: t, project_id: "1"}
languages: {auto_detect: false}
"#,
        );
        let err = config.validate_for_sync().unwrap_err().to_string();
        assert!(err.contains("languages.codes"));
    }

    #[test]
    fn test_runtime_args_override_file_values() {
        let mut config = loaded("output:\n  verbose: false\n  colored: true\n");
        config.apply_runtime_args(RuntimeArgs {
            verbose: Some(true),
            colored: Some(false),
            show_progress: None,
            language: Some("zh_cn".to_string()),
        });
        assert!(config.output.verbose);
        assert!(!config.output.colored);
        assert!(config.output.show_progress);
        assert_eq!(config.i18n.language, "zh_cn");
    }

    #[test]
    fn test_template_roundtrips_through_yaml_and_toml() {
        let dir = TempDir::new().expect("temp dir");
        for name in ["locsync.yml", "locsync.toml"] {
            let path = dir.path().join(name);
            Config::create_default_config_file(&path).expect("Should write");
            let config = Config::load_from_path(&path).expect("Should load");
            assert_eq!(config.project.path, "MyApp.xcodeproj");
            assert_eq!(config.download.filters, vec!["translated"]);
            assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
        }
    }

    #[test]
    fn test_load_reports_unreadable_file() {
        let err = Config::load_from_path(Path::new("/nonexistent/locsync.yml")).unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
    }

    #[test]
    fn test_discover_prefers_explicit_path() {
        let explicit = PathBuf::from("/custom/config.yml");
        assert_eq!(Config::discover(Some(&explicit)), Some(explicit));
    }
}
