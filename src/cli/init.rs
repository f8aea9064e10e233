// ============================================================================
// LocSync - 初始化命令处理
// ============================================================================
//
// 文件: src/cli/init.rs
// 职责: 处理配置文件初始化命令
// 边界:
//   - ✅ 初始化命令参数解析
//   - ✅ 默认配置文件生成
//   - ✅ 配置文件存在性检查
//   - ❌ 不应包含配置文件格式定义
//   - ❌ 不应包含配置验证逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::models::config::Config;
use crate::utils::constants::CONFIG_FILE_NAMES;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 带注释的 YAML 配置模板
pub const DEFAULT_TEMPLATE: &str = r#"# LocSync configuration

project:
  # Path to the .xcodeproj bundle
  path: MyApp.xcodeproj
  # xcodebuild: xcodebuild
  # plutil: plutil
  # Seconds before an xcodebuild / plutil call is killed
  command_timeout: 600

remote:
  # POEditor API token (LOCSYNC_API_TOKEN overrides this value)
  api_token: ""
  project_id: "000000"
  # base_url: https://api.poeditor.com/v2
  request_timeout: 60
  # Attempts for requests that fail with a connect or timeout error
  retry_count: 3

languages:
  # Read languages from the project's knownRegions
  auto_detect: true
  # Used when auto_detect is false
  codes: []
  # Source language; detected from POEditor when unset (download only)
  # source: en
  # Glob patterns of languages to ignore on both sides
  exclude: []

upload:
  overwrite: true
  # Delete remote terms missing from the uploaded file
  sync_terms: false
  # terms | terms_translations | translations
  updating: terms_translations
  fuzzy_trigger: false

download:
  filters:
    - translated
  file_type: xliff

# Minimum seconds between two calls of the same kind
rate_limit:
  add_language: 2
  download: 2
  upload: 20

output:
  show_progress: true
  verbose: false
  colored: true

i18n:
  # en_us | zh_cn
  language: en_us
"#;

/// 初始化命令参数
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

/// 处理初始化命令，目标路径来自全局 --config
pub fn handle_init(args: InitArgs, config_path: Option<PathBuf>) -> Result<()> {
    Logger::info(t!("init.start"));

    let config_path = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAMES[0]));

    // 检查配置文件是否已存在
    if config_path.exists() && !args.force {
        Logger::warn(tf!("init.config_exists", config_path.display()));
        Logger::info(t!("init.use_force_hint"));
        return Ok(());
    }

    match write_template(&config_path) {
        Ok(()) => {
            Logger::success(tf!("init.config_created", config_path.display()));
            Logger::info(t!("init.next_steps"));
            Ok(())
        }
        Err(e) => {
            Logger::error(tf!("init.create_failed", e));
            Err(e)
        }
    }
}

/// YAML 写入带注释的模板，TOML 由默认配置序列化生成
fn write_template(config_path: &Path) -> Result<()> {
    if config_path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
        Config::create_default_config_file(config_path)
    } else {
        std::fs::write(config_path, DEFAULT_TEMPLATE)?;
        Ok(())
    }
}
