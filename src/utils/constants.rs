// ============================================================================
// LocSync - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用程序常量定义
// 边界:
//   - ✅ 应用程序常量定义
//   - ✅ 图标字符定义
//   - ✅ 配置文件名与环境变量名
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "LOCSYNC";

/// 按顺序查找的配置文件名
pub const CONFIG_FILE_NAMES: &[&str] = &["locsync.yml", "locsync.yaml", ".locsync.yml", "locsync.toml"];

/// 覆盖配置中 API 令牌的环境变量
pub const TOKEN_ENV_VAR: &str = "LOCSYNC_API_TOKEN";

/// 临时目录前缀
pub const TEMP_DIR_PREFIX: &str = "locsync-";

/// 图标
pub mod icons {
    /// 成功图标
    pub const SUCCESS: &str = "✓";
    /// 错误图标
    pub const ERROR: &str = "✗";
    /// 警告图标
    pub const WARNING: &str = "!";
    /// 语言图标
    pub const LANGUAGE: &str = "●";
    /// 源语言图标
    pub const SOURCE: &str = "◉";
    /// 新增图标
    pub const ADDED: &str = "+";
    /// 时间图标
    pub const TIME: &str = "⧖";
    /// 跳过图标
    pub const SKIP: &str = "○";
    /// 未执行图标
    pub const PENDING: &str = "·";
}

/// 加载 spinner 字符
pub mod spinner_chars {
    pub const BASE: &str = "⠋⠙⠹⠸⠼⠴⠦⠧";
}
