// ============================================================================
// LocSync - 错误类型
// ============================================================================
//
// 文件: src/error.rs
// 职责: 同步流程的错误分类定义
// 边界:
//   - ✅ 错误种类枚举定义
//   - ✅ 错误可恢复性判断
//   - ❌ 不应包含错误输出格式化
//   - ❌ 不应包含重试逻辑
//
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// 同步流程结果类型
pub type Result<T> = std::result::Result<T, SyncError>;

/// 同步流程中可能出现的错误
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// 配置缺失或无效
    #[error("configuration error: {0}")]
    Configuration(String),

    /// 请求的语言在本地与远端都不存在
    #[error(
        "unknown language code(s): {}. Local languages: [{}]. Remote languages: [{}]",
        .invalid.join(", "),
        .local.join(", "),
        .remote.join(", ")
    )]
    InvalidLanguages {
        invalid: Vec<String>,
        local: Vec<String>,
        remote: Vec<String>,
    },

    /// 远端项目没有任何语言，无法推断源语言
    #[error("cannot detect the source language: the remote project has no languages")]
    NoSourceLanguage,

    /// 外部工具以非零状态退出
    #[error("{tool} failed (exit code {}): {output}", .code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()))]
    ExternalTool {
        tool: String,
        code: Option<i32>,
        output: String,
    },

    /// 外部工具执行超时
    #[error("{tool} did not finish within {}s", .timeout.as_secs())]
    ExternalToolTimeout { tool: String, timeout: Duration },

    /// 远端服务返回非成功状态
    #[error("remote service rejected {operation} (code {code}): {message}")]
    Remote {
        operation: String,
        code: String,
        message: String,
    },

    /// 网络传输失败
    #[error("network error during {operation}: {message}")]
    Network {
        operation: String,
        message: String,
        transient: bool,
        /// 连接未建立，请求未送达服务端
        connect: bool,
    },

    /// 预期的本地翻译文件不存在
    #[error("no artifact for '{language}' under {}", .path.display())]
    ArtifactMissing { language: String, path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// 是否为可重试的瞬时网络错误
    pub fn is_transient(&self) -> bool {
        matches!(self, SyncError::Network { transient: true, .. })
    }

    /// 是否可安全重发：仅连接失败时请求一定未被服务端处理
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, SyncError::Network { connect: true, .. })
    }

    pub(crate) fn network(operation: &str, err: reqwest::Error) -> Self {
        SyncError::Network {
            operation: operation.to_string(),
            transient: err.is_timeout() || err.is_connect(),
            connect: err.is_connect(),
            message: err.to_string(),
        }
    }
}
