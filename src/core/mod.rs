// ============================================================================
// LocSync - Core 核心模块
// ============================================================================
//
// 文件: src/core/mod.rs
// 职责: 核心同步逻辑模块入口和导出
// 边界:
//   - ✅ 核心子模块导出
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含具体业务实现
//   - ❌ 不应包含 CLI 相关逻辑
//   - ❌ 不应包含 HTTP / 进程调用细节
//
// ============================================================================

pub mod rate_limiter;
pub mod reconciler;
pub mod retry;
pub mod workflow;

// 重新导出常用类型
pub use rate_limiter::{OperationClass, RateLimiter, RateLimits};
pub use retry::RetryPolicy;
pub use workflow::{LocalLanguages, StatusReport, SyncWorkflow, UploadRequest, WorkflowConfig};
