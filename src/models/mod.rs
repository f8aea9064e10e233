// ============================================================================
// LocSync - 数据模型模块
// ============================================================================
//
// 文件: src/models/mod.rs
// 职责: 配置、语言与同步结果数据模型导出
// 边界:
//   - ✅ 子模块导出
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod config;
pub mod language;
pub mod outcome;

pub use language::{LanguageFilter, LanguageSet, RemoteLanguage};
pub use outcome::{LanguageOutcome, OutcomeStatus, SyncDirection, SyncReport, WorkflowFailure};
