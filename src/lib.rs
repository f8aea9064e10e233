// ============================================================================
// LocSync - 库入口
// ============================================================================
//
// 文件: src/lib.rs
// 职责: 模块声明与公共导出
// 边界:
//   - ✅ 模块树定义
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod cli;
pub mod core;
pub mod error;
pub mod i18n;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

pub use error::{Result, SyncError};
