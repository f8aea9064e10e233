// ============================================================================
// LocSync - UI 模块
// ============================================================================
//
// 文件: src/ui/mod.rs
// 职责: 终端展示组件导出
// 边界:
//   - ✅ 子模块导出
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod spinner;
pub mod summary;
